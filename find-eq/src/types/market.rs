use super::{Equilibrium, Price, Surplus, max_price, min_price};
use tracing::{Level, event};

/// The demand and supply schedules of a unit-demand, unit-supply market.
///
/// Bids are held in descending order (the highest willingness to pay first)
/// and asks in ascending order (the lowest reservation price first), which is
/// to say the i-th entries of each are the i-th buyer and seller to enter the
/// market as the price moves towards them.
#[derive(Clone, Debug)]
pub struct Market<P> {
    bids: Vec<P>,
    asks: Vec<P>,
}

impl<P: Price> Market<P> {
    /// Build the schedules from unordered bids and asks
    pub fn new(bids: impl IntoIterator<Item = P>, asks: impl IntoIterator<Item = P>) -> Self {
        let mut bids = bids.into_iter().collect::<Vec<_>>();
        let mut asks = asks.into_iter().collect::<Vec<_>>();

        bids.sort_unstable_by(|a, b| b.cmp_price(a));
        asks.sort_unstable_by(|a, b| a.cmp_price(b));

        Self { bids, asks }
    }

    /// The bids, highest first
    pub fn bids(&self) -> &[P] {
        &self.bids
    }

    /// The asks, lowest first
    pub fn asks(&self) -> &[P] {
        &self.asks
    }

    /// The number of buyers willing to buy at `price`
    pub fn demand_at(&self, price: &P) -> usize {
        self.bids
            .partition_point(|bid| bid.cmp_price(price).is_ge())
    }

    /// The number of sellers willing to sell at `price`
    pub fn supply_at(&self, price: &P) -> usize {
        self.asks
            .partition_point(|ask| ask.cmp_price(price).is_le())
    }

    /// Demand and supply at `price`
    pub fn depth_at(&self, price: &P) -> Depth {
        Depth {
            demand: self.demand_at(price),
            supply: self.supply_at(price),
        }
    }

    /// The largest number of units that can trade with non-negative gains:
    /// the length of the leading run of pairs whose bid meets its ask.
    pub fn efficient_quantity(&self) -> usize {
        self.bids
            .iter()
            .zip(self.asks.iter())
            .take_while(|(bid, ask)| bid.cmp_price(ask).is_ge())
            .count()
    }

    /// Compute the competitive equilibrium, or `None` if nothing can trade.
    pub fn equilibrium(&self) -> Option<Equilibrium<P>> {
        let quantity = self.efficient_quantity();
        if quantity == 0 {
            event!(
                Level::DEBUG,
                bids = self.bids.len(),
                asks = self.asks.len(),
                "no mutually beneficial trade"
            );
            return None;
        }

        // Start with the marginal traders' values: no accepted seller may be
        // asked to sell below their ask, and no accepted buyer may be asked to
        // pay above their bid.
        let mut price_min = self.asks[quantity - 1].clone();
        let mut price_max = self.bids[quantity - 1].clone();

        // Then tighten the band to keep the first excluded buyer and seller out.
        if let Some(bid) = self.bids.get(quantity) {
            price_min = max_price(price_min, bid.clone());
        }
        if let Some(ask) = self.asks.get(quantity) {
            price_max = min_price(price_max, ask.clone());
        }

        event!(
            Level::DEBUG,
            quantity,
            ?price_min,
            ?price_max,
            "market cleared"
        );

        // The excluded bid is below the excluded ask, else the scan would have
        // continued, so the band is never inverted.
        Some(Equilibrium::new_unchecked(quantity, price_min, price_max))
    }
}

impl<P: Surplus> Market<P> {
    /// The total gains from trade when the first `quantity` buyers trade with
    /// the first `quantity` sellers, or `None` if the total is not
    /// representable in `P`.
    ///
    /// This does not depend on the price paid, which only transfers surplus
    /// between the two sides.
    pub fn gains_from_trade(&self, quantity: usize) -> Option<P> {
        self.bids
            .iter()
            .zip(self.asks.iter())
            .take(quantity)
            .try_fold(P::zero(), |total, (bid, ask)| {
                total.checked_add_price(&bid.checked_sub_price(ask)?)
            })
    }
}

/// Market depth at a particular price
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Depth {
    /// The number of bids at or above the price
    pub demand: usize,
    /// The number of asks at or below the price
    pub supply: usize,
}

impl Depth {
    /// The number of units that can actually change hands
    pub fn volume(&self) -> usize {
        self.demand.min(self.supply)
    }

    /// Demand less supply; positive when buyers would be rationed.
    /// Saturates at the bounds of `i64`.
    pub fn excess_demand(&self) -> i64 {
        if self.demand >= self.supply {
            i64::try_from(self.demand - self.supply).unwrap_or(i64::MAX)
        } else {
            i64::try_from(self.supply - self.demand).map_or(i64::MIN, |excess| -excess)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_schedules_are_sorted() {
        let market = Market::new([6, 10, 8], [9, 5, 7]);
        assert_eq!(market.bids(), &[10, 8, 6]);
        assert_eq!(market.asks(), &[5, 7, 9]);
    }

    #[test]
    fn test_depth() {
        let market = Market::new([10, 8, 6], [5, 7, 9]);

        assert_eq!(market.demand_at(&8), 2);
        assert_eq!(market.supply_at(&8), 2);
        assert_eq!(market.demand_at(&11), 0);
        assert_eq!(market.supply_at(&4), 0);
        assert_eq!(market.demand_at(&0), 3);
        assert_eq!(market.supply_at(&100), 3);

        let depth = market.depth_at(&6);
        assert_eq!(depth, Depth { demand: 3, supply: 1 });
        assert_eq!(depth.volume(), 1);
        assert_eq!(depth.excess_demand(), 2);
        assert_eq!(market.depth_at(&10).excess_demand(), -2);
    }

    #[test]
    fn test_excess_demand_saturates() {
        let glut = Depth { demand: 0, supply: usize::MAX };
        assert_eq!(glut.excess_demand(), i64::MIN);

        let shortage = Depth { demand: usize::MAX, supply: 0 };
        assert_eq!(shortage.excess_demand(), i64::MAX);

        let close = Depth { demand: usize::MAX, supply: usize::MAX - 1 };
        assert_eq!(close.excess_demand(), 1);
    }

    #[test]
    fn test_efficient_quantity() {
        assert_eq!(Market::new([10, 8, 6], [5, 7, 9]).efficient_quantity(), 2);
        assert_eq!(Market::new([3, 2, 1], [4, 5, 6]).efficient_quantity(), 0);
        assert_eq!(Market::new(Vec::<i32>::new(), [1]).efficient_quantity(), 0);
        assert_eq!(Market::new([10; 5], [5; 3]).efficient_quantity(), 3);
    }

    #[test]
    fn test_gains_from_trade() {
        let market = Market::new([dec!(100), dec!(80), dec!(60)], [dec!(30), dec!(50), dec!(70)]);
        assert_eq!(market.gains_from_trade(0), Some(dec!(0)));
        assert_eq!(market.gains_from_trade(2), Some(dec!(100)));
        // clamped to the shorter side
        assert_eq!(market.gains_from_trade(10), Some(dec!(90)));
    }

    #[test]
    fn test_gains_from_trade_overflow() {
        let market = Market::new([Decimal::MAX], [Decimal::MIN]);
        assert!(market.equilibrium().is_some());
        assert_eq!(market.gains_from_trade(1), None);

        let market = Market::new([Decimal::MAX; 2], [Decimal::ZERO; 2]);
        assert_eq!(market.gains_from_trade(1), Some(Decimal::MAX));
        assert_eq!(market.gains_from_trade(2), None);

        let market = Market::new([i64::MAX], [i64::MIN]);
        assert_eq!(market.gains_from_trade(1), None);
    }

    #[test]
    fn test_equilibrium_tightens_band() {
        // the excluded buyer (8) raises the floor
        let eq = Market::new([10, 9, 8], [1, 7, 100]).equilibrium().unwrap();
        assert_eq!(eq.into_parts(), (2, 8, 9));

        // the excluded seller (10) lowers the ceiling
        let eq = Market::new([100, 93, 1], [8, 9, 10]).equilibrium().unwrap();
        assert_eq!(eq.into_parts(), (2, 9, 10));

        // both at once
        let eq = Market::new([20, 15, 12], [5, 10, 14]).equilibrium().unwrap();
        assert_eq!(eq.into_parts(), (2, 12, 14));
    }
}
