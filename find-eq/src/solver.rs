use crate::{Equilibrium, Market, Price};

/// Find the competitive equilibrium of a unit-demand, unit-supply double auction.
///
/// Each bid is one buyer's maximum willingness to pay for exactly one unit, and
/// each ask is one seller's minimum acceptable price for exactly one unit.
/// Neither side needs to be sorted, and duplicates are allowed.
///
/// # Returns
///
/// * `Some(Equilibrium)` - the number of units traded and the band of prices
///   at which exactly that many units clear
/// * `None` - if no bid meets any ask, including when either side is empty
pub fn find_equilibrium<P: Price>(
    bids: impl IntoIterator<Item = P>,
    asks: impl IntoIterator<Item = P>,
) -> Option<Equilibrium<P>> {
    Market::new(bids, asks).equilibrium()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sides() {
        assert_eq!(find_equilibrium(Vec::<i64>::new(), [5]), None);
        assert_eq!(find_equilibrium([5], Vec::<i64>::new()), None);
        assert_eq!(find_equilibrium(Vec::<i64>::new(), Vec::new()), None);
    }

    #[test]
    fn test_docstring_example() {
        let eq = find_equilibrium([10, 8, 6], [5, 7, 9]).unwrap();
        assert_eq!(eq.into_parts(), (2, 7, 8));
    }

    #[test]
    fn test_borrowed_inputs() {
        let bids = vec![10.0, 8.0, 6.0];
        let asks = vec![5.0, 7.0, 9.0];
        let eq = find_equilibrium(bids.iter().copied(), asks.iter().copied()).unwrap();
        assert_eq!(eq.quantity(), 2);
        assert_eq!(*eq.price_min(), 7.0);
        assert_eq!(*eq.price_max(), 8.0);
    }
}
