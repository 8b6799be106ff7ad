use crate::{Equilibrium, Map, Market, PriceBias};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use tracing::{Level, event, span};

// First order of business: a newtype wrapper for naming markets in a batch.

macro_rules! string_wrapper {
    ($struct:ident) => {
        #[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        #[doc = concat!("A newtype wrapper for ", stringify!($struct))]
        pub struct $struct(String);

        impl fmt::Display for $struct {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $struct {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

string_wrapper!(MarketId);

// Prices are read either from decimal strings, which parse exactly, or from
// JSON integers. A fractional JSON number has already been rounded through
// f64 by the parser, so it is refused instead of silently altered.
struct ExactPrice(Decimal);

impl<'de> Deserialize<'de> for ExactPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ExactPriceVisitor;

        impl de::Visitor<'_> for ExactPriceVisitor {
            type Value = Decimal;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a decimal string or an integer")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Decimal, E> {
                Decimal::from_str_exact(value).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Decimal, E> {
                Ok(Decimal::from(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Decimal, E> {
                Ok(Decimal::from(value))
            }
        }

        deserializer.deserialize_any(ExactPriceVisitor).map(Self)
    }
}

fn exact_prices<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Decimal>, D::Error> {
    let prices = Vec::<ExactPrice>::deserialize(deserializer)?;
    Ok(prices.into_iter().map(|ExactPrice(price)| price).collect())
}

/// a single double auction: one unit per bid and per ask
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Auction {
    /// the buyers' maximum willingness to pay
    #[serde(deserialize_with = "exact_prices")]
    pub bids: Vec<Decimal>,
    /// the sellers' minimum acceptable prices
    #[serde(deserialize_with = "exact_prices")]
    pub asks: Vec<Decimal>,
}

impl Auction {
    /// build the sorted demand and supply schedules
    pub fn market(&self) -> Market<Decimal> {
        Market::new(self.bids.iter().copied(), self.asks.iter().copied())
    }

    /// solve the auction
    pub fn solve(&self, bias: PriceBias) -> Outcome {
        let market = self.market();
        match market.equilibrium() {
            Some(equilibrium) => {
                let gains_from_trade = market.gains_from_trade(equilibrium.quantity());
                if gains_from_trade.is_none() {
                    event!(
                        Level::WARN,
                        quantity = equilibrium.quantity(),
                        "gains from trade exceed the decimal range"
                    );
                }
                Outcome {
                    price: Some(equilibrium.price(bias)),
                    gains_from_trade,
                    equilibrium: Some(equilibrium),
                }
            }
            None => Outcome::default(),
        }
    }

    /// report the state of the market at the given price
    pub fn inspect(&self, price: Decimal) -> Inspection {
        let market = self.market();
        let depth = market.depth_at(&price);
        let clears = market
            .equilibrium()
            .is_some_and(|equilibrium| equilibrium.contains(&price));

        Inspection {
            price,
            demand: depth.demand,
            supply: depth.supply,
            volume: depth.volume(),
            excess_demand: depth.excess_demand(),
            clears,
        }
    }
}

/// a representation of the solution of an auction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Outcome {
    /// the equilibrium quantity and price band, or null if nothing trades
    pub equilibrium: Option<Equilibrium<Decimal>>,
    /// a single reference price drawn from the band
    pub price: Option<Decimal>,
    /// the total surplus realised by the trades, or null if it exceeds the
    /// range of a decimal
    pub gains_from_trade: Option<Decimal>,
}

// The no-trade outcome
impl Default for Outcome {
    fn default() -> Self {
        Self {
            equilibrium: None,
            price: None,
            gains_from_trade: Some(Decimal::ZERO),
        }
    }
}

/// the state of an auction at a given price
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Inspection {
    /// the price inspected
    pub price: Decimal,
    /// how many buyers would buy
    pub demand: usize,
    /// how many sellers would sell
    pub supply: usize,
    /// how many units can change hands
    pub volume: usize,
    /// demand less supply
    pub excess_demand: i64,
    /// whether the price lies in the clearing band
    pub clears: bool,
}

/// a collection of independent auctions, keyed by market
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Batch(pub Map<MarketId, Auction>);

impl Batch {
    /// solve every auction in the batch
    pub fn solve(&self, bias: PriceBias) -> Map<MarketId, Outcome> {
        self.0
            .iter()
            .map(|(market_id, auction)| {
                let _span = span!(Level::INFO, "solve", market = %market_id).entered();
                (market_id.clone(), auction.solve(bias))
            })
            .collect()
    }

    /// inspect every auction in the batch at the same price
    pub fn inspect(&self, price: Decimal) -> Map<MarketId, Inspection> {
        self.0
            .iter()
            .map(|(market_id, auction)| {
                let _span = span!(Level::INFO, "inspect", market = %market_id).entered();
                (market_id.clone(), auction.inspect(price))
            })
            .collect()
    }
}

/// the accepted input: either a lone auction or a keyed batch of them
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Input {
    /// a lone auction
    Single(Auction),
    /// a keyed batch of auctions
    Batch(Batch),
}

/// results shaped like the corresponding input
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Report<T> {
    /// the result for a lone auction
    Single(T),
    /// the results for a batch, in input order
    Batch(Map<MarketId, T>),
}

impl Input {
    /// solve the input
    pub fn solve(&self, bias: PriceBias) -> Report<Outcome> {
        match self {
            Self::Single(auction) => Report::Single(auction.solve(bias)),
            Self::Batch(batch) => {
                event!(Level::INFO, markets = batch.0.len(), ?bias, "solving batch");
                Report::Batch(batch.solve(bias))
            }
        }
    }

    /// inspect the input at a given price
    pub fn inspect(&self, price: Decimal) -> Report<Inspection> {
        match self {
            Self::Single(auction) => Report::Single(auction.inspect(price)),
            Self::Batch(batch) => Report::Batch(batch.inspect(price)),
        }
    }
}
