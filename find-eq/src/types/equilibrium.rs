use super::Price;
use std::fmt;

/// The competitive equilibrium of a double auction.
///
/// Any price in the closed band `[price_min, price_max]` clears the market at
/// `quantity` units: exactly that many buyers are willing to buy, and exactly
/// that many sellers are willing to sell. An equilibrium always trades at
/// least one unit; the absence of trade is represented by the absence of an
/// `Equilibrium` altogether.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Equilibrium<P> {
    quantity: usize,
    price_min: P,
    price_max: P,
}

impl<P: Price> Equilibrium<P> {
    /// Creates a new equilibrium, validating its invariants
    pub fn new(quantity: usize, price_min: P, price_max: P) -> Result<Self, EquilibriumError> {
        if quantity == 0 {
            return Err(EquilibriumError::ZeroQuantity);
        }
        if price_min.cmp_price(&price_max).is_gt() {
            return Err(EquilibriumError::InvertedBand);
        }
        Ok(Self {
            quantity,
            price_min,
            price_max,
        })
    }

    /// Creates a new equilibrium without validation.
    ///
    /// The caller must ensure `quantity > 0` and `price_min <= price_max`.
    pub(crate) fn new_unchecked(quantity: usize, price_min: P, price_max: P) -> Self {
        Self {
            quantity,
            price_min,
            price_max,
        }
    }

    /// The number of units traded
    pub fn quantity(&self) -> usize {
        self.quantity
    }

    /// The lowest price at which the equilibrium quantity clears
    pub fn price_min(&self) -> &P {
        &self.price_min
    }

    /// The highest price at which the equilibrium quantity clears
    pub fn price_max(&self) -> &P {
        &self.price_max
    }

    /// Does `price` lie within the clearing band?
    pub fn contains(&self, price: &P) -> bool {
        price.cmp_price(&self.price_min).is_ge() && price.cmp_price(&self.price_max).is_le()
    }

    /// Select a single clearing price from the band
    pub fn price(&self, bias: PriceBias) -> P {
        match bias {
            PriceBias::FavorBuyers => self.price_min.clone(),
            PriceBias::FavorSellers => self.price_max.clone(),
            PriceBias::Midpoint => self.price_min.mid_price(&self.price_max),
        }
    }

    /// Consumes the equilibrium, returning `(quantity, price_min, price_max)`
    pub fn into_parts(self) -> (usize, P, P) {
        (self.quantity, self.price_min, self.price_max)
    }
}

impl<P: fmt::Display> fmt::Display for Equilibrium<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ [{}, {}]",
            self.quantity, self.price_min, self.price_max
        )
    }
}

/// Which end of the clearing band a single reference price is taken from.
///
/// Every price in the band is efficient; the choice only decides how the gains
/// from trade are split between the two sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PriceBias {
    /// The lowest clearing price, leaving buyers the most surplus
    FavorBuyers,
    /// The highest clearing price, leaving sellers the most surplus
    FavorSellers,
    /// Halfway between the two
    #[default]
    Midpoint,
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct EquilibriumDto<P> {
    quantity: usize,
    price_min: P,
    price_max: P,
}

#[cfg(feature = "serde")]
impl<'de, P: Price + serde::Deserialize<'de>> serde::Deserialize<'de> for Equilibrium<P> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let EquilibriumDto {
            quantity,
            price_min,
            price_max,
        } = <EquilibriumDto<P> as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(quantity, price_min, price_max).map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when creating or validating an Equilibrium
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum EquilibriumError {
    /// Error when no units would trade
    #[error("An equilibrium must trade at least one unit")]
    ZeroQuantity,
    /// Error when the lower price bound exceeds the upper
    #[error("price_min exceeds price_max")]
    InvertedBand,
}
