use rust_decimal::Decimal;
use std::{cmp::Ordering, fmt::Debug};

/// A reservation value for a single unit: a buyer's bid or a seller's ask.
///
/// The solver only ever needs to order prices and, when asked for a single
/// reference price, to find a value between two of them. Implementations must
/// provide a *total* order, so that sorting an arbitrary collection of prices
/// is always well-defined.
pub trait Price: Clone + Debug {
    /// Compare two prices under a total order.
    fn cmp_price(&self, other: &Self) -> Ordering;

    /// A value within the closed interval spanned by `self` and `other`.
    fn mid_price(&self, other: &Self) -> Self;
}

/// Prices that can also be differenced and summed, as when totalling the
/// gains from trade. Both operations report overflow instead of panicking.
pub trait Surplus: Price {
    /// The additive identity
    fn zero() -> Self;

    /// `self - other`, or `None` if the result is out of range
    fn checked_sub_price(&self, other: &Self) -> Option<Self>;

    /// `self + other`, or `None` if the result is out of range
    fn checked_add_price(&self, other: &Self) -> Option<Self>;
}

/// The lesser of two prices (the first, if they tie).
pub fn min_price<P: Price>(a: P, b: P) -> P {
    if b.cmp_price(&a).is_lt() { b } else { a }
}

/// The greater of two prices (the first, if they tie).
pub fn max_price<P: Price>(a: P, b: P) -> P {
    if b.cmp_price(&a).is_gt() { b } else { a }
}

impl Price for Decimal {
    fn cmp_price(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn mid_price(&self, other: &Self) -> Self {
        // An overflowing sum implies both prices share a sign, in which case
        // their difference cannot overflow.
        match self.checked_add(*other) {
            Some(sum) => sum / Decimal::TWO,
            None => *self + (*other - *self) / Decimal::TWO,
        }
    }
}

impl Surplus for Decimal {
    fn zero() -> Self {
        Decimal::ZERO
    }

    fn checked_sub_price(&self, other: &Self) -> Option<Self> {
        self.checked_sub(*other)
    }

    fn checked_add_price(&self, other: &Self) -> Option<Self> {
        self.checked_add(*other)
    }
}

// Integers are ordered as usual. The midpoint is the floor of the average,
// computed bitwise so that it cannot overflow.
macro_rules! integer_price {
    ($($int:ty),*) => {
        $(
            impl Price for $int {
                fn cmp_price(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }

                fn mid_price(&self, other: &Self) -> Self {
                    (self & other) + ((self ^ other) >> 1)
                }
            }

            impl Surplus for $int {
                fn zero() -> Self {
                    0
                }

                fn checked_sub_price(&self, other: &Self) -> Option<Self> {
                    self.checked_sub(*other)
                }

                fn checked_add_price(&self, other: &Self) -> Option<Self> {
                    self.checked_add(*other)
                }
            }
        )*
    };
}

integer_price!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// Floats are ordered by IEEE comparison where it is defined, so that -0.0 and
// 0.0 tie, and by `total_cmp` otherwise, which places NaNs at the extremes.
macro_rules! float_price {
    ($($float:ty),*) => {
        $(
            impl Price for $float {
                fn cmp_price(&self, other: &Self) -> Ordering {
                    self.partial_cmp(other)
                        .unwrap_or_else(|| self.total_cmp(other))
                }

                fn mid_price(&self, other: &Self) -> Self {
                    self / 2.0 + other / 2.0
                }
            }

            // Float arithmetic saturates to infinity rather than overflowing.
            impl Surplus for $float {
                fn zero() -> Self {
                    0.0
                }

                fn checked_sub_price(&self, other: &Self) -> Option<Self> {
                    Some(self - other)
                }

                fn checked_add_price(&self, other: &Self) -> Option<Self> {
                    Some(self + other)
                }
            }
        )*
    };
}

float_price!(f32, f64);
