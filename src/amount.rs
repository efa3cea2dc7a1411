//! Exact decimal money values.
//!
//! Uses `rust_decimal` internally at full precision. Rounding to cents only
//! happens when a value is presented, never in the middle of a computation.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount kept at full decimal precision.
///
/// `Display` renders the value rounded to 2 decimal places, which is the
/// only place rounding is applied. Serialization keeps the exact value.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use fair_split::Amount;
///
/// let amount = Amount::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Number of decimal places used for presentation.
    pub const CENTS_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Amount(value)
    }

    /// Returns the underlying decimal.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if the value is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns `true` if the value is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies by a participant count. Exact for any count.
    pub fn scaled_by(self, count: usize) -> Self {
        Amount(self.0 * Decimal::from(count))
    }

    /// Addition that returns `None` instead of overflowing.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// [`Amount::scaled_by`] that returns `None` instead of overflowing.
    pub fn checked_scaled_by(self, count: usize) -> Option<Self> {
        self.0.checked_mul(Decimal::from(count)).map(Amount)
    }

    /// Divides by a participant count. Returns zero when `count` is zero.
    pub fn divided_by(self, count: usize) -> Self {
        if count == 0 {
            return Amount::ZERO;
        }
        Amount(self.0 / Decimal::from(count))
    }

    /// Rounds to cents, midpoint away from zero. A value that rounds to
    /// zero loses its sign.
    pub fn round_cents(self) -> Self {
        let rounded = self
            .0
            .round_dp_with_strategy(Self::CENTS_SCALE, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_zero() {
            Amount::ZERO
        } else {
            Amount(rounded)
        }
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cents = self.round_cents().0;
        cents.rescale(Self::CENTS_SCALE);
        write!(f, "{}", cents)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.normalize().to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}
