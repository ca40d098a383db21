use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::round_to_scale;
use crate::constants::{MIN_TRADABLE_QUANTITY, QUANTITY_SCALE};
use crate::errors::ValidationError;

/// A non-negative amount of units with eight fractional digits.
///
/// Zero is representable (simulation inputs and empty sums need it), but an
/// owned asset never carries a zero quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    pub const ZERO: Self = Self(Decimal::from_parts(0, 0, 0, false, QUANTITY_SCALE));

    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::InvalidQuantity(format!(
                "quantity cannot be negative: {}",
                value
            )));
        }
        Ok(Self(round_to_scale(value, QUANTITY_SCALE)))
    }

    /// Smallest quantity accepted into a wallet (`0.00000001`).
    pub fn min_tradable() -> Self {
        Self(round_to_scale(MIN_TRADABLE_QUANTITY, QUANTITY_SCALE))
    }

    #[inline]
    pub fn value(self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        !self.0.is_zero()
    }

    pub fn add(self, other: Quantity) -> Result<Self, ValidationError> {
        let sum = self.0.checked_add(other.0).ok_or_else(|| {
            ValidationError::InvalidQuantity("addition overflowed".to_string())
        })?;
        Self::new(sum)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl FromStr for Quantity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())?;
        Self::new(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
