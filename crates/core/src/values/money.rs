use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{round_to_scale, Quantity};
use crate::constants::MONEY_SCALE;
use crate::errors::ValidationError;

/// A non-negative monetary amount with six fractional digits.
///
/// Construction and every arithmetic result round half-up to six digits.
///
/// ```
/// use cryptowallet_core::values::{Money, Quantity};
/// use rust_decimal_macros::dec;
///
/// let price = Money::new(dec!(50000)).unwrap();
/// let qty = Quantity::new(dec!(1.5)).unwrap();
/// assert_eq!(price.multiply(qty).unwrap().to_string(), "75000.000000");
/// assert!(Money::new(dec!(-1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::from_parts(0, 0, 0, false, MONEY_SCALE));

    pub fn new(amount: Decimal) -> Result<Self, ValidationError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::InvalidMoney(format!(
                "amount cannot be negative: {}",
                amount
            )));
        }
        Ok(Self(round_to_scale(amount, MONEY_SCALE)))
    }

    #[inline]
    pub fn amount(self) -> Decimal {
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

    pub fn add(self, other: Money) -> Result<Self, ValidationError> {
        let sum = self
            .0
            .checked_add(other.0)
            .ok_or_else(|| overflow("addition"))?;
        Self::new(sum)
    }

    /// Fails when the result would be negative.
    pub fn subtract(self, other: Money) -> Result<Self, ValidationError> {
        let difference = self
            .0
            .checked_sub(other.0)
            .ok_or_else(|| overflow("subtraction"))?;
        Self::new(difference)
    }

    /// Price times quantity, e.g. the value of a holding.
    pub fn multiply(self, quantity: Quantity) -> Result<Self, ValidationError> {
        let product = self
            .0
            .checked_mul(quantity.value())
            .ok_or_else(|| overflow("multiplication"))?;
        Self::new(product)
    }

    /// Amount per unit of `quantity`, e.g. the unit price of a lot.
    pub fn divide(self, quantity: Quantity) -> Result<Self, ValidationError> {
        if quantity.is_zero() {
            return Err(ValidationError::InvalidMoney(
                "cannot divide by a zero quantity".to_string(),
            ));
        }
        let quotient = self
            .0
            .checked_div(quantity.value())
            .ok_or_else(|| overflow("division"))?;
        Self::new(quotient)
    }
}

fn overflow(operation: &str) -> ValidationError {
    ValidationError::InvalidMoney(format!("{} overflowed", operation))
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for Money {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())?;
        Self::new(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
