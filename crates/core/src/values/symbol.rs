use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_SYMBOL_LENGTH;
use crate::errors::ValidationError;

/// Ticker symbol: 1 to 10 upper-case ASCII letters or digits.
///
/// Input is trimmed and upper-cased before validation. Ordering is
/// lexicographic, which is what wallets sort their assets by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidSymbol(
                "symbol cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_SYMBOL_LENGTH {
            return Err(ValidationError::InvalidSymbol(format!(
                "'{}' is longer than {} characters",
                trimmed, MAX_SYMBOL_LENGTH
            )));
        }

        let normalized = trimmed.to_uppercase();
        if !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidSymbol(format!(
                "'{}' must contain only letters and digits",
                trimmed
            )));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
