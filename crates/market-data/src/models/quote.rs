use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest price for one symbol, as reported by a quote source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Symbol the price belongs to, as sent to the source
    pub symbol: String,

    /// Price per unit in the source's quote currency
    pub price: Decimal,

    /// When the source observed the price
    pub timestamp: DateTime<Utc>,

    /// Source of the quote (COINCAP, STATIC, ...)
    pub source: String,
}

impl Quote {
    pub fn new(symbol: String, price: Decimal, timestamp: DateTime<Utc>, source: String) -> Self {
        Self {
            symbol,
            price,
            timestamp,
            source,
        }
    }
}
