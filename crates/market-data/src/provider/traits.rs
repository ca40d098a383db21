//! Quote source trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// A source of current prices, keyed by ticker symbol.
///
/// Implementations perform at most one outbound request per call and never
/// retry; batching and failure tolerance live with the caller.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use cryptowallet_market_data::{MarketDataError, Quote, QuoteSource};
///
/// struct FixedSource;
///
/// #[async_trait]
/// impl QuoteSource for FixedSource {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
///         Err(MarketDataError::SymbolNotFound(symbol.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Unique identifier for this source, used in logs and on quotes.
    fn id(&self) -> &'static str;

    /// Fetch the latest price for `symbol`.
    ///
    /// Symbols are passed upper-cased. A symbol the source does not price
    /// yields [`MarketDataError::SymbolNotFound`].
    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;
}
