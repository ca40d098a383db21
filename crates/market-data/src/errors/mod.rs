//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while asking a quote source for a price.
///
/// Callers in the valuation engine treat every variant as "no price for this
/// symbol"; the distinctions exist for logging and for [`is_transient`](Self::is_transient).
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The source does not know the symbol, or returned no data for it.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-success HTTP status, bad payload).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered, but the price could not be interpreted.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        provider: String,
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether a later attempt could plausibly succeed.
    ///
    /// ```
    /// use cryptowallet_market_data::errors::MarketDataError;
    ///
    /// let error = MarketDataError::RateLimited { provider: "COINCAP".to_string() };
    /// assert!(error.is_transient());
    ///
    /// let error = MarketDataError::SymbolNotFound("NOPE".to_string());
    /// assert!(!error.is_transient());
    /// ```
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Network(_) => true,
            Self::SymbolNotFound(_)
            | Self::ProviderError { .. }
            | Self::InvalidResponse { .. } => false,
        }
    }
}
