//! Quote source abstractions and implementations.
//!
//! This module contains:
//! - The `QuoteSource` trait that all providers implement
//! - The CoinCap HTTP provider
//! - A static, in-memory source for local runs and tests

mod traits;

pub mod coincap;
pub mod static_source;

// Re-exports
pub use traits::QuoteSource;
