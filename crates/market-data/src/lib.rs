//! Crypto Wallet Market Data Crate
//!
//! This crate provides provider-agnostic access to current asset prices.
//!
//! # Overview
//!
//! - [`QuoteSource`] - the seam the valuation engine consumes
//! - [`CoinCapProvider`] - HTTP provider backed by the CoinCap REST API
//! - [`StaticQuoteSource`] - fixed price table for offline use
//!
//! A source answers for one symbol per call. Batching, concurrency limits and
//! tolerance of per-symbol failures are the caller's concern.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::Quote;
pub use provider::coincap::CoinCapProvider;
pub use provider::static_source::StaticQuoteSource;
pub use provider::QuoteSource;
