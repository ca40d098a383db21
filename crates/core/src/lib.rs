//! Crypto Wallet Core - value types, domain entities, services, and traits.
//!
//! This crate contains the wallet valuation and price aggregation engine.
//! It is database-agnostic and defines repository traits that are
//! implemented by the `storage-sqlite` crate; prices come from any
//! `cryptowallet_market_data::QuoteSource`.

pub mod constants;
pub mod errors;
pub mod portfolio;
pub mod quotes;
pub mod simulation;
pub mod values;
pub mod wallets;

#[cfg(test)]
mod testing;

// Re-export common types
pub use values::{EmailAddress, Money, Quantity, Symbol, WalletId};
pub use wallets::{Asset, User, Wallet};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
