//! SQLite storage implementation for the crypto wallet engine.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `cryptowallet-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users and their holdings
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! ```text
//!      core (domain)
//!            │
//!            ▼
//!  storage-sqlite (this crate)
//!            │
//!            ▼
//!        SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

mod utils;

// Repository implementations
pub mod assets;
pub mod users;

#[cfg(test)]
mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use assets::AssetRepository;
pub use users::UserRepository;

// Re-export from cryptowallet-core for convenience
pub use cryptowallet_core::errors::{DatabaseError, Error, Result};
