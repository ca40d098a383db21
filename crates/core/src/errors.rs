//! Core error types for the wallet valuation engine.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the valuation engine.
///
/// Every variant except [`Error::InvariantViolation`] and [`Error::Database`]
/// describes a condition the caller can act on.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid value: {0}")]
    InvalidValue(#[from] ValidationError),

    #[error("Wallet not found: {0}")]
    WalletNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Email already registered: {0}")]
    EmailAlreadyRegistered(String),

    #[error("Unsupported symbol: {0}")]
    UnsupportedSymbol(String),

    #[error("No market price available for {0}")]
    PriceUnavailable(String),

    #[error("Asset rejected: {0}")]
    AssetRejected(String),

    #[error("Invalid simulation input: {0}")]
    InvalidSimulationInput(String),

    /// Internal consistency failure. Never a user error.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),
}

impl Error {
    /// Fatal errors signal a bug or corrupted state and must not be retried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::InvariantViolation(_))
    }
}

/// Errors raised by the validating constructors of the value types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid money amount: {0}")]
    InvalidMoney(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid wallet id: {0}")]
    InvalidWalletId(String),

    #[error("Decimal parse error: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::InvalidValue(ValidationError::DecimalParse(err))
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Stored data could not be turned back into domain values.
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}
