//! Text encodings shared by the SQLite models.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings in UTC so that
//! lexicographic order in SQL matches chronological order. Decimal columns
//! are stored as their canonical string form to keep every digit.

use chrono::{DateTime, SecondsFormat, Utc};
use std::str::FromStr;

use crate::errors::StorageError;

pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn parse_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::CorruptRecord(format!("{column} '{raw}': {e}")))
}

/// Parses a stored column through one of the core value types.
pub fn parse_column<T>(column: &str, raw: &str) -> Result<T, StorageError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(raw).map_err(|e| StorageError::CorruptRecord(format!("{column} '{raw}': {e}")))
}
