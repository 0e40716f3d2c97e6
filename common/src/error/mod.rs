//! Error types for the price sync service
//!
//! This module provides a unified error type shared by the store backends,
//! the quote provider client and the HTTP gateway, and provides consistent
//! error conversion from the underlying libraries.

use thiserror::Error;

/// Price sync error type
#[derive(Debug, Error)]
pub enum Error {
    /// Error reported by the persistent store.
    ///
    /// Carries the store's own message unchanged so it can be relayed to the
    /// invoker as-is.
    #[error("{0}")]
    Store(String),

    /// Error returned by the quote provider
    #[error("Quote provider error: {0}")]
    QuoteProvider(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Decimal conversion error
    #[error("Decimal conversion error: {0}")]
    DecimalError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// From rust_decimal::Error
impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::DecimalError(err.to_string())
    }
}
