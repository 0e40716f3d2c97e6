//! Common types and utilities for the price sync service
//!
//! This library contains shared types used by the sync service and the HTTP
//! gateway: a unified error type, the decimal price alias and the domain
//! models for pending orders, market classification and price updates.

pub mod error;
pub mod model;
pub mod decimal;

/// Re-export important types
pub use error::{Error, Result};
pub use decimal::*;

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
