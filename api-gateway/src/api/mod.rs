//! API handlers
//!
//! The sync endpoint accepts any method and ignores the request body; every
//! answer is a JSON document with a `success` flag.

pub mod health;
pub mod response;
pub mod sync;

pub use response::{ErrorResponse, HealthResponse, SyncResponse};
