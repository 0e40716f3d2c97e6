//! Metapackage tying the workspace crates together for end-to-end tests

pub use api_gateway;
pub use common;
pub use price_sync;
