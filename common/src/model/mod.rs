//! Domain models for the price sync service

pub mod order;
pub mod market;
pub mod price;

pub use market::{MarketClassification, MarketType, Region};
pub use order::{OrderStatus, PendingOrder};
pub use price::PriceUpdate;
