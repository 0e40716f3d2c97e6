//! Price sync service: fetches quotes for symbols with pending orders,
//! writes them to the store and triggers order processing.

pub mod config;
pub mod quote;
pub mod service;
pub mod store;

pub use config::PriceSyncConfig;
pub use quote::{ItickClient, Quote, QuoteProvider};
pub use service::{unique_symbols, PriceSyncService, SyncReport};
pub use store::{
    create_store, InMemoryPriceStore, PostgresPriceStore, PriceStore, SupabasePriceStore,
};
