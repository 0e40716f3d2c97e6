//! Persistent store access for pending orders and current prices

mod memory;
mod postgres;
mod supabase;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use common::decimal::Price;
use common::error::Result;
use common::model::PendingOrder;

use crate::config::PriceSyncConfig;

pub use memory::InMemoryPriceStore;
pub use postgres::PostgresPriceStore;
pub use supabase::SupabasePriceStore;

/// Name of the procedure that writes a symbol's current price
pub const UPDATE_CURRENT_PRICE: &str = "update_current_price";
/// Name of the procedure that settles pending orders against current prices
pub const PROCESS_PENDING_ORDERS: &str = "process_pending_orders";

#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Pending orders, ordered by symbol. Symbols may repeat.
    async fn fetch_pending_orders(&self) -> Result<Vec<PendingOrder>>;

    /// Write the current price of a symbol
    async fn update_price(&self, symbol: &str, price: Price) -> Result<()>;

    /// Settle pending orders; the result shape is defined by the store
    async fn process_pending_orders(&self) -> Result<Value>;
}

/// Create the store backend selected by the configuration.
///
/// A direct Postgres connection is used when `database_url` is set, the
/// Supabase REST API otherwise.
pub async fn create_store(config: &PriceSyncConfig) -> Result<Arc<dyn PriceStore>> {
    match &config.database_url {
        Some(database_url) => {
            info!("Using Postgres price store with pool size: {}", config.db_pool_size);
            let store = PostgresPriceStore::connect(database_url, config.db_pool_size).await?;
            Ok(Arc::new(store))
        }
        None => {
            info!("Using Supabase price store at {}", config.supabase_url);
            Ok(Arc::new(SupabasePriceStore::new(config)?))
        }
    }
}
