//! Price sync service implementation

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use common::error::Result;
use common::model::{MarketClassification, PendingOrder, PriceUpdate};

use crate::config::PriceSyncConfig;
use crate::quote::{ItickClient, QuoteProvider};
use crate::store::{create_store, PriceStore};

/// Outcome of one sync pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    /// Prices written to the store, in processing order
    pub prices_updated: Vec<PriceUpdate>,
    /// Result of `process_pending_orders`, if it ran and succeeded
    pub orders_processed: Option<Value>,
}

/// Syncs current prices for all symbols with pending orders
pub struct PriceSyncService {
    store: Arc<dyn PriceStore>,
    quotes: Arc<dyn QuoteProvider>,
}

impl PriceSyncService {
    /// Create a new price sync service
    pub fn new(store: Arc<dyn PriceStore>, quotes: Arc<dyn QuoteProvider>) -> Self {
        Self { store, quotes }
    }

    /// Create a service with the store and quote client described by the configuration
    pub async fn with_config(config: &PriceSyncConfig) -> Result<Self> {
        let store = create_store(config).await?;
        let quotes: Arc<dyn QuoteProvider> = Arc::new(ItickClient::new(config)?);

        Ok(Self::new(store, quotes))
    }

    /// Run one sync pass.
    ///
    /// Only a failure to read pending orders is returned as an error. Failures
    /// for individual symbols, and of order processing, are logged and leave
    /// the symbol out of the report.
    pub async fn sync_prices(&self) -> Result<SyncReport> {
        let orders = self.store.fetch_pending_orders().await?;
        let symbols = unique_symbols(&orders);

        info!(
            "Syncing prices for {} symbols from {} pending orders",
            symbols.len(),
            orders.len()
        );

        let mut prices_updated = Vec::with_capacity(symbols.len());
        for symbol in &symbols {
            if let Some(update) = self.sync_symbol(symbol).await {
                prices_updated.push(update);
            }
        }

        let mut orders_processed = None;
        if !prices_updated.is_empty() {
            match self.store.process_pending_orders().await {
                Ok(result) => orders_processed = Some(result),
                Err(e) => error!("Error processing orders: {}", e),
            }
        }

        info!(
            "Price sync finished: {}/{} prices updated",
            prices_updated.len(),
            symbols.len()
        );

        Ok(SyncReport {
            prices_updated,
            orders_processed,
        })
    }

    /// Fetch and persist the price of one symbol
    async fn sync_symbol(&self, symbol: &str) -> Option<PriceUpdate> {
        let classification = MarketClassification::from_symbol(symbol);
        debug!(
            "Classified {} as {} ({})",
            symbol, classification.market_type, classification.region
        );

        let quote = match self.quotes.fetch_quote(symbol, &classification).await {
            Ok(quote) => quote,
            Err(e) => {
                warn!("Error fetching price for {}: {}", symbol, e);
                return None;
            }
        };

        let price = match quote.price() {
            Ok(Some(price)) => price,
            Ok(None) => {
                debug!("No price in quote for {}", symbol);
                return None;
            }
            Err(e) => {
                warn!("Malformed price for {}: {}", symbol, e);
                return None;
            }
        };

        if let Err(e) = self.store.update_price(symbol, price).await {
            error!("Error updating price for {}: {}", symbol, e);
            return None;
        }

        debug!("Updated {} to {}", symbol, price);

        Some(PriceUpdate {
            symbol: symbol.to_string(),
            price,
            market_type: classification.market_type,
        })
    }
}

/// Distinct symbols of the given orders, in first-seen order
pub fn unique_symbols(orders: &[PendingOrder]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(orders.len());
    let mut symbols = Vec::new();
    for order in orders {
        if seen.insert(order.symbol.as_str()) {
            symbols.push(order.symbol.clone());
        }
    }
    symbols
}
