//! In-memory store backend

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{json, Value};

use common::decimal::Price;
use common::error::{Error, Result};
use common::model::PendingOrder;

use super::PriceStore;

/// In-memory store for tests and local runs.
///
/// Failures can be injected per operation to exercise partial-failure paths.
#[derive(Default)]
pub struct InMemoryPriceStore {
    /// Pending orders returned by `fetch_pending_orders`
    pub orders: Vec<PendingOrder>,
    /// Current prices by symbol
    pub prices: DashMap<String, Price>,
    fetch_error: Option<String>,
    update_errors: DashMap<String, String>,
    process_error: Option<String>,
    process_result: Option<Value>,
    process_calls: AtomicUsize,
}

impl InMemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(mut self, orders: Vec<PendingOrder>) -> Self {
        self.orders = orders;
        self.orders.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        self
    }

    /// Make `fetch_pending_orders` fail with the given message
    pub fn fail_fetch(mut self, message: impl Into<String>) -> Self {
        self.fetch_error = Some(message.into());
        self
    }

    /// Make `update_price` fail for one symbol
    pub fn fail_update(self, symbol: impl Into<String>, message: impl Into<String>) -> Self {
        self.update_errors.insert(symbol.into(), message.into());
        self
    }

    /// Make `process_pending_orders` fail with the given message
    pub fn fail_process(mut self, message: impl Into<String>) -> Self {
        self.process_error = Some(message.into());
        self
    }

    /// Fixed result for `process_pending_orders`
    pub fn with_process_result(mut self, result: Value) -> Self {
        self.process_result = Some(result);
        self
    }

    /// Number of times `process_pending_orders` was called
    pub fn process_calls(&self) -> usize {
        self.process_calls.load(Ordering::SeqCst)
    }

    pub fn price(&self, symbol: &str) -> Option<Price> {
        self.prices.get(symbol).map(|p| *p)
    }
}

#[async_trait]
impl PriceStore for InMemoryPriceStore {
    async fn fetch_pending_orders(&self) -> Result<Vec<PendingOrder>> {
        if let Some(message) = &self.fetch_error {
            return Err(Error::Store(message.clone()));
        }
        Ok(self.orders.clone())
    }

    async fn update_price(&self, symbol: &str, price: Price) -> Result<()> {
        if let Some(message) = self.update_errors.get(symbol) {
            return Err(Error::Store(message.clone()));
        }
        self.prices.insert(symbol.to_string(), price);
        Ok(())
    }

    async fn process_pending_orders(&self) -> Result<Value> {
        self.process_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.process_error {
            return Err(Error::Store(message.clone()));
        }
        if let Some(result) = &self.process_result {
            return Ok(result.clone());
        }

        // Orders whose symbol has a known price are considered processed
        let processed = self.orders
            .iter()
            .filter(|order| self.prices.contains_key(&order.symbol))
            .count();
        Ok(json!({ "processed": processed }))
    }
}
