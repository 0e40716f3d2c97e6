//! Order models read from the transactions table

use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Order status values the sync filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Waiting for the market to reach the order's price
    Pending,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
        }
    }
}

/// A pending order row, reduced to the columns the sync reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct PendingOrder {
    /// Instrument symbol (e.g., "AAPL", "BTCUSDT", "EUR/USD")
    pub symbol: String,
    /// Order type (e.g., "buy_limit")
    #[serde(default)]
    pub order_type: Option<String>,
}

impl PendingOrder {
    pub fn new(symbol: impl Into<String>, order_type: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_type: Some(order_type.into()),
        }
    }
}
