//! Price update records reported back to the invoker

use serde::{Deserialize, Serialize};

use crate::decimal::Price;
use crate::model::market::MarketType;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// A price written to the store during a sync pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct PriceUpdate {
    /// Instrument symbol
    pub symbol: String,
    /// Price written to the store
    #[serde(with = "rust_decimal::serde::float")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub price: Price,
    /// Market the quote was fetched from
    #[serde(rename = "marketType")]
    pub market_type: MarketType,
}
