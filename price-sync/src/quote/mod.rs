//! Quote provider abstraction and price extraction

mod itick;

use async_trait::async_trait;
use serde_json::Value;

use common::decimal::{price_from_number, price_from_str, Price};
use common::error::{Error, Result};
use common::model::MarketClassification;

pub use itick::ItickClient;

/// Fields of a quote's `data` object that may carry the current price, in
/// order of preference: last done, price, close.
pub const PRICE_FIELDS: [&str; 3] = ["ld", "price", "c"];

/// Source of current market quotes
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the latest quote for a symbol on the classified market
    async fn fetch_quote(&self, symbol: &str, classification: &MarketClassification) -> Result<Quote>;
}

/// The `data` object of a successful quote response
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: String,
    pub data: Value,
}

impl Quote {
    pub fn new(symbol: impl Into<String>, data: Value) -> Self {
        Self {
            symbol: symbol.into(),
            data,
        }
    }

    /// Current price carried by the quote.
    ///
    /// Takes the first truthy field among [`PRICE_FIELDS`]. Returns `Ok(None)`
    /// when none is set (a zero price counts as unset) and an error when the
    /// chosen value is not numeric.
    pub fn price(&self) -> Result<Option<Price>> {
        let candidate = PRICE_FIELDS
            .iter()
            .filter_map(|field| self.data.get(field))
            .find(|value| is_truthy(value));

        match candidate {
            None => Ok(None),
            Some(Value::Number(number)) => price_from_number(number).map(Some),
            Some(Value::String(text)) => price_from_str(text).map(Some),
            Some(other) => Err(Error::DecimalError(format!(
                "unexpected price value for {}: {}",
                self.symbol, other
            ))),
        }
    }
}

/// Loose JSON truthiness: null, false, zero and the empty string are falsy
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
