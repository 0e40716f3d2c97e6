//! Market classification derived from instrument symbols

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Kind of market an instrument trades on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    Stock,
    Crypto,
    Forex,
    Indices,
}

impl MarketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketType::Stock => "stock",
            MarketType::Crypto => "crypto",
            MarketType::Forex => "forex",
            MarketType::Indices => "indices",
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quote provider region code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// United States equities
    Us,
    /// Crypto exchange aggregate
    Ba,
    /// Global forex and index feeds
    Gb,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Ba => "ba",
            Region::Gb => "gb",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market type and region inferred from a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct MarketClassification {
    pub market_type: MarketType,
    pub region: Region,
}

impl MarketClassification {
    /// Classify a symbol by its format.
    ///
    /// Rules are checked in order and the first match wins:
    /// - contains `USD` or ends with `USDT`: crypto on `ba`
    /// - contains `/`: forex on `gb`
    /// - starts with `^`: indices on `gb`
    /// - anything else: stock on `us`
    pub fn from_symbol(symbol: &str) -> Self {
        if symbol.contains("USD") || symbol.ends_with("USDT") {
            Self { market_type: MarketType::Crypto, region: Region::Ba }
        } else if symbol.contains('/') {
            Self { market_type: MarketType::Forex, region: Region::Gb }
        } else if symbol.starts_with('^') {
            Self { market_type: MarketType::Indices, region: Region::Gb }
        } else {
            Self { market_type: MarketType::Stock, region: Region::Us }
        }
    }

    /// Path segment of the quote endpoint for this market
    pub fn endpoint(&self) -> &'static str {
        match self.market_type {
            MarketType::Stock => "stock",
            other => other.as_str(),
        }
    }
}
