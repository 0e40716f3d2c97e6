//! iTick quote API client

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use common::error::{Error, Result};
use common::model::MarketClassification;

use super::{is_truthy, Quote, QuoteProvider};
use crate::config::PriceSyncConfig;

/// Response envelope of the quote endpoint
#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(default)]
    code: Value,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Value,
}

impl QuoteEnvelope {
    fn is_success(&self) -> bool {
        self.code.as_f64() == Some(0.0)
    }
}

/// Client for the iTick REST quote API
pub struct ItickClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ItickClient {
    /// Create a new client. No request timeout is set.
    pub fn new(config: &PriceSyncConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("price-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::ConfigurationError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a client that shares an existing connection pool
    pub fn with_client(client: Client, config: &PriceSyncConfig) -> Self {
        Self {
            client,
            base_url: config.itick_base_url.trim_end_matches('/').to_string(),
            token: config.itick_api_key.clone(),
        }
    }

    /// Build the quote URL. The symbol goes into the query verbatim.
    pub fn quote_url(&self, symbol: &str, classification: &MarketClassification) -> String {
        format!(
            "{}/{}/quote?code={}&region={}",
            self.base_url,
            classification.endpoint(),
            symbol,
            classification.region
        )
    }
}

#[async_trait]
impl QuoteProvider for ItickClient {
    async fn fetch_quote(&self, symbol: &str, classification: &MarketClassification) -> Result<Quote> {
        let url = self.quote_url(symbol, classification);
        debug!("Fetching quote: {}", url);

        let response = self.client
            .get(&url)
            .header("token", &self.token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::QuoteProvider(format!(
                "HTTP {} for {}",
                status, symbol
            )));
        }

        let envelope: QuoteEnvelope = serde_json::from_slice(&response.bytes().await?)?;

        if !envelope.is_success() {
            return Err(Error::QuoteProvider(format!(
                "code {} for {}: {}",
                envelope.code,
                symbol,
                envelope.msg.as_deref().unwrap_or("no message")
            )));
        }

        if !is_truthy(&envelope.data) {
            return Err(Error::QuoteProvider(format!("no data for {}", symbol)));
        }

        Ok(Quote::new(symbol, envelope.data))
    }
}
