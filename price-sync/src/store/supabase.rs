//! Supabase (PostgREST) store backend

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use common::decimal::Price;
use common::error::{Error, Result};
use common::model::{OrderStatus, PendingOrder};

use super::{PriceStore, PROCESS_PENDING_ORDERS, UPDATE_CURRENT_PRICE};
use crate::config::PriceSyncConfig;

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

/// Parameters of `update_current_price`
#[derive(Debug, Serialize)]
struct UpdatePriceParams<'a> {
    p_symbol: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    p_price: Price,
}

/// Store backend talking to the Supabase REST API with the service role key
pub struct SupabasePriceStore {
    client: Client,
    rest_url: String,
    service_key: String,
}

impl SupabasePriceStore {
    pub fn new(config: &PriceSyncConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("price-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::ConfigurationError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &PriceSyncConfig) -> Self {
        Self {
            client,
            rest_url: format!("{}/rest/v1", config.supabase_url.trim_end_matches('/')),
            service_key: config.supabase_service_role_key.clone(),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn rpc<P>(&self, procedure: &str, params: &P) -> Result<Value>
    where
        P: Serialize + Sync + ?Sized,
    {
        let url = format!("{}/rpc/{}", self.rest_url, procedure);
        debug!("Calling store procedure {}", procedure);

        let response = self.authorized(self.client.post(&url))
            .json(params)
            .send()
            .await?;

        let body = check_status(response).await?.bytes().await?;
        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Turn a non-success response into a store error carrying PostgREST's message
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await?;
    let message = match serde_json::from_slice::<PostgrestError>(&body) {
        Ok(PostgrestError { message: Some(message), code }) => {
            debug!("Store error {}: {}", code.as_deref().unwrap_or("-"), message);
            message
        }
        _ => format!("store request failed with HTTP {}", status),
    };
    Err(Error::Store(message))
}

#[async_trait]
impl PriceStore for SupabasePriceStore {
    async fn fetch_pending_orders(&self) -> Result<Vec<PendingOrder>> {
        let url = format!("{}/transactions", self.rest_url);
        let status_filter = format!("eq.{}", OrderStatus::Pending.as_str());

        let response = self.authorized(self.client.get(&url))
            .query(&[
                ("select", "symbol,order_type"),
                ("status", status_filter.as_str()),
                ("order", "symbol.asc"),
            ])
            .send()
            .await?;

        let body = check_status(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn update_price(&self, symbol: &str, price: Price) -> Result<()> {
        let params = UpdatePriceParams { p_symbol: symbol, p_price: price };
        self.rpc(UPDATE_CURRENT_PRICE, &params).await?;
        Ok(())
    }

    async fn process_pending_orders(&self) -> Result<Value> {
        self.rpc(PROCESS_PENDING_ORDERS, &json!({})).await
    }
}

