//! Response bodies returned by the gateway

use axum::response::{IntoResponse, Response};
use axum::Json;
use common::model::PriceUpdate;
use price_sync::SyncReport;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Body of a successful sync
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SyncResponse {
    /// Always `true`
    pub success: bool,
    /// Prices written during this sync
    pub prices_updated: Vec<PriceUpdate>,
    /// Result of order processing, `null` when it did not run or failed
    #[schema(value_type = Option<Object>)]
    pub orders_processed: Option<Value>,
}

impl From<SyncReport> for SyncResponse {
    fn from(report: SyncReport) -> Self {
        Self {
            success: true,
            prices_updated: report.prices_updated,
            orders_processed: report.orders_processed,
        }
    }
}

impl IntoResponse for SyncResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Body of a failed sync
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Health check body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
