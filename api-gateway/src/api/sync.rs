//! Price sync handler

use std::sync::Arc;

use axum::extract::State;
use tracing::info;

use crate::api::response::SyncResponse;
use crate::error::ApiError;
use crate::AppState;

/// Sync current prices for all symbols with pending orders.
///
/// Mounted for every HTTP method on `/` and `/fetch_market_prices`; the
/// request body is ignored.
#[utoipa::path(
    post,
    path = "/fetch_market_prices",
    responses(
        (status = 200, description = "Prices synced", body = SyncResponse),
        (status = 500, description = "Pending orders could not be read", body = crate::api::response::ErrorResponse)
    ),
    tag = "sync"
)]
pub async fn fetch_market_prices(
    State(state): State<Arc<AppState>>,
) -> Result<SyncResponse, ApiError> {
    info!("Price sync requested");
    let report = state.price_sync.sync_prices().await?;
    Ok(SyncResponse::from(report))
}
