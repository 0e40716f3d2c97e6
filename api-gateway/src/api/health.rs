//! Liveness endpoint

use axum::Json;

use crate::api::response::HealthResponse;

/// Report that the gateway is up
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Gateway is running", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
