//! HTTP gateway exposing the price sync handler

pub mod api;
pub mod config;
pub mod error;

use std::sync::Arc;

use axum::{
    routing::{any, get},
    Router,
};
use price_sync::PriceSyncService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health::health, sync::fetch_market_prices};

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::sync::fetch_market_prices,
        api::health::health,
    ),
    components(
        schemas(
            api::response::SyncResponse,
            api::response::ErrorResponse,
            api::response::HealthResponse,
            common::model::PriceUpdate,
            common::model::MarketType,
        )
    ),
    tags(
        (name = "sync", description = "Market price sync"),
        (name = "health", description = "Liveness check")
    ),
    info(
        title = "Market Price Sync API",
        version = "1.0.0",
        description = "Fetches current prices for symbols with pending orders and triggers order processing"
    )
)]
pub struct ApiDoc;

/// App state shared across handlers
pub struct AppState {
    /// Price sync service
    pub price_sync: Arc<PriceSyncService>,
}

impl AppState {
    pub fn new(price_sync: PriceSyncService) -> Self {
        Self {
            price_sync: Arc::new(price_sync),
        }
    }
}

/// Build the application router
pub fn create_router(state: Arc<AppState>, log_level: Level) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_ui = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/", any(fetch_market_prices))
        .route("/fetch_market_prices", any(fetch_market_prices))
        .route("/health", get(health))
        .merge(swagger_ui)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(log_level))
                .on_request(DefaultOnRequest::new().level(log_level))
                .on_response(DefaultOnResponse::new().level(log_level)),
        )
        .with_state(state)
}
