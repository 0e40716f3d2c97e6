//! Error handling for the API gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::api::response::ErrorResponse;

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Common(#[from] common::error::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Generate a request ID for tracking errors
        let request_id = Uuid::new_v4().to_string();

        // Log the error with request ID for backend tracing
        tracing::error!("API Error [{}]: {:?}", request_id, &self);

        let error_response = ErrorResponse::new(self.to_string());

        (StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)).into_response()
    }
}
