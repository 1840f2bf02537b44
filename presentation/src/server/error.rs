//! HTTP error responses.

use arena_application::{GatewayError, RelayChatError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Error returned by API handlers
#[derive(Debug)]
pub enum ApiError {
    /// 400 `{ error }`; no provider was contacted
    BadRequest(String),
    /// 500 `{ error, details }`
    Upstream { message: String, details: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        ApiError::Upstream {
            message: error.to_string(),
            details: format!("{:?}", error),
        }
    }
}

impl From<RelayChatError> for ApiError {
    fn from(error: RelayChatError) -> Self {
        match error {
            RelayChatError::InvalidRequest(message) => ApiError::BadRequest(message),
            RelayChatError::Upstream { source, .. } => source.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Upstream { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message, "details": details })),
            )
                .into_response(),
        }
    }
}
