//! Route handlers.

use super::AppState;
use super::error::ApiError;
use super::types::{ChatRequest, ChatResponse, HealthResponse, ProbeResponse, ProviderStatus};
use arena_domain::ProviderKind;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// POST /chat
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let output = state.relay.execute(body.into_input()).await?;
    Ok(Json(ChatResponse {
        reply: output.reply,
    }))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let providers = ProviderKind::ALL
        .iter()
        .map(|kind| ProviderStatus {
            name: kind.to_string(),
            model: state.gateway.model_name(*kind),
        })
        .collect();

    Json(HealthResponse {
        status: "ok".into(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        providers,
    })
}

/// GET /probe/{provider}
pub async fn probe(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Response, ApiError> {
    let provider: ProviderKind = provider
        .parse()
        .map_err(|e: arena_domain::DomainError| ApiError::bad_request(e.to_string()))?;

    let response = match state.probe.execute(provider).await {
        Ok(report) => Json(ProbeResponse {
            status: "Success".into(),
            provider: report.provider.to_string(),
            model: report.model,
            reply: report.reply,
        })
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "Error",
                "message": e.to_string(),
                "details": format!("{:?}", e),
            })),
        )
            .into_response(),
    };
    Ok(response)
}
