//! HTTP relay server
//!
//! Stateless: every request carries its full conversation and is handled
//! independently.

mod error;
mod handlers;
pub mod types;

pub use error::ApiError;

use arena_application::{ChatGateway, ProbeProviderUseCase, RelayChatUseCase};
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: RelayChatUseCase,
    pub probe: ProbeProviderUseCase,
    pub gateway: Arc<dyn ChatGateway>,
    /// When the server started.
    pub start_time: Instant,
}

/// The HTTP relay server.
pub struct ArenaServer {
    state: AppState,
}

impl ArenaServer {
    /// `battle_instruction` is attached to requests that set `isBattle`.
    pub fn new(gateway: Arc<dyn ChatGateway>, battle_instruction: impl Into<String>) -> Self {
        Self {
            state: AppState {
                relay: RelayChatUseCase::new(Arc::clone(&gateway), battle_instruction),
                probe: ProbeProviderUseCase::new(Arc::clone(&gateway)),
                gateway,
                start_time: Instant::now(),
            },
        }
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/chat", post(handlers::chat))
            .route("/health", get(handlers::health))
            .route("/probe/{provider}", get(handlers::probe))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind `address` and serve until Ctrl-C.
    pub async fn serve(self, address: &str) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(address).await?;
        info!(address = %listener.local_addr()?, "HTTP relay listening");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_application::GatewayError;
    use arena_domain::{BattlePrompt, ConverseRequest, ProviderKind};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Mutex;
    use tower::ServiceExt;

    struct RecordingGateway {
        reply: Result<String, String>,
        calls: Mutex<Vec<(ProviderKind, ConverseRequest)>>,
    }

    impl RecordingGateway {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(ProviderKind, ConverseRequest)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatGateway for RecordingGateway {
        async fn converse(
            &self,
            provider: ProviderKind,
            request: &ConverseRequest,
        ) -> Result<String, GatewayError> {
            self.calls.lock().unwrap().push((provider, request.clone()));
            self.reply
                .clone()
                .map_err(|body| GatewayError::Upstream { status: 503, body })
        }

        fn model_name(&self, provider: ProviderKind) -> Option<String> {
            Some(format!("test-{}", provider))
        }
    }

    fn router(gateway: &Arc<RecordingGateway>) -> Router {
        ArenaServer::new(gateway.clone(), BattlePrompt::system_instruction()).router()
    }

    fn post_chat(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), 100_000)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_chat_returns_reply() {
        let gateway = RecordingGateway::replying("Hello back");
        let resp = router(&gateway)
            .oneshot(post_chat(
                r#"{"provider":"gpt","messages":[{"role":"user","content":"Hello"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["reply"], "Hello back");

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, ProviderKind::Gpt);
        assert_eq!(calls[0].1.prompt, "Hello");
        assert!(calls[0].1.system_instruction.is_none());
    }

    #[tokio::test]
    async fn test_provider_and_model_both_sent_prefers_provider() {
        let gateway = RecordingGateway::replying("hi");
        let resp = router(&gateway)
            .oneshot(post_chat(
                r#"{"provider":"gemini","model":"gpt","messages":[{"role":"user","content":"Hello"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(gateway.calls()[0].0, ProviderKind::Gemini);
    }

    #[tokio::test]
    async fn test_empty_messages_is_bad_request_without_call() {
        let gateway = RecordingGateway::replying("unused");
        let resp = router(&gateway)
            .oneshot(post_chat(r#"{"provider":"gpt","messages":[]}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["error"], "No messages provided");
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_messages_is_bad_request() {
        let gateway = RecordingGateway::replying("unused");
        let resp = router(&gateway)
            .oneshot(post_chat(r#"{"model":"gemini"}"#))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_provider_is_bad_request() {
        let gateway = RecordingGateway::replying("unused");
        let resp = router(&gateway)
            .oneshot(post_chat(
                r#"{"model":"claude","messages":[{"role":"user","content":"hi"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(resp).await["error"],
            "Invalid provider specified: claude"
        );
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let gateway = RecordingGateway::replying("unused");
        let resp = router(&gateway).oneshot(post_chat("{not json")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_gateway_failure_is_internal_error_with_details() {
        let gateway = RecordingGateway::failing("overloaded");
        let resp = router(&gateway)
            .oneshot(post_chat(
                r#"{"provider":"gemini","messages":[{"role":"user","content":"hi"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(resp).await;
        assert_eq!(body["error"], "Upstream error (status 503): overloaded");
        assert!(body["details"].as_str().unwrap().contains("Upstream"));
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_battle_flag_attaches_instruction() {
        let gateway = RecordingGateway::replying("rebuttal");
        let resp = router(&gateway)
            .oneshot(post_chat(
                r#"{"provider":"gemini","isBattle":true,"messages":[
                    {"role":"user","content":"Topic?"},
                    {"role":"gpt","content":"claim a"}
                ]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let (_, request) = &gateway.calls()[0];
        assert_eq!(
            request.system_instruction.as_deref(),
            Some(BattlePrompt::system_instruction())
        );
        assert_eq!(request.prompt, "claim a");
    }

    #[tokio::test]
    async fn test_health_lists_providers() {
        let gateway = RecordingGateway::replying("unused");
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = router(&gateway).oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["providers"][0]["name"], "gpt");
        assert_eq!(body["providers"][1]["model"], "test-gemini");
    }

    #[tokio::test]
    async fn test_probe_success_and_unknown_provider() {
        let gateway = RecordingGateway::replying("I am working");
        let req = Request::builder()
            .uri("/probe/gemini")
            .body(Body::empty())
            .unwrap();
        let resp = router(&gateway).oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "Success");
        assert_eq!(body["model"], "test-gemini");
        assert_eq!(body["reply"], "I am working");
        assert_eq!(gateway.calls()[0].1.prompt, "Hello, are you working?");

        let req = Request::builder()
            .uri("/probe/claude")
            .body(Body::empty())
            .unwrap();
        let resp = router(&gateway).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_probe_failure_reports_error() {
        let gateway = RecordingGateway::failing("bad key");
        let req = Request::builder()
            .uri("/probe/gpt")
            .body(Body::empty())
            .unwrap();
        let resp = router(&gateway).oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "Error");
        assert!(body["message"].as_str().unwrap().contains("bad key"));
    }
}
