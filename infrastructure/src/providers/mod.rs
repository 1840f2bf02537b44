//! Provider adapters
//!
//! One [`ProviderAdapter`] per backend, dispatched by [`RoutingGateway`].
//! Each adapter owns its provider's wire format: history roles, where the
//! system instruction goes, and how the reply is extracted.

pub mod credentials;
pub mod gemini;
pub mod openai;
pub mod routing;

pub use credentials::Credential;
pub use gemini::{GeminiAdapter, SystemInstructionMode};
pub use openai::OpenAiAdapter;
pub use routing::RoutingGateway;

use arena_application::GatewayError;
use arena_domain::{ConverseRequest, ProviderKind};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;
    /// Model identifier sent to the provider
    fn model(&self) -> &str;
    fn credential(&self) -> &Credential;
    async fn converse(&self, request: &ConverseRequest) -> Result<String, GatewayError>;
}

/// Build an HTTP client with a whole-request timeout.
pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| GatewayError::Connection(e.to_string()))
}

/// POST a JSON body and decode a JSON response.
///
/// Non-2xx statuses become [`GatewayError::Upstream`] carrying the raw body.
pub(crate) async fn post_json<B, R>(
    request: reqwest::RequestBuilder,
    body: &B,
) -> Result<R, GatewayError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = request.json(body).send().await.map_err(transport_error)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<R>()
        .await
        .map_err(|e| GatewayError::InvalidResponse(e.without_url().to_string()))
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Connection(e.without_url().to_string())
    }
}
