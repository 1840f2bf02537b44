//! Chat Gateway port
//!
//! Defines the interface for sending one conversational turn to a provider.

use arena_domain::{ConverseRequest, ProviderKind};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing credential: environment variable {env_var} is not set")]
    MissingCredential { env_var: String },

    #[error("Provider not available: {0}")]
    ProviderUnavailable(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout")]
    Timeout,

    #[error("Upstream error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No response from {0}")]
    EmptyReply(ProviderKind),
}

impl GatewayError {
    /// Configuration problems (e.g. a missing API key) rather than a
    /// provider misbehaving.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GatewayError::MissingCredential { .. } | GatewayError::ProviderUnavailable(_)
        )
    }
}

/// Gateway for provider communication
///
/// The application layer calls providers only through this port.
/// Implementations (adapters) live in the infrastructure layer; each
/// provider's history and system-instruction quirks stay behind it.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send `request` to `provider` and return the reply text.
    ///
    /// Never retries. An empty reply is an error.
    async fn converse(
        &self,
        provider: ProviderKind,
        request: &ConverseRequest,
    ) -> Result<String, GatewayError>;

    /// Model name that `provider` is configured to use, if registered
    fn model_name(&self, provider: ProviderKind) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors() {
        let missing = GatewayError::MissingCredential {
            env_var: "OPENAI_API_KEY".to_string(),
        };
        assert!(missing.is_configuration());
        assert!(missing.to_string().contains("OPENAI_API_KEY"));
        assert!(!GatewayError::Timeout.is_configuration());
        assert!(!GatewayError::EmptyReply(ProviderKind::Gemini).is_configuration());
    }

    #[test]
    fn test_empty_reply_display() {
        let err = GatewayError::EmptyReply(ProviderKind::Gpt);
        assert_eq!(err.to_string(), "No response from gpt");
    }
}
