//! Probe Provider use case.
//!
//! Sends a fixed greeting to one provider to check that its credential,
//! model and endpoint work end to end.

use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use arena_domain::{BattlePrompt, ConverseRequest, ProviderKind};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of a successful probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub provider: ProviderKind,
    /// Model identifier the gateway used, when it knows one
    pub model: Option<String>,
    pub reply: String,
}

#[derive(Clone)]
pub struct ProbeProviderUseCase {
    gateway: Arc<dyn ChatGateway>,
}

impl ProbeProviderUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, provider: ProviderKind) -> Result<ProbeReport, GatewayError> {
        info!(provider = %provider, "Probing provider");
        let request = ConverseRequest::new(BattlePrompt::probe());

        let reply = self
            .gateway
            .converse(provider, &request)
            .await
            .inspect_err(|e| warn!(provider = %provider, "Probe failed: {}", e))?;

        Ok(ProbeReport {
            provider,
            model: self.gateway.model_name(provider),
            reply,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockGateway;

    #[tokio::test]
    async fn test_probe_sends_greeting() {
        let gateway = Arc::new(MockGateway::with_responses(vec![Ok("Yes!".to_string())]));
        let probe = ProbeProviderUseCase::new(gateway.clone());

        let report = probe.execute(ProviderKind::Gemini).await.unwrap();

        assert_eq!(report.reply, "Yes!");
        assert_eq!(report.model.as_deref(), Some("mock-gemini"));
        let (provider, request) = &gateway.calls()[0];
        assert_eq!(*provider, ProviderKind::Gemini);
        assert_eq!(request.prompt, "Hello, are you working?");
        assert!(request.history.is_empty());
        assert!(request.system_instruction.is_none());
    }

    #[tokio::test]
    async fn test_probe_surfaces_gateway_error() {
        let gateway = Arc::new(MockGateway::with_responses(vec![Err(
            GatewayError::MissingCredential {
                env_var: "GOOGLE_API_KEY".to_string(),
            },
        )]));
        let probe = ProbeProviderUseCase::new(gateway);

        let err = probe.execute(ProviderKind::Gemini).await.unwrap_err();
        assert!(err.is_configuration());
    }
}
