//! Relay Chat use case.
//!
//! Stateless single-turn relay behind `POST /chat`: the caller supplies the
//! whole message list and a provider name, and gets back one reply.
//! Every request is independent; nothing is remembered between calls.

use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use arena_domain::{ChatMessage, ConverseRequest, ProviderKind};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while relaying a chat request.
#[derive(Error, Debug)]
pub enum RelayChatError {
    /// The request itself is unusable; no provider was contacted.
    #[error("{0}")]
    InvalidRequest(String),

    /// The provider call failed. Never retried.
    #[error("{source}")]
    Upstream {
        provider: ProviderKind,
        #[source]
        source: GatewayError,
    },
}

impl RelayChatError {
    /// True when the caller is at fault (maps to a 400-class response).
    pub fn is_client_error(&self) -> bool {
        matches!(self, RelayChatError::InvalidRequest(_))
    }
}

/// Input for the [`RelayChatUseCase`].
#[derive(Debug, Clone)]
pub struct RelayChatInput {
    /// Provider name as sent by the client (`gpt`, `gemini`, ...)
    pub provider: String,
    /// Full conversation; the last entry is the prompt
    pub messages: Vec<ChatMessage>,
    /// Attach the battle system instruction
    pub is_battle: bool,
}

impl RelayChatInput {
    pub fn new(provider: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            provider: provider.into(),
            messages,
            is_battle: false,
        }
    }

    pub fn battle(mut self, is_battle: bool) -> Self {
        self.is_battle = is_battle;
        self
    }
}

/// Output of a successful relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayChatOutput {
    pub provider: ProviderKind,
    pub reply: String,
}

/// Use case for relaying one chat request to a provider.
#[derive(Clone)]
pub struct RelayChatUseCase {
    gateway: Arc<dyn ChatGateway>,
    battle_instruction: String,
}

impl RelayChatUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>, battle_instruction: impl Into<String>) -> Self {
        Self {
            gateway,
            battle_instruction: battle_instruction.into(),
        }
    }

    /// Validate the request, then forward it to the selected provider.
    ///
    /// An empty message list is rejected before the provider name is even
    /// looked at.
    pub async fn execute(&self, input: RelayChatInput) -> Result<RelayChatOutput, RelayChatError> {
        let RelayChatInput {
            provider,
            messages,
            is_battle,
        } = input;

        let Some(request) = ConverseRequest::from_messages(messages) else {
            return Err(RelayChatError::InvalidRequest(
                "No messages provided".to_string(),
            ));
        };

        let provider: ProviderKind = provider
            .parse()
            .map_err(|e: arena_domain::DomainError| RelayChatError::InvalidRequest(e.to_string()))?;

        let request = if is_battle {
            request.with_system_instruction(self.battle_instruction.clone())
        } else {
            request
        };

        debug!(
            provider = %provider,
            history = request.history.len(),
            battle = is_battle,
            "Relaying chat request"
        );

        match self.gateway.converse(provider, &request).await {
            Ok(reply) => {
                info!(provider = %provider, reply_len = reply.len(), "Relay completed");
                Ok(RelayChatOutput { provider, reply })
            }
            Err(source) => {
                warn!(provider = %provider, "Relay failed: {}", source);
                Err(RelayChatError::Upstream { provider, source })
            }
        }
    }
}
