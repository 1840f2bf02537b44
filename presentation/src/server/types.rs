//! Request and response bodies for the HTTP API.

use arena_application::RelayChatInput;
use arena_domain::{ChatMessage, MessageRole};
use serde::{Deserialize, Serialize};

/// One message as sent by the client. Only `"user"` is special; every
/// other role is treated as an earlier assistant reply.
#[derive(Debug, Clone, Deserialize)]
pub struct WireMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
}

/// `POST /chat` body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// `gpt` or `gemini`
    #[serde(default)]
    pub provider: Option<String>,
    /// Older name for `provider`; ignored when both are sent
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<WireMessage>>,
    #[serde(default)]
    pub is_battle: bool,
}

impl ChatRequest {
    pub fn into_input(self) -> RelayChatInput {
        let messages = self
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(|m| ChatMessage {
                role: MessageRole::from_wire(&m.role),
                content: m.content,
            })
            .collect();
        let provider = self.provider.or(self.model).unwrap_or_default();
        RelayChatInput::new(provider, messages).battle(self.is_battle)
    }
}

/// `POST /chat` success body
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub name: String,
    pub model: Option<String>,
}

/// `GET /health` body
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is running.
    pub status: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
    pub providers: Vec<ProviderStatus>,
}

/// `GET /probe/{provider}` success body
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResponse {
    pub status: String,
    pub provider: String,
    pub model: Option<String>,
    pub reply: String,
}
