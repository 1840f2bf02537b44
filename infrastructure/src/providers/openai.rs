//! OpenAI chat completions adapter
//!
//! The system instruction goes in as a leading `system` message; history
//! roles pass through unchanged.

use super::{Credential, ProviderAdapter, http_client, post_json};
use crate::config::FileOpenAiConfig;
use arena_application::GatewayError;
use arena_domain::{ConverseRequest, MessageRole, ProviderKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct OpenAiAdapter {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
    credential: Credential,
}

impl OpenAiAdapter {
    pub fn new(config: &FileOpenAiConfig) -> Result<Self, GatewayError> {
        let adapter = Self {
            client: http_client(config.timeout_secs)?,
            endpoint: format!(
                "{}/v1/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            credential: Credential::new(&config.api_key_env, config.api_key.clone()),
        };
        info!(model = %adapter.model, "OpenAI provider initialized");
        Ok(adapter)
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gpt
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn credential(&self) -> &Credential {
        &self.credential
    }

    async fn converse(&self, request: &ConverseRequest) -> Result<String, GatewayError> {
        let api_key = self.credential.resolve()?;
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: build_messages(request),
            max_tokens: self.max_tokens,
        };

        debug!(
            model = %self.model,
            messages = body.messages.len(),
            "Sending OpenAI chat completion"
        );

        let response: ChatCompletionResponse =
            post_json(self.client.post(&self.endpoint).bearer_auth(api_key), &body).await?;

        extract_reply(response).ok_or(GatewayError::EmptyReply(ProviderKind::Gpt))
    }
}

fn wire_role(role: MessageRole) -> &'static str {
    match role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    }
}

fn build_messages(request: &ConverseRequest) -> Vec<WireMessage> {
    let mut messages = Vec::with_capacity(request.history.len() + 2);
    if let Some(instruction) = &request.system_instruction {
        messages.push(WireMessage {
            role: "system",
            content: instruction.clone(),
        });
    }
    messages.extend(request.history.iter().map(|m| WireMessage {
        role: wire_role(m.role),
        content: m.content.clone(),
    }));
    messages.push(WireMessage {
        role: "user",
        content: request.prompt.clone(),
    });
    messages
}

fn extract_reply(response: ChatCompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
}
