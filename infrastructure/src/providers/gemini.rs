//! Google Gemini `generateContent` adapter
//!
//! Gemini wants strictly alternating `user`/`model` contents, so adjacent
//! entries with the same role are merged. The system instruction is sent
//! either in the native `systemInstruction` field or glued in front of the
//! prompt text.

use super::{Credential, ProviderAdapter, http_client, post_json};
use crate::config::FileGeminiConfig;
use arena_application::GatewayError;
use arena_domain::{BattlePrompt, ConverseRequest, MessageRole, ProviderKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};

/// Where the system instruction is placed in a Gemini request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemInstructionMode {
    /// `systemInstruction` request field
    #[default]
    Native,
    /// Prepended to the prompt text
    Inline,
}

impl SystemInstructionMode {
    pub const VALID_VALUES: [&'static str; 2] = ["native", "inline"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SystemInstructionMode::Native => "native",
            SystemInstructionMode::Inline => "inline",
        }
    }
}

impl FromStr for SystemInstructionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" => Ok(SystemInstructionMode::Native),
            "inline" => Ok(SystemInstructionMode::Inline),
            other => Err(format!("unknown system instruction mode: {}", other)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl Content {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

pub struct GeminiAdapter {
    client: reqwest::Client,
    base_url: String,
    model: String,
    max_tokens: u32,
    instruction_mode: SystemInstructionMode,
    credential: Credential,
}

impl GeminiAdapter {
    pub fn new(config: &FileGeminiConfig) -> Result<Self, GatewayError> {
        let (instruction_mode, _) = config.parse_system_instruction_mode();
        let adapter = Self {
            client: http_client(config.timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            instruction_mode,
            credential: Credential::new(&config.api_key_env, config.api_key.clone()),
        };
        info!(
            model = %adapter.model,
            instruction_mode = adapter.instruction_mode.as_str(),
            "Gemini provider initialized"
        );
        Ok(adapter)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn credential(&self) -> &Credential {
        &self.credential
    }

    async fn converse(&self, request: &ConverseRequest) -> Result<String, GatewayError> {
        let api_key = self.credential.resolve()?;
        let body = build_request(request, self.instruction_mode, self.max_tokens);

        debug!(
            model = %self.model,
            contents = body.contents.len(),
            system_instruction = body.system_instruction.is_some(),
            "Sending Gemini generateContent"
        );

        let response: GenerateContentResponse = post_json(
            self.client
                .post(self.endpoint())
                .header("x-goog-api-key", api_key),
            &body,
        )
        .await?;

        extract_reply(response).ok_or(GatewayError::EmptyReply(ProviderKind::Gemini))
    }
}

fn wire_role(role: MessageRole) -> &'static str {
    match role {
        MessageRole::Assistant => "model",
        MessageRole::User | MessageRole::System => "user",
    }
}

fn build_request(
    request: &ConverseRequest,
    mode: SystemInstructionMode,
    max_tokens: u32,
) -> GenerateContentRequest {
    let (prompt, system_instruction) = match (&request.system_instruction, mode) {
        (Some(instruction), SystemInstructionMode::Inline) => {
            (BattlePrompt::inline(instruction, &request.prompt), None)
        }
        (Some(instruction), SystemInstructionMode::Native) => (
            request.prompt.clone(),
            Some(Content::text(None, instruction.clone())),
        ),
        (None, _) => (request.prompt.clone(), None),
    };

    let contents = request
        .history
        .iter()
        .map(|m| Content::text(Some(wire_role(m.role)), m.content.clone()))
        .chain(std::iter::once(Content::text(Some("user"), prompt)));

    GenerateContentRequest {
        contents: merge_same_role(contents),
        system_instruction,
        generation_config: GenerationConfig {
            max_output_tokens: max_tokens,
        },
    }
}

/// Fold adjacent contents with the same role into one multi-part content.
fn merge_same_role(contents: impl IntoIterator<Item = Content>) -> Vec<Content> {
    let mut merged: Vec<Content> = Vec::new();
    for content in contents {
        match merged.last_mut() {
            Some(last) if last.role == content.role => last.parts.extend(content.parts),
            _ => merged.push(content),
        }
    }
    merged
}

fn extract_reply(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().map(|p| p.text).collect();
    (!text.trim().is_empty()).then_some(text)
}
