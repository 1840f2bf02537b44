//! Provider configuration from TOML (`[providers]` section)
//!
//! # Example
//!
//! ```toml
//! [providers.openai]
//! model = "gpt-4o-mini"
//!
//! [providers.gemini]
//! api_key_env = "GEMINI_API_KEY"
//! system_instruction_mode = "inline"
//! ```

use crate::providers::SystemInstructionMode;
use arena_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// OpenAI API provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the OpenAI API.
    pub base_url: String,
    /// Chat model identifier.
    pub model: String,
    /// Max tokens per reply.
    pub max_tokens: u32,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 1024,
            timeout_secs: 60,
        }
    }
}

/// Google Gemini API provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GOOGLE_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the Generative Language API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Max output tokens per reply.
    pub max_tokens: u32,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// "native" (systemInstruction field) or "inline" (prefixed to the prompt).
    pub system_instruction_mode: String,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.0-flash".to_string(),
            max_tokens: 1024,
            timeout_secs: 60,
            system_instruction_mode: SystemInstructionMode::default().as_str().to_string(),
        }
    }
}

impl FileGeminiConfig {
    /// Parse `system_instruction_mode`, falling back to native on bad input.
    pub fn parse_system_instruction_mode(&self) -> (SystemInstructionMode, Vec<ConfigIssue>) {
        match self.system_instruction_mode.parse() {
            Ok(mode) => (mode, vec![]),
            Err(_) => (
                SystemInstructionMode::default(),
                vec![ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "providers.gemini.system_instruction_mode".to_string(),
                        value: self.system_instruction_mode.clone(),
                        valid_values: SystemInstructionMode::VALID_VALUES
                            .iter()
                            .map(|v| v.to_string())
                            .collect(),
                    },
                    message: format!(
                        "providers.gemini.system_instruction_mode: unknown value '{}', falling back to 'native'",
                        self.system_instruction_mode
                    ),
                }],
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openai: FileOpenAiConfig,
    pub gemini: FileGeminiConfig,
}

impl FileProvidersConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.gemini.parse_system_instruction_mode().1;
        for (field, timeout) in [
            ("providers.openai.timeout_secs", self.openai.timeout_secs),
            ("providers.gemini.timeout_secs", self.gemini.timeout_secs),
        ] {
            if timeout == 0 {
                issues.push(ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::OutOfRange {
                        field: field.to_string(),
                    },
                    message: format!("{}: must be greater than zero", field),
                });
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_hosted_apis() {
        let config = FileProvidersConfig::default();
        assert_eq!(config.openai.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
        assert_eq!(config.gemini.api_key_env, "GOOGLE_API_KEY");
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_unknown_instruction_mode_falls_back() {
        let config = FileGeminiConfig {
            system_instruction_mode: "prepend".to_string(),
            ..FileGeminiConfig::default()
        };
        let (mode, issues) = config.parse_system_instruction_mode();
        assert_eq!(mode, SystemInstructionMode::Native);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = FileProvidersConfig::default();
        config.openai.timeout_secs = 0;
        let issues = config.validate();
        assert!(ConfigIssue::has_errors(&issues));
    }
}
