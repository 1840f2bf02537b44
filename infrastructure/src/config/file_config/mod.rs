//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Values are kept as strings where a typo should produce a config issue
//! instead of a parse failure.

mod battle;
mod providers;
mod server;

pub use battle::FileBattleConfig;
pub use providers::{FileGeminiConfig, FileOpenAiConfig, FileProvidersConfig};
pub use server::FileServerConfig;

use arena_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider endpoints and credentials
    pub providers: FileProvidersConfig,
    /// Battle participants and pacing
    pub battle: FileBattleConfig,
    /// HTTP server bind address
    pub server: FileServerConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.providers.validate());
        issues.extend(self.battle.to_battle_config().1);
        issues.extend(self.server.validate());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_domain::ProviderKind;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[providers.openai]
model = "gpt-4o-mini"
max_tokens = 512

[providers.gemini]
api_key_env = "GEMINI_API_KEY"
system_instruction_mode = "inline"

[battle]
slot_a = "gemini"
slot_b = "gpt"
pacing_secs = 15

[server]
port = 8080
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.openai.model, "gpt-4o-mini");
        assert_eq!(config.providers.openai.max_tokens, 512);
        assert_eq!(config.providers.gemini.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.providers.gemini.system_instruction_mode, "inline");
        assert_eq!(config.battle.pacing_secs, 15);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");

        let (battle, issues) = config.battle.to_battle_config();
        assert!(issues.is_empty());
        assert_eq!(battle.participants.a, ProviderKind::Gemini);
        assert_eq!(battle.participants.b, ProviderKind::Gpt);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[battle]\nmax_turns = 4\n").unwrap();
        assert_eq!(config.battle.max_turns, Some(4));
        assert_eq!(config.providers, FileProvidersConfig::default());
        assert_eq!(config.server, FileServerConfig::default());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_sections() {
        let mut config = FileConfig::default();
        config.server.port = 0;
        config.battle.slot_a = "llama".to_string();
        config.providers.gemini.system_instruction_mode = "shout".to_string();

        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(ConfigIssue::has_errors(&issues));
    }
}
