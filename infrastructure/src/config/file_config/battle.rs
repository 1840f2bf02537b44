//! Battle configuration from TOML (`[battle]` section)
//!
//! # Example
//!
//! ```toml
//! [battle]
//! slot_a = "gemini"
//! slot_b = "gpt"
//! pacing_secs = 15
//! max_turns = 20
//! ```

use arena_application::BattleConfig;
use arena_domain::{ConfigIssue, ConfigIssueCode, ParticipantAssignment, ProviderKind, Severity};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBattleConfig {
    /// Provider for slot A (speaks first)
    pub slot_a: String,
    /// Provider for slot B
    pub slot_b: String,
    /// Wait before each automatic battle call
    pub pacing_secs: u64,
    /// Stop after this many provider turns (unset: run until stopped)
    pub max_turns: Option<usize>,
    /// Override the built-in adversarial instruction
    pub system_instruction: Option<String>,
}

impl Default for FileBattleConfig {
    fn default() -> Self {
        let defaults = BattleConfig::default();
        Self {
            slot_a: defaults.participants.a.to_string(),
            slot_b: defaults.participants.b.to_string(),
            pacing_secs: defaults.pacing.as_secs(),
            max_turns: None,
            system_instruction: None,
        }
    }
}

impl FileBattleConfig {
    fn parse_slot(field: &str, value: &str, fallback: ProviderKind) -> (ProviderKind, Vec<ConfigIssue>) {
        match value.parse::<ProviderKind>() {
            Ok(provider) => (provider, vec![]),
            Err(_) => (
                fallback,
                vec![ConfigIssue {
                    severity: Severity::Error,
                    code: ConfigIssueCode::UnknownProvider {
                        field: format!("battle.{}", field),
                        value: value.to_string(),
                    },
                    message: format!(
                        "battle.{}: unknown provider '{}' (expected one of: {})",
                        field,
                        value,
                        ProviderKind::ALL
                            .iter()
                            .map(|p| p.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                }],
            ),
        }
    }

    /// Resolve the slot assignment, keeping the default for a slot that
    /// does not parse.
    pub fn parse_participants(&self) -> (ParticipantAssignment, Vec<ConfigIssue>) {
        let defaults = ParticipantAssignment::default();
        let (a, mut issues) = Self::parse_slot("slot_a", &self.slot_a, defaults.a);
        let (b, b_issues) = Self::parse_slot("slot_b", &self.slot_b, defaults.b);
        issues.extend(b_issues);

        if issues.is_empty() && a == b {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::SameProviderBothSlots,
                message: format!(
                    "battle: both slots use '{}'; untagged turns will always be attributed to slot A",
                    a
                ),
            });
        }

        (ParticipantAssignment::new(a, b), issues)
    }

    pub fn to_battle_config(&self) -> (BattleConfig, Vec<ConfigIssue>) {
        let (participants, mut issues) = self.parse_participants();

        if self.pacing_secs == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::OutOfRange {
                    field: "battle.pacing_secs".to_string(),
                },
                message: "battle.pacing_secs: 0 disables pacing; provider rate limits may be hit"
                    .to_string(),
            });
        }
        if self.max_turns == Some(0) {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::OutOfRange {
                    field: "battle.max_turns".to_string(),
                },
                message: "battle.max_turns: must be at least 1 when set".to_string(),
            });
        }

        let mut config = BattleConfig::default()
            .with_participants(participants)
            .with_pacing(Duration::from_secs(self.pacing_secs))
            .with_max_turns(self.max_turns);
        if let Some(instruction) = self
            .system_instruction
            .as_ref()
            .filter(|s| !s.trim().is_empty())
        {
            config = config.with_system_instruction(instruction.clone());
        }

        (config, issues)
    }
}
