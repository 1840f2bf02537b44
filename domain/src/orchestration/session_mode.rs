//! Session mode: manual chat or automatic battle.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How new turns are produced.
///
/// - `Manual`: each user message gets exactly one reply from slot A.
/// - `Battle`: the user sets a topic, then the two slots reply to each other
///   until stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    #[default]
    Manual,
    Battle,
}

impl SessionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionMode::Manual => "manual",
            SessionMode::Battle => "battle",
        }
    }

    /// Get a human-readable description of this mode
    pub fn description(&self) -> &'static str {
        match self {
            SessionMode::Manual => "Manual: slot A answers each message",
            SessionMode::Battle => "Battle: slots A and B argue about your topic",
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SessionMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" | "chat" => Ok(SessionMode::Manual),
            "battle" | "debate" => Ok(SessionMode::Battle),
            other => Err(DomainError::UnknownMode(other.to_string())),
        }
    }
}
