//! Turn entity: one utterance in the transcript

use crate::core::error::DomainError;
use crate::core::provider::ProviderKind;
use crate::orchestration::participants::Slot;
use serde::{Deserialize, Serialize};

/// Who wrote a turn, in provider terms (the role it was produced under)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "provider")]
pub enum Author {
    User,
    Provider(ProviderKind),
}

/// Explicit sender tag attached to a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Slot(Slot),
}

/// A single immutable turn of the conversation (Entity)
///
/// `speaker` is `None` for legacy input that carries only an author role;
/// speaker selection then falls back to comparing providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    author: Author,
    speaker: Option<Speaker>,
    text: String,
}

impl Turn {
    /// A user-submitted turn. Rejects empty or whitespace-only text.
    pub fn user(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyTurn);
        }
        Ok(Self {
            author: Author::User,
            speaker: Some(Speaker::User),
            text,
        })
    }

    /// A provider reply spoken on behalf of `slot`
    pub fn from_slot(slot: Slot, provider: ProviderKind, text: impl Into<String>) -> Self {
        Self {
            author: Author::Provider(provider),
            speaker: Some(Speaker::Slot(slot)),
            text: text.into(),
        }
    }

    /// A turn without a sender tag
    pub fn untagged(author: Author, text: impl Into<String>) -> Self {
        Self {
            author,
            speaker: None,
            text: text.into(),
        }
    }

    pub fn author(&self) -> Author {
        self.author
    }

    pub fn speaker(&self) -> Option<Speaker> {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the user wrote this turn, by tag or by role
    pub fn is_from_user(&self) -> bool {
        self.author == Author::User || self.speaker == Some(Speaker::User)
    }

    /// The slot this turn was spoken for, if tagged with one
    pub fn slot(&self) -> Option<Slot> {
        match self.speaker {
            Some(Speaker::Slot(slot)) => Some(slot),
            _ => None,
        }
    }

    /// The provider that produced this turn, if any
    pub fn provider(&self) -> Option<ProviderKind> {
        match self.author {
            Author::Provider(kind) => Some(kind),
            Author::User => None,
        }
    }
}
