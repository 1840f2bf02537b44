//! Participant slots and their provider assignment

use crate::core::provider::ProviderKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two logical participant roles in a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    A,
    B,
}

impl Slot {
    /// The opposing slot
    pub fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::A => write!(f, "A"),
            Slot::B => write!(f, "B"),
        }
    }
}

/// Which provider plays slot A and which plays slot B
///
/// Both slots may be bound to the same provider kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantAssignment {
    pub a: ProviderKind,
    pub b: ProviderKind,
}

impl Default for ParticipantAssignment {
    fn default() -> Self {
        Self {
            a: ProviderKind::Gpt,
            b: ProviderKind::Gemini,
        }
    }
}

impl ParticipantAssignment {
    pub fn new(a: ProviderKind, b: ProviderKind) -> Self {
        Self { a, b }
    }

    pub fn provider_for(&self, slot: Slot) -> ProviderKind {
        match slot {
            Slot::A => self.a,
            Slot::B => self.b,
        }
    }

    pub fn assign(&mut self, slot: Slot, provider: ProviderKind) {
        match slot {
            Slot::A => self.a = provider,
            Slot::B => self.b = provider,
        }
    }
}
