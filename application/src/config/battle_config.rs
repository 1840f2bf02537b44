//! Battle configuration: who plays, how fast, and what they are told.

use arena_domain::{BattlePrompt, ParticipantAssignment};
use std::time::Duration;

/// Default wait before each automatic battle call.
///
/// Sized for the free tier of the stricter provider.
pub const DEFAULT_PACING: Duration = Duration::from_secs(10);

/// Static settings handed to the turn orchestrator at startup.
#[derive(Debug, Clone)]
pub struct BattleConfig {
    /// Initial slot assignment (mutable later through the store)
    pub participants: ParticipantAssignment,
    /// Fixed delay before every automatic battle call
    pub pacing: Duration,
    /// Stop the battle after this many provider turns
    pub max_turns: Option<usize>,
    /// Adversarial instruction attached to battle turns
    pub system_instruction: String,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            participants: ParticipantAssignment::default(),
            pacing: DEFAULT_PACING,
            max_turns: None,
            system_instruction: BattlePrompt::system_instruction().to_string(),
        }
    }
}

impl BattleConfig {
    pub fn with_participants(mut self, participants: ParticipantAssignment) -> Self {
        self.participants = participants;
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_max_turns(mut self, max_turns: Option<usize>) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }
}
