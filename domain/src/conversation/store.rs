//! Conversation store: single owner of the session's mutable state
//!
//! Every mutation goes through a named operation and reports what changed
//! as [`StoreEvent`]s, so the orchestrator and any UI can react to them.

use super::transcript::Transcript;
use super::turn::Turn;
use crate::core::provider::ProviderKind;
use crate::orchestration::participants::{ParticipantAssignment, Slot};
use crate::orchestration::session_mode::SessionMode;

/// A change applied to the [`ConversationStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    TurnAppended { index: usize, turn: Turn },
    ModeChanged(SessionMode),
    ParticipantChanged { slot: Slot, provider: ProviderKind },
    BattleActiveChanged(bool),
    SessionReset,
}

/// Holds the transcript, mode, participant assignment and battle flag
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    transcript: Transcript,
    mode: SessionMode,
    participants: ParticipantAssignment,
    battle_active: bool,
}

impl ConversationStore {
    pub fn new(participants: ParticipantAssignment) -> Self {
        Self {
            participants,
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub(crate) fn with_mode(mut self, mode: SessionMode) -> Self {
        self.mode = mode;
        self
    }

    // ==================== Queries ====================

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn participants(&self) -> ParticipantAssignment {
        self.participants
    }

    pub fn is_battle_active(&self) -> bool {
        self.battle_active
    }

    /// Turns may only be auto-generated in battle mode with the flag set.
    pub fn battle_due(&self) -> bool {
        self.mode == SessionMode::Battle && self.battle_active
    }

    // ==================== Mutations ====================

    pub fn append_turn(&mut self, turn: Turn) -> StoreEvent {
        let index = self.transcript.push(turn.clone());
        StoreEvent::TurnAppended { index, turn }
    }

    /// Change the mode. Leaving battle mode always clears the battle flag.
    pub fn set_mode(&mut self, mode: SessionMode) -> Vec<StoreEvent> {
        self.mode = mode;
        let mut events = vec![StoreEvent::ModeChanged(mode)];
        if mode == SessionMode::Manual && self.battle_active {
            events.push(self.set_battle_active(false));
        }
        events
    }

    pub fn set_participant(&mut self, slot: Slot, provider: ProviderKind) -> StoreEvent {
        self.participants.assign(slot, provider);
        StoreEvent::ParticipantChanged { slot, provider }
    }

    pub fn set_battle_active(&mut self, active: bool) -> StoreEvent {
        self.battle_active = active;
        StoreEvent::BattleActiveChanged(active)
    }

    /// Start a new session: empty transcript, battle off.
    /// Mode and participants carry over.
    pub fn reset(&mut self) -> StoreEvent {
        self.transcript.clear();
        self.battle_active = false;
        StoreEvent::SessionReset
    }
}
