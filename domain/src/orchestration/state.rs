//! Orchestrator state machine: `Idle → AwaitingReply → Idle`, with `Stopped`
//! reachable from anywhere.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestratorState {
    #[default]
    Idle,
    /// One provider call is outstanding; no other may start.
    AwaitingReply,
    /// Battle halted by the user or by a failure. Needs an explicit restart.
    Stopped,
}

impl OrchestratorState {
    /// Idle → AwaitingReply
    pub fn begin_turn(&mut self) -> Result<(), DomainError> {
        match self {
            OrchestratorState::Idle => {
                *self = OrchestratorState::AwaitingReply;
                Ok(())
            }
            OrchestratorState::AwaitingReply => Err(DomainError::TurnInFlight),
            OrchestratorState::Stopped => Err(DomainError::Stopped),
        }
    }

    /// AwaitingReply → Idle. A turn that finishes after a stop leaves the
    /// state at `Stopped`.
    pub fn complete_turn(&mut self) {
        if *self == OrchestratorState::AwaitingReply {
            *self = OrchestratorState::Idle;
        }
    }

    /// Any → Stopped, after a provider failure
    pub fn fail(&mut self) {
        *self = OrchestratorState::Stopped;
    }

    /// Any → Stopped, on user request
    pub fn stop(&mut self) {
        *self = OrchestratorState::Stopped;
    }

    /// Stopped → Idle, when the user restarts the battle.
    /// A call still in flight keeps the guard in place.
    pub fn resume(&mut self) {
        if *self == OrchestratorState::Stopped {
            *self = OrchestratorState::Idle;
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == OrchestratorState::Idle
    }

    pub fn is_awaiting_reply(&self) -> bool {
        *self == OrchestratorState::AwaitingReply
    }
}

impl fmt::Display for OrchestratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrchestratorState::Idle => "idle",
            OrchestratorState::AwaitingReply => "awaiting reply",
            OrchestratorState::Stopped => "stopped",
        };
        write!(f, "{}", s)
    }
}
