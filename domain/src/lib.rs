//! Domain layer for ai-arena
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Transcript**: the ordered, append-only list of [`Turn`]s
//! - **Slots A / B**: the two battle participants, each bound to a [`ProviderKind`]
//! - **Battle mode**: the slots alternately attack each other's last claim;
//!   [`next_speaker`] decides who goes next

pub mod config;
pub mod conversation;
pub mod core;
pub mod orchestration;
pub mod prompt;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use conversation::{
    message::{ChatMessage, MessageRole},
    store::{ConversationStore, StoreEvent},
    transcript::Transcript,
    turn::{Author, Speaker, Turn},
};
pub use core::{error::DomainError, provider::ProviderKind, string::preview};
pub use orchestration::{
    participants::{ParticipantAssignment, Slot},
    request::ConverseRequest,
    session_mode::SessionMode,
    speaker::next_speaker,
    state::OrchestratorState,
};
pub use prompt::BattlePrompt;
