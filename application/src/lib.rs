//! Application layer for ai-arena
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{BattleConfig, DEFAULT_PACING};
pub use ports::{
    chat_gateway::{ChatGateway, GatewayError},
    progress::{BattleProgressNotifier, NoProgress},
};
pub use use_cases::orchestrator::{
    BattleEnd, BattleSummary, OrchestratorError, SessionSnapshot, StepOutcome, SubmitOutcome,
    TurnOrchestrator,
};
pub use use_cases::probe_provider::{ProbeProviderUseCase, ProbeReport};
pub use use_cases::relay_chat::{
    RelayChatError, RelayChatInput, RelayChatOutput, RelayChatUseCase,
};
