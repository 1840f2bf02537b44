//! Prompt templates

pub mod battle;

pub use battle::BattlePrompt;
