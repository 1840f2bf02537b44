//! Application-level configuration.
//!
//! - [`BattleConfig`]: participants, pacing and instruction for battle mode

pub mod battle_config;

pub use battle_config::{BattleConfig, DEFAULT_PACING};
