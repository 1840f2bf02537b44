//! Battle progress notification port
//!
//! Lets the presentation layer show what the orchestrator is doing
//! (pacing, waiting on a provider, halted) without polling.

use arena_domain::{ProviderKind, Slot, Turn};
use std::time::Duration;

/// Callbacks fired by the turn orchestrator
pub trait BattleProgressNotifier: Send + Sync {
    /// Pacing wait started before `slot` is asked to reply
    fn on_pacing(&self, _slot: Slot, _delay: Duration) {}

    /// Provider call for `slot` started
    fn on_turn_start(&self, slot: Slot, provider: ProviderKind);

    /// Provider call for `slot` returned and its turn was appended
    fn on_turn_complete(&self, slot: Slot, turn: &Turn);

    /// The battle stopped because a provider call failed
    fn on_halted(&self, slot: Slot, error: &str);

    /// `slot`'s turn ended without a reply: the battle was stopped during
    /// the pacing wait or while the call was outstanding
    fn on_turn_abandoned(&self, _slot: Slot) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl BattleProgressNotifier for NoProgress {
    fn on_turn_start(&self, _slot: Slot, _provider: ProviderKind) {}
    fn on_turn_complete(&self, _slot: Slot, _turn: &Turn) {}
    fn on_halted(&self, _slot: Slot, _error: &str) {}
}
