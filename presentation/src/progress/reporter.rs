//! Progress reporting for battle turns and probes

use arena_application::BattleProgressNotifier;
use arena_domain::{ProviderKind, Slot, Turn};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(120);

/// Shows a spinner while the orchestrator paces or waits on a provider
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Standalone spinner, e.g. while a probe is running
    pub fn spinner(prefix: impl Into<String>, message: impl Into<String>) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(prefix.into());
        pb.set_message(message.into());
        pb.enable_steady_tick(TICK);
        pb
    }

    fn show(&self, prefix: String, message: String) {
        let mut current = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pb) = current.take() {
            pb.finish_and_clear();
        }
        *current = Some(Self::spinner(prefix, message));
    }

    fn clear(&self) {
        let mut current = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pb) = current.take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleProgressNotifier for ProgressReporter {
    fn on_pacing(&self, slot: Slot, delay: Duration) {
        self.show(
            format!("[{}]", slot),
            format!("next turn in {}s", delay.as_secs()),
        );
    }

    fn on_turn_start(&self, slot: Slot, provider: ProviderKind) {
        self.show(
            format!("[{}]", slot),
            format!("{} is thinking...", provider.display_name()),
        );
    }

    fn on_turn_complete(&self, _slot: Slot, _turn: &Turn) {
        self.clear();
    }

    fn on_halted(&self, slot: Slot, error: &str) {
        self.clear();
        eprintln!(
            "{} slot {} failed: {}",
            "x".red(),
            slot,
            error
        );
    }

    fn on_turn_abandoned(&self, _slot: Slot) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_is_replaced_and_cleared() {
        let reporter = ProgressReporter::new();
        reporter.on_pacing(Slot::A, Duration::from_secs(10));
        reporter.on_turn_start(Slot::A, ProviderKind::Gpt);
        assert!(reporter.spinner.lock().unwrap().is_some());

        let turn = Turn::from_slot(Slot::A, ProviderKind::Gpt, "claim");
        reporter.on_turn_complete(Slot::A, &turn);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_abandoned_turn_clears_spinner() {
        let reporter = ProgressReporter::new();
        reporter.on_pacing(Slot::B, Duration::from_secs(10));
        reporter.on_turn_abandoned(Slot::B);
        assert!(reporter.spinner.lock().unwrap().is_none());

        reporter.on_turn_start(Slot::A, ProviderKind::Gemini);
        reporter.on_turn_abandoned(Slot::A);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
