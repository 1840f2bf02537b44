//! Console output formatter for arena sessions

use arena_application::{BattleEnd, BattleSummary, ProbeReport, SessionSnapshot};
use arena_domain::{ParticipantAssignment, Slot, Transcript, Turn};
use colored::{ColoredString, Colorize};

/// Formats turns and session state for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One transcript entry: a colored sender label followed by the text
    pub fn format_turn(turn: &Turn) -> String {
        format!("{}\n{}", Self::label(turn), Self::indent(turn.text(), "  "))
    }

    /// Whole transcript, numbered
    pub fn format_transcript(transcript: &Transcript) -> String {
        if transcript.is_empty() {
            return format!("{}", "(transcript is empty)".dimmed());
        }

        let mut output = Self::section_header("Transcript");
        for (i, turn) in transcript.iter().enumerate() {
            output.push_str(&format!(
                "\n{} {}\n",
                format!("#{}", i + 1).dimmed(),
                Self::format_turn(turn)
            ));
        }
        output
    }

    pub fn format_summary(summary: &BattleSummary) -> String {
        let ending = match &summary.end {
            BattleEnd::Stopped => "stopped".yellow().to_string(),
            BattleEnd::TurnLimit => "turn limit reached".cyan().to_string(),
            BattleEnd::Halted { slot, error } => {
                format!("{} {}: {}", "halted by slot".red(), slot, error)
            }
        };
        format!(
            "{} {} turn(s), {}",
            "Battle over:".bold(),
            summary.turns,
            ending
        )
    }

    pub fn format_status(snapshot: &SessionSnapshot) -> String {
        let mut output = Self::section_header("Session");
        output.push_str(&format!(
            "  {} {}\n",
            "Mode:".cyan().bold(),
            snapshot.mode.description()
        ));
        output.push_str(&format!(
            "  {} {}\n",
            "Participants:".cyan().bold(),
            Self::format_participants(&snapshot.participants)
        ));
        let battle = if snapshot.battle_active {
            "running".green()
        } else {
            "off".dimmed()
        };
        output.push_str(&format!("  {} {}\n", "Battle:".cyan().bold(), battle));
        output.push_str(&format!(
            "  {} {:?}\n",
            "State:".cyan().bold(),
            snapshot.state
        ));
        output.push_str(&format!(
            "  {} {}\n",
            "Turns:".cyan().bold(),
            snapshot.transcript.len()
        ));
        output
    }

    pub fn format_participants(participants: &ParticipantAssignment) -> String {
        format!(
            "A = {}, B = {}",
            participants.a.display_name(),
            participants.b.display_name()
        )
    }

    pub fn format_probe(report: &ProbeReport) -> String {
        format!(
            "{} {} ({})\n{}",
            "v".green(),
            report.provider.display_name().bold(),
            report.model.as_deref().unwrap_or("unknown model"),
            Self::indent(&report.reply, "  ")
        )
    }

    pub fn format_error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    fn label(turn: &Turn) -> ColoredString {
        match (turn.slot(), turn.provider()) {
            (Some(slot), Some(provider)) => {
                Self::slot_color(slot, format!("[{}] {}", slot, provider.display_name()))
            }
            (None, Some(provider)) => provider.display_name().yellow().bold(),
            _ => "You".green().bold(),
        }
    }

    fn slot_color(slot: Slot, text: String) -> ColoredString {
        match slot {
            Slot::A => text.cyan().bold(),
            Slot::B => text.magenta().bold(),
        }
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_domain::{OrchestratorState, ProviderKind, SessionMode};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_turn_labels() {
        plain();
        let user = Turn::user("Topic?").unwrap();
        assert_eq!(ConsoleFormatter::format_turn(&user), "You\n  Topic?");

        let reply = Turn::from_slot(Slot::B, ProviderKind::Gemini, "line one\nline two");
        assert_eq!(
            ConsoleFormatter::format_turn(&reply),
            "[B] Gemini\n  line one\n  line two"
        );
    }

    #[test]
    fn test_format_summary() {
        plain();
        let summary = BattleSummary {
            turns: 3,
            end: BattleEnd::Halted {
                slot: Slot::A,
                error: "Timeout".into(),
            },
        };
        let text = ConsoleFormatter::format_summary(&summary);
        assert!(text.contains("3 turn(s)"));
        assert!(text.contains("halted by slot A: Timeout"));
    }

    #[test]
    fn test_format_status_and_transcript() {
        plain();
        let transcript: Transcript = vec![
            Turn::user("Topic?").unwrap(),
            Turn::from_slot(Slot::A, ProviderKind::Gpt, "claim"),
        ]
        .into_iter()
        .collect();
        let snapshot = SessionSnapshot {
            transcript: transcript.clone(),
            mode: SessionMode::Battle,
            participants: ParticipantAssignment::default(),
            battle_active: true,
            state: OrchestratorState::Idle,
        };

        let status = ConsoleFormatter::format_status(&snapshot);
        assert!(status.contains("A = ChatGPT, B = Gemini"));
        assert!(status.contains("running"));
        assert!(status.contains("Turns: 2"));

        let text = ConsoleFormatter::format_transcript(&transcript);
        assert!(text.contains("#1 You"));
        assert!(text.contains("#2 [A] ChatGPT"));
        assert!(ConsoleFormatter::format_transcript(&Transcript::new()).contains("empty"));
    }
}
