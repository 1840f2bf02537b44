//! Slash commands understood by the chat REPL

use arena_domain::{ProviderKind, SessionMode, Slot};

/// A parsed `/command`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Mode(SessionMode),
    Assign(Slot, ProviderKind),
    Start,
    Stop,
    New,
    Status,
    Transcript,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse a line starting with `/`. Errors carry a message for the user.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.trim().split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match (name, arg) {
            ("/mode", Some(mode)) => mode
                .parse::<SessionMode>()
                .map(ReplCommand::Mode)
                .map_err(|e| e.to_string()),
            ("/mode", None) => Err("Usage: /mode manual|battle".to_string()),
            ("/a", Some(provider)) => Self::assign(Slot::A, provider),
            ("/b", Some(provider)) => Self::assign(Slot::B, provider),
            ("/a" | "/b", None) => Err(format!("Usage: {} gpt|gemini", name)),
            ("/start", _) => Ok(ReplCommand::Start),
            ("/stop", _) => Ok(ReplCommand::Stop),
            ("/new" | "/reset", _) => Ok(ReplCommand::New),
            ("/status", _) => Ok(ReplCommand::Status),
            ("/transcript" | "/t", _) => Ok(ReplCommand::Transcript),
            ("/help" | "/h" | "/?", _) => Ok(ReplCommand::Help),
            ("/quit" | "/exit" | "/q", _) => Ok(ReplCommand::Quit),
            _ => Err(format!(
                "Unknown command: {}\nType /help for available commands",
                name
            )),
        }
    }

    fn assign(slot: Slot, provider: &str) -> Result<Self, String> {
        provider
            .parse::<ProviderKind>()
            .map(|p| ReplCommand::Assign(slot, p))
            .map_err(|e| e.to_string())
    }

    pub fn help() -> &'static str {
        r#"Commands:
  /mode manual|battle  - Switch mode (leaving battle stops it)
  /a <provider>        - Assign slot A (gpt or gemini)
  /b <provider>        - Assign slot B
  /start               - Restart a stopped battle on the current transcript
  /stop                - Stop the battle
  /new                 - Clear the transcript and start over
  /status              - Show mode, participants and battle state
  /transcript, /t      - Print the whole transcript
  /help, /h, /?        - Show this help
  /quit, /exit, /q     - Exit chat"#
    }
}
