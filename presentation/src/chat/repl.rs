//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::ReplCommand;
use crate::ConsoleFormatter;
use crate::ProgressReporter;
use arena_application::{
    BattleConfig, BattleEnd, ChatGateway, OrchestratorError, SubmitOutcome, TurnOrchestrator,
};
use arena_domain::{SessionMode, StoreEvent};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::Result as RlResult;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// What the reader thread hands to the REPL loop
enum ReplInput {
    Line(String),
    Interrupted,
    Eof,
    Failed(ReadlineError),
}

/// Interactive chat REPL
///
/// Input is read on a dedicated thread so a running battle keeps printing
/// turns while the prompt waits, and `/stop` is accepted at any time.
pub struct ChatRepl<G: ChatGateway + 'static> {
    orchestrator: TurnOrchestrator<G>,
    initial_mode: SessionMode,
    show_progress: bool,
    history_path: Option<PathBuf>,
}

impl<G: ChatGateway + 'static> ChatRepl<G> {
    /// Create a new ChatRepl
    pub fn new(gateway: Arc<G>, config: BattleConfig) -> Self {
        Self {
            orchestrator: TurnOrchestrator::new(gateway, config),
            initial_mode: SessionMode::Manual,
            show_progress: false,
            history_path: dirs::data_dir().map(|p| p.join("ai-arena").join("history.txt")),
        }
    }

    /// Set whether to show pacing and waiting spinners
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        if show {
            self.orchestrator = self
                .orchestrator
                .with_progress(Arc::new(ProgressReporter::new()));
        }
        self
    }

    /// Mode the session starts in
    pub fn with_mode(mut self, mode: SessionMode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Run the interactive REPL until `/quit` or end of input
    pub async fn run(&self) -> RlResult<()> {
        self.orchestrator.set_mode(self.initial_mode).await;
        self.print_welcome();

        let renderer = tokio::spawn(render_events(
            self.orchestrator.subscribe(),
            self.initial_mode == SessionMode::Battle,
        ));

        let (input_tx, mut input_rx) = mpsc::unbounded_channel();
        let (prompt_tx, prompt_rx) = std::sync::mpsc::channel();
        spawn_reader(
            self.history_path.clone(),
            prompt(self.initial_mode),
            input_tx,
            prompt_rx,
        );

        let mut battle: Option<JoinHandle<()>> = None;
        let result = loop {
            let Some(input) = input_rx.recv().await else {
                break Ok(());
            };

            match input {
                ReplInput::Line(line) => {
                    if line.starts_with('/') {
                        match ReplCommand::parse(&line) {
                            Ok(ReplCommand::Quit) => {
                                println!("Bye!");
                                break Ok(());
                            }
                            Ok(command) => self.handle_command(command, &mut battle).await,
                            Err(message) => println!("{}", message),
                        }
                    } else {
                        self.process_message(&line, &mut battle).await;
                    }
                }
                ReplInput::Interrupted => {
                    if self.orchestrator.snapshot().await.battle_active {
                        self.orchestrator.stop().await;
                    } else {
                        println!("^C");
                    }
                }
                ReplInput::Eof => {
                    println!("Bye!");
                    break Ok(());
                }
                ReplInput::Failed(err) => break Err(err),
            }

            let mode = self.orchestrator.snapshot().await.mode;
            if prompt_tx.send(prompt(mode)).is_err() {
                break Ok(());
            }
        };

        self.orchestrator.stop().await;
        if let Some(handle) = battle.take() {
            handle.abort();
        }
        renderer.abort();
        result
    }

    fn print_welcome(&self) {
        let config = self.orchestrator.config();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                  AI Arena                   │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Participants: {}",
            ConsoleFormatter::format_participants(&config.participants)
        );
        println!("Mode: {}", self.initial_mode.description());
        if !config.pacing.is_zero() {
            println!("Battle pacing: {}s between turns", config.pacing.as_secs());
        }
        println!();
        println!("{}", ReplCommand::help());
        println!();
    }

    async fn handle_command(&self, command: ReplCommand, battle: &mut Option<JoinHandle<()>>) {
        match command {
            ReplCommand::Mode(mode) => self.orchestrator.set_mode(mode).await,
            ReplCommand::Assign(slot, provider) => {
                self.orchestrator.set_participant(slot, provider).await
            }
            ReplCommand::Start => match self.orchestrator.start_battle().await {
                Ok(()) => self.drive_battle(battle),
                Err(e) => println!("{}", describe_error(&e)),
            },
            ReplCommand::Stop => self.orchestrator.stop().await,
            ReplCommand::New => self.orchestrator.new_session().await,
            ReplCommand::Status => {
                let snapshot = self.orchestrator.snapshot().await;
                println!("{}", ConsoleFormatter::format_status(&snapshot));
            }
            ReplCommand::Transcript => {
                let snapshot = self.orchestrator.snapshot().await;
                println!(
                    "{}",
                    ConsoleFormatter::format_transcript(&snapshot.transcript)
                );
            }
            ReplCommand::Help => {
                println!();
                println!("{}", ReplCommand::help());
                println!();
            }
            ReplCommand::Quit => {}
        }
    }

    async fn process_message(&self, text: &str, battle: &mut Option<JoinHandle<()>>) {
        let spinner = (self.show_progress
            && self.orchestrator.snapshot().await.mode == SessionMode::Manual)
            .then(|| ProgressReporter::spinner("[A]", "waiting for reply..."));

        let result = self.orchestrator.submit_user_message(text).await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        match result {
            Ok(SubmitOutcome::Replied { reply }) => {
                println!();
                println!("{}", ConsoleFormatter::format_turn(&reply));
                println!();
            }
            Ok(SubmitOutcome::Discarded) => {}
            Ok(SubmitOutcome::BattleStarted) => self.drive_battle(battle),
            Err(e) => println!("{}", describe_error(&e)),
        }
    }

    /// Spawn the battle loop unless one is still running
    fn drive_battle(&self, battle: &mut Option<JoinHandle<()>>) {
        if battle.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        let orchestrator = self.orchestrator.clone();
        *battle = Some(tokio::spawn(async move {
            let summary = orchestrator.run_battle().await;
            if summary.turns > 0 || summary.end != BattleEnd::Stopped {
                println!();
                println!("{}", ConsoleFormatter::format_summary(&summary));
            }
        }));
    }
}

/// Error line plus a hint when the user can fix the cause
fn describe_error(error: &OrchestratorError) -> String {
    let message = ConsoleFormatter::format_error(&error.to_string());
    let hint = match error {
        OrchestratorError::Domain(e) if e.is_user_error() => Some("Type /help for usage."),
        OrchestratorError::Gateway(e) if e.is_configuration() => {
            Some("Check the provider API keys, then try again.")
        }
        _ => None,
    };
    match hint {
        Some(hint) => format!("{}\n{}", message, hint.dimmed()),
        None => message,
    }
}

fn prompt(mode: SessionMode) -> String {
    format!("{}> ", mode)
}

/// Read lines on a plain thread; each line waits for the next prompt from
/// the REPL loop before reading again.
fn spawn_reader(
    history_path: Option<PathBuf>,
    first_prompt: String,
    input_tx: mpsc::UnboundedSender<ReplInput>,
    prompt_rx: std::sync::mpsc::Receiver<String>,
) {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                let _ = input_tx.send(ReplInput::Failed(err));
                return;
            }
        };

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        let mut current_prompt = first_prompt;
        loop {
            let input = match rl.readline(&current_prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);
                    if let Some(ref path) = history_path {
                        let _ = rl.save_history(path);
                    }
                    ReplInput::Line(line.to_string())
                }
                Err(ReadlineError::Interrupted) => ReplInput::Interrupted,
                Err(ReadlineError::Eof) => ReplInput::Eof,
                Err(err) => ReplInput::Failed(err),
            };

            let last = matches!(input, ReplInput::Eof | ReplInput::Failed(_));
            if input_tx.send(input).is_err() || last {
                break;
            }
            match prompt_rx.recv() {
                Ok(next) => current_prompt = next,
                Err(_) => break,
            }
        }
    });
}

/// Print store changes that did not come from the REPL loop itself
async fn render_events(mut events: broadcast::Receiver<StoreEvent>, mut battle_active: bool) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if let Some(text) = render(&event, &mut battle_active) {
                    println!("{}", text);
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                println!("{}", format!("({} updates skipped)", skipped).dimmed());
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Text for one store event. Manual replies are printed where they are
/// awaited, so only turns appended during a battle are rendered here.
fn render(event: &StoreEvent, battle_active: &mut bool) -> Option<String> {
    match event {
        StoreEvent::TurnAppended { turn, .. } if *battle_active && !turn.is_from_user() => {
            Some(format!("\n{}\n", ConsoleFormatter::format_turn(turn)))
        }
        StoreEvent::TurnAppended { .. } => None,
        StoreEvent::ModeChanged(mode) => Some(format!(
            "{} {}",
            "Mode:".cyan().bold(),
            mode.description()
        )),
        StoreEvent::ParticipantChanged { slot, provider } => Some(format!(
            "{} slot {} = {}",
            "Assigned:".cyan().bold(),
            slot,
            provider.display_name()
        )),
        StoreEvent::BattleActiveChanged(active) => {
            let was_active = std::mem::replace(battle_active, *active);
            match (was_active, *active) {
                (false, true) => Some(format!("{}", "Battle started".green().bold())),
                (true, false) => Some(format!("{}", "Battle stopped".yellow().bold())),
                _ => None,
            }
        }
        StoreEvent::SessionReset => {
            *battle_active = false;
            Some(format!("{}", "New session: transcript cleared".cyan()))
        }
    }
}
