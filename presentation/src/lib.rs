//! Presentation layer for ai-arena
//!
//! This crate contains CLI definitions, the HTTP relay server, output
//! formatters, progress reporters, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::{ChatArgs, Cli, Command, ServeArgs};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ProgressReporter;
pub use server::ArenaServer;
