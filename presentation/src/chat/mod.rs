//! Interactive chat module
//!
//! Provides a readline-based terminal for manual chat and battle mode.

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::ChatRepl;
