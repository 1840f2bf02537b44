//! CLI command definitions

use arena_domain::ProviderKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for ai-arena
#[derive(Parser, Debug)]
#[command(name = "ai-arena")]
#[command(author, version, about = "AI Arena - chat with GPT or Gemini, or watch them debate")]
#[command(long_about = r#"
AI Arena relays chat to two hosted LLM providers (gpt, gemini).

Manual mode: you talk to the provider in slot A.
Battle mode: slots A and B take turns attacking each other's last claim,
with a pacing delay between calls to stay under rate limits.

Configuration files are loaded from (in priority order):
1. ARENA_* environment variables (e.g. ARENA_SERVER__PORT=8080)
2. --config <path>     Explicit config file
3. ./arena.toml        Project-level config
4. ~/.config/ai-arena/config.toml   Global config

Credentials are read from OPENAI_API_KEY and GOOGLE_API_KEY.

Example:
  ai-arena serve --port 3000
  ai-arena chat --battle --a gemini --b gpt
  ai-arena probe gemini
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP relay (POST /chat, GET /health, GET /probe/{provider})
    Serve(ServeArgs),
    /// Interactive terminal chat (default)
    Chat(ChatArgs),
    /// Send a test greeting to one provider
    Probe {
        /// Provider to probe (gpt or gemini)
        #[arg(value_parser = parse_provider)]
        provider: ProviderKind,
    },
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Bind host (overrides [server] host)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides [server] port)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug, Default)]
pub struct ChatArgs {
    /// Start in battle mode
    #[arg(long)]
    pub battle: bool,

    /// Provider for slot A (overrides [battle] slot_a)
    #[arg(long = "a", value_name = "PROVIDER", value_parser = parse_provider)]
    pub slot_a: Option<ProviderKind>,

    /// Provider for slot B (overrides [battle] slot_b)
    #[arg(long = "b", value_name = "PROVIDER", value_parser = parse_provider)]
    pub slot_b: Option<ProviderKind>,

    /// Seconds to wait before each battle call (overrides [battle] pacing_secs)
    #[arg(long, value_name = "SECS")]
    pub pacing_secs: Option<u64>,

    /// Stop the battle after this many provider turns
    #[arg(long, value_name = "N")]
    pub max_turns: Option<usize>,

    /// Hide the pacing and waiting indicators
    #[arg(long)]
    pub no_progress: bool,
}

fn parse_provider(s: &str) -> Result<ProviderKind, String> {
    s.parse::<ProviderKind>().map_err(|e| e.to_string())
}
