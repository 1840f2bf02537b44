//! Configuration file loading for ai-arena
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ARENA_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./arena.toml` or `./.arena.toml`
//! 4. Global: `~/.config/ai-arena/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileBattleConfig, FileConfig, FileGeminiConfig, FileOpenAiConfig, FileProvidersConfig,
    FileServerConfig,
};
pub use loader::ConfigLoader;
