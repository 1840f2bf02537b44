//! Infrastructure layer for ai-arena
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileBattleConfig, FileConfig, FileGeminiConfig, FileOpenAiConfig,
    FileProvidersConfig, FileServerConfig,
};
pub use providers::{
    Credential, GeminiAdapter, OpenAiAdapter, ProviderAdapter, RoutingGateway,
    SystemInstructionMode,
};
