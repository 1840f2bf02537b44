//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod orchestrator;
pub mod probe_provider;
pub mod relay_chat;

#[cfg(test)]
pub(crate) mod test_support;
