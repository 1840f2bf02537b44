//! Conversation subdomain: turns, the transcript and the store that owns them.

pub mod message;
pub mod store;
pub mod transcript;
pub mod turn;
