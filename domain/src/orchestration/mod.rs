//! Orchestration subdomain: who speaks next and how the request is shaped.

pub mod participants;
pub mod request;
pub mod session_mode;
pub mod speaker;
pub mod state;
