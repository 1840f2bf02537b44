//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Turn text cannot be empty")]
    EmptyTurn,

    #[error("Invalid provider specified: {0}")]
    UnknownProvider(String),

    #[error("Invalid session mode: {0}")]
    UnknownMode(String),

    #[error("A reply is already in flight")]
    TurnInFlight,

    #[error("Battle is stopped")]
    Stopped,
}

impl DomainError {
    /// Check if this error was caused by bad user input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyTurn | DomainError::UnknownProvider(_) | DomainError::UnknownMode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_display() {
        let error = DomainError::UnknownProvider("claude".to_string());
        assert_eq!(error.to_string(), "Invalid provider specified: claude");
    }

    #[test]
    fn test_is_user_error_check() {
        assert!(DomainError::EmptyTurn.is_user_error());
        assert!(DomainError::UnknownProvider("x".to_string()).is_user_error());
        assert!(!DomainError::TurnInFlight.is_user_error());
        assert!(!DomainError::Stopped.is_user_error());
    }
}
