//! Error types for chat-macro

use thiserror::Error;

/// Errors raised by configuration and the dispatch path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Trigger or exit-combination key name is not in the key vocabulary
    #[error("Invalid key name: {0}")]
    InvalidKeyName(String),

    /// Submitted phrase list was empty or blank
    #[error("Please enter new pastes")]
    EmptyInput,

    /// Both halves of the phrase pool are empty
    #[error("Phrase pool is empty")]
    EmptyPool,

    /// Exit combination needs at least one key
    #[error("Exit combination must contain at least one key")]
    EmptyExitCombination,

    /// A thread panicked while holding the shared macro state
    #[error("Macro state lock poisoned")]
    StatePoisoned,

    /// The global keyboard listener stopped or could not start
    #[error("Keyboard listener failed: {0}")]
    Listener(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::InvalidKeyName("not_a_real_key".to_string());
        assert_eq!(error.to_string(), "Invalid key name: not_a_real_key");

        let error = Error::EmptyInput;
        assert!(error.to_string().contains("new pastes"));

        let error = Error::Listener("no display".to_string());
        assert!(error.to_string().contains("no display"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(Error::EmptyPool, Error::EmptyPool);
        assert_ne!(Error::EmptyPool, Error::EmptyInput);
        assert_ne!(
            Error::InvalidKeyName("a".to_string()),
            Error::InvalidKeyName("b".to_string())
        );
    }
}
