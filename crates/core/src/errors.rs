use thiserror::Error;

/// Failures from strict session-store operations. `NotFound` on append or
/// context update signals a caller protocol violation (the adapter skipped
/// get-or-create); `Duplicate` is the advisory explicit-create failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session `{0}` was not found")]
    NotFound(String),
    #[error("session `{0}` already exists")]
    Duplicate(String),
}

/// Knowledge-base failures. The in-memory document is updated before the
/// durable write-back, so `Persistence` leaves the read path serving the new
/// state for the rest of the process lifetime.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum KnowledgeError {
    #[error("knowledge base write-back failed: {0}")]
    Persistence(String),
}

/// Dialogue-engine failures surfaced to channel adapters. Knowledge and
/// composition problems never appear here; they degrade to the fallback
/// phrase inside the engine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl EngineError {
    /// Phrase adapters may hand to an end user when a turn cannot complete.
    pub fn user_message(&self) -> &'static str {
        "I'm not sure I understood. Could you please repeat that?"
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineError, SessionError};

    #[test]
    fn session_not_found_converts_to_engine_error() {
        let engine: EngineError = SessionError::NotFound("+15551234567".to_owned()).into();
        assert!(matches!(engine, EngineError::Session(SessionError::NotFound(_))));
        assert_eq!(engine.to_string(), "session `+15551234567` was not found");
    }

    #[test]
    fn engine_error_has_user_safe_message() {
        let engine: EngineError = SessionError::Duplicate("abc".to_owned()).into();
        assert!(!engine.user_message().is_empty());
    }
}
