use thiserror::Error;

/// A required input is missing or malformed. Carries the user-facing message,
/// which is rendered verbatim (inline in the editor, or as the relay's `error`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
