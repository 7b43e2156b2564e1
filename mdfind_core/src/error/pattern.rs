//! Glob pattern error type

use thiserror::Error;

/// A glob pattern that could not be compiled
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid glob pattern '{pattern}': {message}")]
pub struct PatternError {
    /// The pattern as supplied by the caller
    pub pattern: String,
    /// Parser message describing the problem
    pub message: String,
}

impl PatternError {
    pub fn new(pattern: &str, message: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            message: message.to_string(),
        }
    }

    /// Build from a globset parse failure
    pub(crate) fn from_glob(pattern: &str, err: &globset::Error) -> Self {
        let message = match err.kind() {
            globset::ErrorKind::UnclosedClass => "unclosed character class".to_string(),
            globset::ErrorKind::UnclosedAlternates => "unclosed alternation".to_string(),
            kind => kind.to_string(),
        };
        Self::new(pattern, &message)
    }
}
