//! Error types for rapid_assess
//!
//! This module defines the error types used throughout the library.
//! Tagging failures are recovered inside the chunker; the remaining
//! variants surface to the caller.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AssessError>;

/// Main error type for rapid_assess
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssessError {
    /// The corpus file is missing or unreadable
    #[error("Corpus unavailable at {path}: {message}")]
    CorpusUnavailable { path: String, message: String },

    /// The corpus does not hold enough material for the requested test
    #[error("Insufficient content: {message}")]
    InsufficientContent { message: String },

    /// A part-of-speech tagger could not tag a sentence
    #[error("Tagging failed: {message}")]
    Tagging { message: String },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl AssessError {
    /// Create a corpus unavailable error
    pub fn corpus_unavailable(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorpusUnavailable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an insufficient content error
    pub fn insufficient_content(message: impl Into<String>) -> Self {
        Self::InsufficientContent {
            message: message.into(),
        }
    }

    /// Create a tagging error
    pub fn tagging(message: impl Into<String>) -> Self {
        Self::Tagging {
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Check if this error means no test can be produced from the corpus
    pub fn is_insufficient_content(&self) -> bool {
        matches!(self, Self::InsufficientContent { .. })
    }

    /// Check if this error comes from loading the corpus
    pub fn is_corpus_unavailable(&self) -> bool {
        matches!(self, Self::CorpusUnavailable { .. })
    }
}

impl From<serde_json::Error> for AssessError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AssessError::insufficient_content("no chunks extracted");
        assert!(err.to_string().contains("Insufficient content"));
        assert!(err.to_string().contains("no chunks extracted"));

        let err = AssessError::corpus_unavailable("corpus/dbms.txt", "not found");
        assert!(err.to_string().contains("corpus/dbms.txt"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_predicates() {
        let err = AssessError::insufficient_content("test");
        assert!(err.is_insufficient_content());
        assert!(!err.is_corpus_unavailable());

        let err = AssessError::corpus_unavailable("x", "y");
        assert!(err.is_corpus_unavailable());
        assert!(!err.is_insufficient_content());
    }

    #[test]
    fn test_from_serde_json() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: AssessError = parse.unwrap_err().into();
        assert!(matches!(err, AssessError::Serialization { .. }));
    }
}
