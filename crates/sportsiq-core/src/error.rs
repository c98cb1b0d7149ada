//! Error types for the quiz core.
//!
//! Scoring, stat merging and achievement evaluation are total and never fail.
//! The errors here cover malformed input records, driving a session past its
//! end, and the storage backend.

use thiserror::Error;

/// Errors raised when building quiz records or driving a session.
#[derive(Debug, Error)]
pub enum TriviaError {
    /// A question whose correct answer is not one of its options.
    #[error("invalid question: {0}")]
    InvalidQuestion(String),

    /// Initials must be 1 to 3 characters after trimming.
    #[error("initials must be 1-3 characters, got {0:?}")]
    InvalidInitials(String),

    /// A session was started with no questions.
    #[error("cannot start a session without questions")]
    EmptySession,

    /// An answer was submitted after the last question.
    #[error("session already finished after {0} questions")]
    SessionFinished(usize),

    /// The session was recorded before every question was answered.
    #[error("session still in progress: {answered}/{total} answered")]
    SessionInProgress { answered: usize, total: usize },
}

/// Errors from a key-value storage backend.
///
/// `TriviaStore` never hands these to its callers. Reads degrade to defaults
/// and writes are dropped, both with a log line.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure reading or writing a key.
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A stored value could not be encoded or decoded.
    #[error("malformed value for key '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// The storage key the error relates to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            StoreError::Io { key, .. } | StoreError::Malformed { key, .. } => Some(key),
            StoreError::Unavailable(_) => None,
        }
    }
}
