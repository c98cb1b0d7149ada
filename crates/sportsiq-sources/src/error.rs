//! Question-source error types.

use thiserror::Error;

/// Errors that can occur when fetching questions.
///
/// The `Display` text is written for the player; the CLI shows it as-is.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The service could not be reached.
    #[error("a network error occurred ({0}). Please check your connection and try again")]
    NetworkError(String),

    /// The request timed out.
    #[error("the trivia service did not answer within {0}s")]
    Timeout(u64),

    /// The service asked us to slow down.
    #[error("the trivia service is rate limiting requests, try again in a few seconds")]
    RateLimited,

    /// The service returned an error status.
    #[error("trivia service error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The service answered but had no questions for the request.
    #[error("the trivia service couldn't provide questions for this difficulty (response code {code}). Please try another one")]
    NoResults { code: u8 },

    /// A question record could not be turned into a playable question.
    #[error("invalid question from source: {0}")]
    InvalidQuestion(String),
}

impl SourceError {
    /// Returns `true` for failures caused by connectivity rather than content.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, SourceError::NetworkError(_) | SourceError::Timeout(_))
    }
}
