//! Internal error types for Groq calls.
//!
//! These errors are mapped to `CompletionError` at the port boundary.

use chatrelay_core::CompletionError;
use thiserror::Error;

/// Result type alias for Groq operations.
pub type GroqResult<T> = Result<T, GroqError>;

/// Errors related to Groq API calls.
#[derive(Debug, Error)]
pub enum GroqError {
    /// The HTTP client could not be built from the configuration.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Sending the request or reading the response failed.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

impl From<GroqError> for CompletionError {
    fn from(err: GroqError) -> Self {
        match err {
            GroqError::Decode(e) => Self::InvalidBody(e.to_string()),
            other => Self::Transport(error_chain(&other)),
        }
    }
}

/// Render an error and its sources as `outer: cause: root`.
///
/// reqwest's own `Display` stops at "error sending request"; the cause
/// (refused, timed out, DNS) only appears further down the chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let segment = cause.to_string();
        if !text.contains(&segment) {
            text.push_str(": ");
            text.push_str(&segment);
        }
        source = cause.source();
    }
    text
}
