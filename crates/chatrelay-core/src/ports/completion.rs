//! Completion port for the upstream language-model API.
//!
//! The relay only needs one thing from upstream: send a payload and get the
//! parsed JSON body back. Interpreting that body is the relay's job, so the
//! port does not inspect status codes or shapes.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::CompletionRequest;

/// Errors raised before an upstream body could be handed back as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// The request could not be sent or the response could not be read.
    #[error("{0}")]
    Transport(String),

    /// The upstream body was not valid JSON.
    #[error("{0}")]
    InvalidBody(String),
}

/// Port for issuing one completion call.
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// Send `request` upstream and return the parsed response body.
    ///
    /// Implementations perform exactly one call, with no retries, and
    /// return whatever JSON came back regardless of the HTTP status.
    async fn complete(&self, request: &CompletionRequest) -> Result<Value, CompletionError>;
}
