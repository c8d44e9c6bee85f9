#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    ChatMessage, ChatReply, ChatRequest, CompletionRequest, EXCEPTION_PREFIX, MessageRole,
    SYSTEM_PROMPT, UPSTREAM_ERROR_PREFIX, UPSTREAM_MODEL,
};
pub use ports::{CompletionError, CompletionPort};
pub use services::{DEFAULT_UPSTREAM_ERROR, RelayError, RelayService, interpret_completion};

#[cfg(test)]
use tokio as _;
