//! Shared application state type.
//!
//! Defines the `AppState` type used across all handlers and routers.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// This is an Arc-wrapped `AxumContext`. It holds no mutable state, so
/// concurrent requests never contend on it.
pub type AppState = Arc<AxumContext>;
