//! HTTP handlers.
//!
//! Handlers translate between HTTP and the relay service; they hold no
//! business logic of their own.

pub mod chat;
