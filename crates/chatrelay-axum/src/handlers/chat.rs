//! Chat relay handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use chatrelay_core::{ChatReply, ChatRequest};
use tracing::debug;

use crate::state::AppState;

/// Relay one message upstream.
/// POST /api/chat/
///
/// The body is read raw so that malformed JSON degrades to an empty
/// message instead of a 4xx rejection. Always answers 200.
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Json<ChatReply> {
    let request = ChatRequest::from_body(&body);
    debug!(
        message_len = request.message.as_str().map_or(0, str::len),
        message_is_string = request.message.is_string(),
        "POST /api/chat/"
    );

    Json(state.relay.handle_chat(request).await)
}
