//! The relay operation: one inbound message in, one reply out.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{ChatReply, ChatRequest, CompletionRequest};
use crate::ports::{CompletionError, CompletionPort};

/// Message used when the upstream body has neither `choices` nor `error.message`.
pub const DEFAULT_UPSTREAM_ERROR: &str = "Unknown Groq API error";

/// Everything that can keep the relay from producing generated text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Upstream answered without `choices`; carries its error message.
    #[error("{0}")]
    Upstream(String),

    /// The call failed or the body was not JSON.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// The body was JSON but not shaped like a completion.
    #[error("{0}")]
    MalformedResponse(String),
}

impl From<RelayError> for ChatReply {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::Upstream(message) => Self::upstream_error(&message),
            other => Self::exception(&other.to_string()),
        }
    }
}

/// Relays chat messages to the upstream completion API.
///
/// Holds no per-request state; one instance serves every request.
#[derive(Clone)]
pub struct RelayService {
    completion: Arc<dyn CompletionPort>,
}

impl RelayService {
    /// Create a relay over the given completion port.
    pub fn new(completion: Arc<dyn CompletionPort>) -> Self {
        Self { completion }
    }

    /// Handle one chat request.
    ///
    /// Always yields a reply: generated text on success, otherwise a
    /// human-readable error string.
    pub async fn handle_chat(&self, request: ChatRequest) -> ChatReply {
        match self.relay(request.message).await {
            Ok(content) => ChatReply::text(content),
            Err(err) => {
                debug!(error = %err, "Relay fell back to an error reply");
                ChatReply::from(err)
            }
        }
    }

    async fn relay(&self, message: Value) -> Result<String, RelayError> {
        let payload = CompletionRequest::for_user_message(message);
        let body = self.completion.complete(&payload).await?;

        info!(target: "chatrelay.upstream", body = %body, "Groq API response");

        interpret_completion(&body)
    }
}

/// Map a parsed upstream body onto generated text or an error.
///
/// A body without `choices` is an upstream error whose message comes from
/// `error.message`, or the default when that is absent or `null`.
/// Otherwise `choices[0].message.content` must be a string.
pub fn interpret_completion(body: &Value) -> Result<String, RelayError> {
    let Some(object) = body.as_object() else {
        return Err(RelayError::MalformedResponse(format!(
            "expected a JSON object from upstream, got {}",
            describe(body)
        )));
    };

    let Some(choices) = object.get("choices") else {
        return Err(RelayError::Upstream(upstream_error_message(
            object.get("error"),
        )?));
    };

    let first = match choices {
        Value::Array(items) => items
            .first()
            .ok_or_else(|| RelayError::MalformedResponse("`choices` is empty".to_string()))?,
        other => {
            return Err(RelayError::MalformedResponse(format!(
                "`choices` is {}, expected an array",
                describe(other)
            )));
        }
    };

    let content = first
        .get("message")
        .ok_or_else(|| missing("choices[0].message"))?
        .get("content")
        .ok_or_else(|| missing("choices[0].message.content"))?;

    match content {
        Value::String(text) => Ok(text.clone()),
        other => Err(RelayError::MalformedResponse(format!(
            "`choices[0].message.content` is {}, expected a string",
            describe(other)
        ))),
    }
}

fn upstream_error_message(error: Option<&Value>) -> Result<String, RelayError> {
    match error {
        None => Ok(DEFAULT_UPSTREAM_ERROR.to_string()),
        Some(Value::Object(fields)) => Ok(match fields.get("message") {
            None | Some(Value::Null) => DEFAULT_UPSTREAM_ERROR.to_string(),
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
        }),
        Some(other) => Err(RelayError::MalformedResponse(format!(
            "`error` is {}, expected an object",
            describe(other)
        ))),
    }
}

fn missing(path: &str) -> RelayError {
    RelayError::MalformedResponse(format!("missing field `{path}`"))
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use serde_json::json;

    mock! {
        Completion {}

        #[async_trait]
        impl CompletionPort for Completion {
            async fn complete(&self, request: &CompletionRequest) -> Result<Value, CompletionError>;
        }
    }

    fn relay_returning(result: Result<Value, CompletionError>) -> RelayService {
        let mut port = MockCompletion::new();
        port.expect_complete()
            .times(1)
            .returning(move |_| result.clone());
        RelayService::new(Arc::new(port))
    }

    #[test]
    fn test_interpret_success() {
        let body = json!({"choices": [{"message": {"content": "Hello"}}]});
        assert_eq!(interpret_completion(&body), Ok("Hello".to_string()));
    }

    #[test]
    fn test_interpret_uses_first_choice() {
        let body = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ]
        });
        assert_eq!(interpret_completion(&body), Ok("first".to_string()));
    }

    #[test]
    fn test_interpret_upstream_error_message() {
        let body = json!({"error": {"message": "invalid_api_key", "type": "invalid_request_error"}});
        assert_eq!(
            interpret_completion(&body),
            Err(RelayError::Upstream("invalid_api_key".to_string()))
        );
    }

    #[test]
    fn test_interpret_default_upstream_error() {
        assert_eq!(
            interpret_completion(&json!({})),
            Err(RelayError::Upstream(DEFAULT_UPSTREAM_ERROR.to_string()))
        );
        assert_eq!(
            interpret_completion(&json!({"error": {"code": 401}})),
            Err(RelayError::Upstream(DEFAULT_UPSTREAM_ERROR.to_string()))
        );
    }

    #[test]
    fn test_interpret_null_error_message_uses_default() {
        assert_eq!(
            interpret_completion(&json!({"error": {"message": null}})),
            Err(RelayError::Upstream(DEFAULT_UPSTREAM_ERROR.to_string()))
        );
        assert_eq!(
            interpret_completion(&json!({"error": {"message": 429}})),
            Err(RelayError::Upstream("429".to_string()))
        );
    }

    #[test]
    fn test_interpret_malformed_shapes() {
        let cases = [
            json!([]),
            json!("text"),
            json!(null),
            json!({"choices": []}),
            json!({"choices": {}}),
            json!({"choices": [{}]}),
            json!({"choices": [{"message": {}}]}),
            json!({"choices": [{"message": {"content": null}}]}),
            json!({"choices": [{"message": {"content": 7}}]}),
            json!({"error": "bad"}),
            json!({"error": null}),
        ];

        for body in cases {
            assert!(
                matches!(
                    interpret_completion(&body),
                    Err(RelayError::MalformedResponse(_))
                ),
                "expected malformed response for {body}"
            );
        }
    }

    #[test]
    fn test_error_reply_prefixes() {
        let reply = ChatReply::from(RelayError::Upstream("rate limited".to_string()));
        assert_eq!(reply.response, "⚠️ Groq API error: rate limited");

        let reply = ChatReply::from(RelayError::Completion(CompletionError::Transport(
            "connection refused".to_string(),
        )));
        assert_eq!(reply.response, "⚠️ Exception: connection refused");

        let reply = ChatReply::from(RelayError::MalformedResponse("`choices` is empty".to_string()));
        assert_eq!(reply.response, "⚠️ Exception: `choices` is empty");
    }

    #[tokio::test]
    async fn test_handle_chat_forwards_message_verbatim() {
        let mut port = MockCompletion::new();
        port.expect_complete()
            .withf(|request| {
                request.model == "llama-3.1-8b-instant"
                    && request.messages.len() == 2
                    && request.messages[0].content == "You are a helpful AI writing assistant."
                    && request.user_content() == Some(&json!("  Make this shorter, please. "))
            })
            .times(1)
            .returning(|_| Ok(json!({"choices": [{"message": {"content": "Shorter."}}]})));

        let relay = RelayService::new(Arc::new(port));
        let reply = relay
            .handle_chat(ChatRequest::new("  Make this shorter, please. "))
            .await;

        assert_eq!(reply, ChatReply::text("Shorter."));
    }

    #[tokio::test]
    async fn test_handle_chat_empty_message() {
        let mut port = MockCompletion::new();
        port.expect_complete()
            .withf(|request| request.user_content() == Some(&json!("")))
            .times(1)
            .returning(|_| Ok(json!({"choices": [{"message": {"content": "Hi!"}}]})));

        let relay = RelayService::new(Arc::new(port));
        let reply = relay.handle_chat(ChatRequest::from_body(b"{}")).await;

        assert_eq!(reply.response, "Hi!");
    }

    #[tokio::test]
    async fn test_handle_chat_forwards_non_string_message() {
        let mut port = MockCompletion::new();
        port.expect_complete()
            .withf(|request| request.user_content() == Some(&json!(42)))
            .times(1)
            .returning(|_| Ok(json!({"choices": [{"message": {"content": "42 is a number."}}]})));

        let relay = RelayService::new(Arc::new(port));
        let reply = relay
            .handle_chat(ChatRequest::from_body(br#"{"message": 42}"#))
            .await;

        assert_eq!(reply.response, "42 is a number.");
    }

    #[tokio::test]
    async fn test_handle_chat_upstream_error() {
        let relay = relay_returning(Ok(json!({"error": {"message": "invalid_api_key"}})));
        let reply = relay.handle_chat(ChatRequest::new("hello")).await;
        assert_eq!(reply.response, "⚠️ Groq API error: invalid_api_key");
    }

    #[tokio::test]
    async fn test_handle_chat_empty_body() {
        let relay = relay_returning(Ok(json!({})));
        let reply = relay.handle_chat(ChatRequest::new("hello")).await;
        assert_eq!(reply.response, "⚠️ Groq API error: Unknown Groq API error");
    }

    #[tokio::test]
    async fn test_handle_chat_transport_failure() {
        let relay = relay_returning(Err(CompletionError::Transport(
            "error sending request".to_string(),
        )));
        let reply = relay.handle_chat(ChatRequest::new("hello")).await;
        assert_eq!(reply.response, "⚠️ Exception: error sending request");
    }

    #[tokio::test]
    async fn test_handle_chat_invalid_body() {
        let relay = relay_returning(Err(CompletionError::InvalidBody(
            "expected value at line 1 column 1".to_string(),
        )));
        let reply = relay.handle_chat(ChatRequest::new("hello")).await;
        assert_eq!(
            reply.response,
            "⚠️ Exception: expected value at line 1 column 1"
        );
    }

    #[tokio::test]
    async fn test_handle_chat_malformed_body() {
        let relay = relay_returning(Ok(json!({"choices": []})));
        let reply = relay.handle_chat(ChatRequest::new("hello")).await;
        assert!(reply.response.starts_with("⚠️ Exception: "));
    }
}
