//! Groq chat-completions client.

use async_trait::async_trait;
use chatrelay_core::{CompletionError, CompletionPort, CompletionRequest};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;

use crate::config::GroqClientConfig;
use crate::error::{GroqError, GroqResult};

/// Idle connections kept per upstream host.
const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Client for Groq's chat-completions endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GroqClient {
    /// Build a client from configuration.
    pub fn new(config: GroqClientConfig) -> GroqResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(GroqError::Client)?;

        Ok(Self {
            client,
            endpoint: config.endpoint,
            api_key: config.api_key,
        })
    }

    /// Send one completion request and parse the body as JSON.
    ///
    /// The HTTP status is logged but not acted on.
    pub async fn send(&self, request: &CompletionRequest) -> GroqResult<Value> {
        debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        debug!(
            status = status.as_u16(),
            len = bytes.len(),
            "Upstream responded"
        );

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl CompletionPort for GroqClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Value, CompletionError> {
        self.send(request).await.map_err(CompletionError::from)
    }
}
