//! Public configuration for the Groq client.

use std::fmt;
use std::time::Duration;

/// Groq's OpenAI-compatible chat-completions endpoint.
pub const GROQ_CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Configuration for the Groq client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use chatrelay_groq::GroqClientConfig;
///
/// let config = GroqClientConfig::new()
///     .with_api_key("gsk_test")
///     .with_endpoint("http://127.0.0.1:9000/v1/chat/completions");
/// ```
#[derive(Clone)]
pub struct GroqClientConfig {
    /// Full URL of the chat-completions endpoint
    pub(crate) endpoint: String,
    /// Bearer token; may be empty, in which case upstream rejects the call
    pub(crate) api_key: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout; `None` keeps the HTTP client's default
    pub(crate) timeout: Option<Duration>,
}

impl Default for GroqClientConfig {
    fn default() -> Self {
        Self {
            endpoint: GROQ_CHAT_COMPLETIONS_URL.to_string(),
            api_key: String::new(),
            user_agent: concat!("chatrelay/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }
}

// The key stays out of logs.
impl fmt::Debug for GroqClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key_set", &!self.api_key.is_empty())
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GroqClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key sent as the bearer token.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the chat-completions endpoint.
    ///
    /// Defaults to [`GROQ_CHAT_COMPLETIONS_URL`].
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a request timeout. Unset by default.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Whether a non-empty API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}
