//! Command-line arguments.
//!
//! Every flag that carries configuration also reads an environment
//! variable, so the server can be configured from a `.env` file alone.

use clap::Parser;

use chatrelay_axum::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
use chatrelay_groq::{GROQ_CHAT_COMPLETIONS_URL, GroqClientConfig};

/// Relay chat messages from a frontend to the Groq completion API.
#[derive(Debug, Parser)]
#[command(name = "chatrelay")]
#[command(about = "Relay chat messages from a frontend to the Groq completion API")]
#[command(version)]
pub struct Cli {
    /// Host or IP to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "CHATRELAY_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Groq API key sent as the bearer token
    #[arg(long = "api-key", env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat-completions endpoint to relay to
    #[arg(
        long = "upstream-url",
        env = "GROQ_API_URL",
        default_value = GROQ_CHAT_COMPLETIONS_URL
    )]
    pub upstream_url: String,

    /// Restrict CORS to this origin (repeatable). All origins are allowed when omitted.
    #[arg(long = "allowed-origin", value_name = "ORIGIN")]
    pub allowed_origins: Vec<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Build the server configuration from parsed arguments.
    ///
    /// A missing API key becomes an empty one; the server still starts.
    pub fn server_config(&self) -> ServerConfig {
        let groq = GroqClientConfig::new()
            .with_endpoint(self.upstream_url.clone())
            .with_api_key(self.api_key.clone().unwrap_or_default());

        let config = ServerConfig {
            host: self.host.clone(),
            port: self.port,
            ..ServerConfig::default()
        }
        .with_groq(groq);

        if self.allowed_origins.is_empty() {
            config
        } else {
            config.with_allowed_origins(self.allowed_origins.clone())
        }
    }
}
