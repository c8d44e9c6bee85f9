//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. The Groq client is instantiated here and
//! handed to the relay service as a `CompletionPort`.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use chatrelay_core::{CompletionPort, RelayService};
use chatrelay_groq::{GroqClient, GroqClientConfig};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8000;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Any origin, method and header, with credentials.
    #[default]
    AllowAll,
    /// Allow specific origins only.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host or IP to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// Upstream client configuration, including the API key.
    pub groq: GroqClientConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            groq: GroqClientConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Set the upstream client configuration.
    #[must_use]
    pub fn with_groq(mut self, groq: GroqClientConfig) -> Self {
        self.groq = groq;
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    /// `host:port` string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The relay service behind `/api/chat/`.
    pub relay: Arc<RelayService>,
}

impl AxumContext {
    /// Build a context over any completion port.
    pub fn new(completion: Arc<dyn CompletionPort>) -> Self {
        Self {
            relay: Arc::new(RelayService::new(completion)),
        }
    }
}

/// Bootstrap the relay services from configuration.
///
/// A missing API key is logged, not rejected: calls go out with an empty
/// bearer token and the upstream rejection is relayed like any other error.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    info!(
        target: "chatrelay.config",
        endpoint = %config.groq.endpoint(),
        cors = ?config.cors,
        "Axum bootstrap resolved upstream"
    );

    if !config.groq.has_api_key() {
        warn!("GROQ_API_KEY is not set; upstream calls will be rejected");
    }

    let client = GroqClient::new(config.groq.clone())?;
    Ok(AxumContext::new(Arc::new(client)))
}

/// Run `app` on a pre-bound listener until `cancel` fires.
pub async fn serve(listener: TcpListener, app: Router, cancel: CancellationToken) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("chatrelay listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    info!("chatrelay shut down");
    Ok(())
}

/// Start the web server on the configured address.
pub async fn start_server(config: ServerConfig, cancel: CancellationToken) -> Result<()> {
    let ctx = bootstrap(&config)?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    serve(listener, app, cancel).await
}
