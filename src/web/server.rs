//! Web server assembly
//!
//! Configuration, router construction, and the serve loop with graceful
//! shutdown on SIGINT/SIGTERM.

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::routes::{app_routes, AppState};
use super::{DEFAULT_BIND, DEFAULT_PORT};
use crate::generator::Registry;
use crate::i18n;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Address to bind to
    pub bind: String,
    /// Interface language when neither query nor header selects one
    pub language: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            language: i18n::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl ServerConfig {
    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the bind address
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    /// Set the default interface language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind, self.port).parse()
    }
}

/// Web server instance
pub struct WebServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a server with default configuration over the given registry
    pub fn new(registry: Registry) -> Self {
        Self::with_config(ServerConfig::default(), registry)
    }

    /// Create a server with the given configuration
    pub fn with_config(config: ServerConfig, registry: Registry) -> Self {
        let state = Arc::new(AppState::new(registry, config.language.clone()));
        Self { config, state }
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router; public so tests can drive it without a socket
    pub fn router(&self) -> Router {
        app_routes()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the server until SIGINT or SIGTERM
    pub async fn run(&self) -> anyhow::Result<()> {
        let addr = self.config.socket_addr()?;
        let router = self.router();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        println!("boxforge listening on http://{}", addr);
        tracing::info!(
            generators = self.state.registry.len(),
            "serving on {}",
            addr
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(wait_for_shutdown_signal())
            .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

/// Returns when SIGTERM or SIGINT is received
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to setup SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to setup SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind, "127.0.0.1");
        assert_eq!(config.language, "en");
    }

    #[test]
    fn test_server_config_builder() {
        let config = ServerConfig::default()
            .with_port(3000)
            .with_bind("0.0.0.0")
            .with_language("de");

        assert_eq!(config.port, 3000);
        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.language, "de");
    }

    #[test]
    fn test_server_config_socket_addr() {
        let config = ServerConfig::default();
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
    }

    #[test]
    fn test_socket_addr_rejects_hostnames() {
        let config = ServerConfig::default().with_bind("localhost");
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_web_server_new() {
        let server = WebServer::new(generators::registry());
        assert_eq!(server.config().port, 8000);
    }

    #[test]
    fn test_web_server_with_config() {
        let config = ServerConfig::default().with_port(9000);
        let server = WebServer::with_config(config, generators::registry());
        assert_eq!(server.config().port, 9000);
    }
}
