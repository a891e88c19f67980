//! Server Implementation
//!
//! HTTP server startup and graceful shutdown

use std::net::SocketAddr;

use tokio_util::sync::CancellationToken;

use crate::core::{Config, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
    shutdown_token: CancellationToken,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Create a server over existing state (tests, embedded setups)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Token observed for shutdown; cancel it to stop the server
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// Request a graceful shutdown
    pub fn shutdown(&self) {
        tracing::info!("Shutting down server");
        self.shutdown_token.cancel();
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(state) => state.clone(),
            None => ServerState::initialize(&self.config),
        };

        let app = crate::api::app(state);
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, environment = %self.config.environment, "HTTP server listening");

        // ctrl-c cancels the shutdown token
        let token = self.shutdown_token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Received ctrl-c, shutting down");
                token.cancel();
            }
        });

        let token = self.shutdown_token.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { token.cancelled().await })
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
