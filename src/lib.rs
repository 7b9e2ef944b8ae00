//! rollbot - dice-rolling chat bot
//!
//! Serves signed interaction webhooks and answers `/roll` with an evaluated
//! dice expression.

pub mod api;
pub mod commands;
pub mod config;
pub mod dice;
pub mod discord;

use std::net::SocketAddr;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

use api::SignatureVerifier;
pub use config::Config;
use dice::Evaluator;

/// The rollbot server instance
pub struct Server {
    config: Config,
    verifier: SignatureVerifier,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Server {
    /// Create a new server instance
    ///
    /// Fails if the public key is missing or invalid.
    pub fn new(config: Config) -> Result<Self> {
        let verifier = SignatureVerifier::from_hex(config.require_public_key()?)?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            config,
            verifier,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Build the router
    fn router(&self) -> Router {
        api::router(self.verifier.clone(), Evaluator::new(self.config.max_dice))
    }

    /// Run the server until shutdown
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("rollbot listening on {}", local_addr);

        let router = self.router();
        let mut shutdown_rx = self.shutdown_rx.clone();

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_rx.changed().await.ok();
            })
            .await?;

        info!("rollbot shutdown complete");
        Ok(())
    }

    /// Signal the server to shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Get the configured bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.config.bind_addr
    }
}
