//! Runtime services and shared state for the task-bot.

use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    server::{self, AppState},
    service::chat::ChatClient,
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the slack client and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the slack client.
        let chat = ChatClient::slack(&config).await?;

        Ok(Self { config, chat })
    }

    /// Build the HTTP router over this runtime's services.
    pub fn router(&self) -> Router {
        server::router(AppState::new(self.config.clone(), self.chat.clone()))
    }

    /// Serve webhooks until Ctrl-C.
    pub async fn start(&self) -> Void {
        let address = self.config.listen_address()?;
        let listener = TcpListener::bind(address).await?;

        info!("Listening for Slack webhooks on {} ...", address);

        axum::serve(listener, self.router()).with_graceful_shutdown(shutdown_signal()).await?;

        info!("Server stopped.");

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", err);
        return;
    }

    info!("Received Ctrl-C, shutting down ...");
}
