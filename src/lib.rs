//! Library root for `task-bot`.
//!
//! Task-bot is a Slack app that hands out tasks:
//! - `/task @user do the thing` posts the task to `@user` with a "Complete" button
//! - Clicking "Complete" notifies whoever assigned the task and closes out the message
//!
//! Nothing is stored between requests. The bot is a set of webhook handlers
//! around a small codec that turns command text into Block Kit messages and
//! back, with the Slack Web API behind a trait so it can be swapped in tests.

#[deny(missing_docs)]
pub mod base;
pub mod codec;
pub mod interaction;
pub mod runtime;
pub mod server;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::{info, warn};

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the task-bot runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with the Slack client
/// - Serves the webhook endpoints until shutdown
pub async fn start(config: Config) -> Void {
    info!("Starting task-bot ...");

    // Start the crypto provider.
    if crypto::ring::default_provider().install_default().is_err() {
        warn!("A crypto provider was already installed; keeping it.");
    }

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
