//! HTTP surface of the task-bot.
//!
//! Routes:
//! - `GET /`: greeting, useful as a liveness check.
//! - `POST /post/`: the `/task` slash command.
//! - `POST /interactive_endpoint/`: button clicks.
//! - `POST /event/`: Events API URL verification.
//!
//! The three Slack routes sit behind request signature verification unless it
//! is disabled in the configuration.

pub mod signature;

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{DefaultBodyLimit, State},
    middleware,
    routing::{get, post},
};
use slack_morphism::{prelude::SlackSigningSecret, signature_verifier::SlackEventSignatureVerifier};
use tower_http::trace::TraceLayer;

use crate::{
    base::{config::Config, error::BridgeError, replies},
    interaction::{
        action::{self, ActionForm},
        command::{self, CommandForm},
        event::{self, EventEnvelope, EventReply},
    },
    service::chat::ChatClient,
};

/// Largest request body the bot accepts. Slack payloads are far smaller.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// State shared by every request handler.
///
/// It is designed to be trivially cloneable; nothing in it is mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub chat: ChatClient,
    pub verifier: Arc<SlackEventSignatureVerifier>,
}

impl AppState {
    pub fn new(config: Config, chat: ChatClient) -> Self {
        let secret: SlackSigningSecret = config.slack_signing_secret.clone().into();
        let verifier = Arc::new(SlackEventSignatureVerifier::new(&secret));

        Self { config, chat, verifier }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let slack_routes = Router::new()
        .route("/post/", post(command_endpoint))
        .route("/interactive_endpoint/", post(interactive_endpoint))
        .route("/event/", post(event_endpoint));

    let slack_routes = if state.config.verify_signatures {
        slack_routes.layer(middleware::from_fn_with_state(state.clone(), signature::verify_slack_signature))
    } else {
        slack_routes
    };

    Router::new()
        .route("/", get(index))
        .merge(slack_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Handlers.

async fn index() -> &'static str {
    replies::GREETING
}

async fn command_endpoint(State(state): State<AppState>, Form(form): Form<CommandForm>) -> Result<String, BridgeError> {
    command::handle_command(form, &state.config.command_trigger, &state.chat).await
}

async fn interactive_endpoint(State(state): State<AppState>, Form(form): Form<ActionForm>) -> Result<String, BridgeError> {
    action::handle_action(form, &state.chat).await
}

async fn event_endpoint(Json(envelope): Json<EventEnvelope>) -> Json<EventReply> {
    Json(event::handle_event(envelope))
}
