//! Slack Web API implementation of the chat service.
//!
//! Posts assignment and completion messages and edits them in place, using the
//! bot token from the configuration. Every call is bounded by the configured
//! Slack API timeout; failures are returned to the caller, never retried.

use crate::base::{
    config::Config,
    types::{Res, Void},
};
use anyhow::anyhow;
use async_trait::async_trait;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use slack_morphism::{errors::SlackClientError, prelude::*};
use tracing::{info, instrument};

use std::{future::Future, sync::Arc, time::Duration};

use super::{ChatClient, GenericChatClient};

// Type aliases.

type FullClient = slack_morphism::SlackClient<SlackClientHyperConnector<HttpsConnector<HttpConnector>>>;

// Extra methods on `ChatClient` applied by the slack implementation.

impl ChatClient {
    /// Creates a new Slack chat client.
    pub async fn slack(config: &Config) -> Res<Self> {
        let client = SlackChatClient::new(config).await?;
        Ok(Self { inner: Arc::new(client) })
    }
}

impl From<SlackChatClient> for ChatClient {
    fn from(client: SlackChatClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Structs.

/// Slack client implementation.
#[derive(Clone)]
pub struct SlackChatClient {
    bot_token: SlackApiToken,
    client: Arc<FullClient>,
    timeout: Duration,
}

impl SlackChatClient {
    /// Create a new Slack chat client.
    ///
    /// Checks the bot token with `auth.test` so a bad token fails at startup
    /// instead of on the first slash command.
    #[instrument(name = "SlackChatClient::new", skip_all)]
    pub async fn new(config: &Config) -> Res<Self> {
        let bot_token = SlackApiToken::new(SlackApiTokenValue(config.slack_bot_token.clone()));

        // Initialize the Slack client.

        let https_connector = HttpsConnector::<HttpConnector>::builder().with_native_roots()?.https_only().enable_all_versions().build();
        let connector = SlackClientHyperConnector::with_connector(https_connector);
        let client = Arc::new(slack_morphism::SlackClient::new(connector));

        let result = Self {
            bot_token,
            client,
            timeout: config.slack_api_timeout(),
        };

        // Get the bot's user ID.

        {
            let session = result.client.open_session(&result.bot_token);
            let bot_user = bounded(result.timeout, "check the bot token", session.auth_test()).await?;

            info!("Slack bot user ID: {}", bot_user.user_id.0);
        }

        Ok(result)
    }
}

/// Await a Slack call, failing if it takes longer than `timeout`.
async fn bounded<T, F>(timeout: Duration, what: &str, call: F) -> Res<T>
where
    F: Future<Output = Result<T, SlackClientError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result.map_err(|e| anyhow!("Failed to {}: {}", what, e)),
        Err(_) => Err(anyhow!("Failed to {}: timed out after {:?}", what, timeout)),
    }
}

#[async_trait]
impl GenericChatClient for SlackChatClient {
    #[instrument(skip(self, blocks))]
    async fn post_blocks(&self, channel_id: &str, text: &str, blocks: &[SlackBlock]) -> Void {
        let message = SlackMessageContent::new().with_text(text.to_string()).with_blocks(blocks.to_vec());
        let request = SlackApiChatPostMessageRequest::new(SlackChannelId(channel_id.to_string()), message);

        let session = self.client.open_session(&self.bot_token);

        let response = bounded(self.timeout, "post message", session.chat_post_message(&request)).await?;
        info!("Posted message {} to {}", response.ts.0, response.channel.0);

        Ok(())
    }

    #[instrument(skip(self))]
    async fn post_text(&self, channel_id: &str, text: &str) -> Void {
        let message = SlackMessageContent::new().with_text(text.to_string());
        let request = SlackApiChatPostMessageRequest::new(SlackChannelId(channel_id.to_string()), message).with_link_names(true);

        let session = self.client.open_session(&self.bot_token);

        let response = bounded(self.timeout, "post message", session.chat_post_message(&request)).await?;
        info!("Posted notice {} to {}", response.ts.0, response.channel.0);

        Ok(())
    }

    #[instrument(skip(self, blocks))]
    async fn update_blocks(&self, channel_id: &str, ts: &str, text: &str, blocks: &[SlackBlock]) -> Void {
        let message = SlackMessageContent::new().with_text(text.to_string()).with_blocks(blocks.to_vec());
        let request = SlackApiChatUpdateRequest::new(SlackChannelId(channel_id.to_string()), message, SlackTs(ts.to_string()));

        let session = self.client.open_session(&self.bot_token);

        bounded(self.timeout, "update message", session.chat_update(&request)).await?;
        info!("Updated message {} in {}", ts, channel_id);

        Ok(())
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;
    use slack_morphism::errors::SlackClientApiError;

    #[tokio::test(start_paused = true)]
    async fn test_slow_call_times_out() {
        let err = bounded(Duration::from_secs(10), "post message", std::future::pending::<Result<(), SlackClientError>>())
            .await
            .unwrap_err()
            .to_string();

        assert!(err.starts_with("Failed to post message"));
        assert!(err.contains("timed out after 10s"));
    }

    #[tokio::test]
    async fn test_api_error_is_mapped() {
        let failure = SlackClientError::ApiError(SlackClientApiError::new("channel_not_found".to_string()));

        let err = bounded(Duration::from_secs(10), "update message", async { Err::<(), _>(failure) })
            .await
            .unwrap_err()
            .to_string();

        assert!(err.starts_with("Failed to update message: "));
        assert!(!err.contains("timed out"));
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let value = bounded(Duration::from_secs(10), "check the bot token", async { Ok::<_, SlackClientError>(42) }).await.unwrap();

        assert_eq!(value, 42);
    }
}
