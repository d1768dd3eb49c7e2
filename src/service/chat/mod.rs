pub mod slack;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use slack_morphism::prelude::SlackBlock;

use crate::base::types::Void;

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// This trait covers the outbound half of the bot: posting and editing messages.
/// Webhook handlers only ever see this trait, so tests can swap in a mock.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Post a Block Kit message to a channel or user.
    ///
    /// `text` is the plain-text fallback used in notifications.
    async fn post_blocks(&self, channel_id: &str, text: &str, blocks: &[SlackBlock]) -> Void;

    /// Post a plain-text message to a channel or user.
    async fn post_text(&self, channel_id: &str, text: &str) -> Void;

    /// Replace the blocks of an existing message.
    async fn update_blocks(&self, channel_id: &str, ts: &str, text: &str, blocks: &[SlackBlock]) -> Void;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
