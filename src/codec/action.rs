//! Decoding of `block_actions` interaction payloads.

use serde::Deserialize;

use crate::base::error::BridgeError;

use super::command::parse_mention;

/// Text of a block, as sent back to us inside an interaction payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlockText {
    pub text: String,
}

/// A block of the message the button was clicked on.
///
/// Only the fields the bot reads are decoded; everything else Slack sends is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<BlockText>,
}

/// A decoded button click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractiveAction {
    /// Value of the clicked button.
    pub action_value: String,
    /// The user who clicked (the assignee).
    pub acting_user_id: String,
    /// Blocks of the message that carried the button, in order.
    pub source_message_blocks: Vec<MessageBlock>,
    /// Channel of the message, used to edit it.
    pub channel_id: String,
    /// Timestamp of the message, used to edit it.
    pub message_timestamp: String,
}

impl InteractiveAction {
    /// Text of the block at `index`, if that block has text.
    pub fn block_text(&self, index: usize) -> Option<&str> {
        self.source_message_blocks.get(index)?.text.as_ref().map(|t| t.text.as_str())
    }

    /// The user who assigned the task.
    ///
    /// Nothing is persisted between the two requests, so this is read back
    /// from the mention at the start of the assignment message.
    pub fn requester_id(&self) -> Result<&str, BridgeError> {
        let text = self.block_text(0).ok_or_else(|| BridgeError::MalformedPayload("message has no requester block".to_string()))?;

        parse_mention(text)
            .map(|(id, _)| id)
            .map_err(|e| BridgeError::MalformedPayload(format!("requester block has no mention: {e}")))
    }

    /// The task description, read back from the second block.
    pub fn description(&self) -> Result<&str, BridgeError> {
        self.block_text(1).ok_or_else(|| BridgeError::MalformedPayload("message has no task description block".to_string()))
    }
}

// Wire shapes.

#[derive(Deserialize)]
struct Payload {
    message: PayloadMessage,
    user: PayloadUser,
    actions: Vec<PayloadAction>,
    container: PayloadContainer,
}

#[derive(Deserialize)]
struct PayloadMessage {
    blocks: Vec<MessageBlock>,
}

#[derive(Deserialize)]
struct PayloadUser {
    id: String,
}

#[derive(Deserialize)]
struct PayloadAction {
    value: String,
}

#[derive(Deserialize)]
struct PayloadContainer {
    channel_id: String,
    message_ts: String,
}

/// Decode the JSON found in the `payload` form field of an interaction request.
pub fn decode_interactive_action(payload: &str) -> Result<InteractiveAction, BridgeError> {
    let payload: Payload = serde_json::from_str(payload).map_err(|e| BridgeError::MalformedPayload(e.to_string()))?;

    let action = payload
        .actions
        .into_iter()
        .next()
        .ok_or_else(|| BridgeError::MalformedPayload("payload contains no actions".to_string()))?;

    Ok(InteractiveAction {
        action_value: action.value,
        acting_user_id: payload.user.id,
        source_message_blocks: payload.message.blocks,
        channel_id: payload.container.channel_id,
        message_timestamp: payload.container.message_ts,
    })
}

// Tests.
