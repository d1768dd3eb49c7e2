//! Handles clicks on the "Complete" button.

use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{
    base::{error::BridgeError, replies},
    codec::{self, COMPLETE_ACTION_VALUE},
    service::chat::ChatClient,
};

/// Interaction requests carry a single form field holding the JSON payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionForm {
    pub payload: String,
}

/// Marks a task complete.
///
/// Tells the requester the task is done, then replaces the assignment message
/// (and its button) with a completion notice.
#[instrument(skip_all)]
pub async fn handle_action(form: ActionForm, chat: &ChatClient) -> Result<String, BridgeError> {
    let action = codec::decode_interactive_action(&form.payload)?;

    // Other buttons may sit on messages that do not follow the assignment layout.

    if action.action_value != COMPLETE_ACTION_VALUE {
        warn!("Received unhandled action value `{}`.", action.action_value);
        return Ok(replies::unsupported_action(&action.action_value));
    }

    let requester_id = action.requester_id()?;
    let description = action.description()?;

    // Notify the requester first; the edit below removes the button for good.

    let notice = codec::encode_completion_notice(description, &action.acting_user_id);
    chat.post_text(requester_id, &notice).await?;

    let blocks = codec::encode_completion_message(description, requester_id);
    let fallback = format!("You completed the task '{description}'");
    chat.update_blocks(&action.channel_id, &action.message_timestamp, &fallback, &blocks).await?;

    info!("{} completed a task assigned by {}.", action.acting_user_id, requester_id);

    Ok(replies::TASK_COMPLETED.to_string())
}
