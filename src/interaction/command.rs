//! Handles the `/task` slash command.

use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{
    base::{error::BridgeError, replies},
    codec,
    service::chat::ChatClient,
};

/// The fields of a slash command request the bot reads.
///
/// Slack sends many more (`team_id`, `response_url`, ...), which are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandForm {
    pub command: String,
    #[serde(default)]
    pub text: String,
    pub user_id: String,
}

/// Assigns a task to the mentioned user.
///
/// Returns the text to reply with. Unparseable command text is answered with
/// usage instructions rather than an error, since Slack shows the reply
/// directly to the user who typed the command.
#[instrument(skip_all, fields(command = %form.command, requester = %form.user_id))]
pub async fn handle_command(form: CommandForm, trigger: &str, chat: &ChatClient) -> Result<String, BridgeError> {
    if form.command != trigger {
        warn!("Received unhandled command.");
        return Ok(replies::unknown_command(&form.command));
    }

    let assignment = match codec::decode_command(&form.text, &form.user_id) {
        Ok(assignment) => assignment,
        Err(err) => {
            info!("Rejecting command text: {}", err);
            return Ok(replies::usage(trigger));
        }
    };

    let blocks = codec::encode_assignment_message(&assignment.description, &assignment.requester_id);
    let fallback = codec::encode_assignment_fallback(&assignment.description, &assignment.requester_id);

    chat.post_blocks(&assignment.assignee_id, &fallback, &blocks).await?;

    info!("Assigned task to {}.", assignment.assignee_id);

    Ok(codec::encode_assignment_confirmation(&assignment))
}
