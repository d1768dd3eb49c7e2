//! Block Kit layouts for assignment and completion messages.

use slack_morphism::prelude::*;

use super::command::TaskAssignment;

/// Value carried by the "Complete" button.
pub const COMPLETE_ACTION_VALUE: &str = "complete";

/// Action ID of the "Complete" button.
pub const COMPLETE_ACTION_ID: &str = "complete_task";

/// Render a user ID as a Slack mention, tolerating a leading `@`.
fn mention(user_id: &str) -> String {
    format!("<@{}>", user_id.trim_start_matches('@'))
}

fn markdown_section(text: String) -> SlackBlock {
    SlackBlock::Section(SlackSectionBlock::new().with_text(SlackBlockText::MarkDown(SlackBlockMarkDownText::new(text))))
}

/// The message posted to the assignee.
///
/// Three blocks, always in this order:
/// 1. who assigned the task,
/// 2. the task description, verbatim,
/// 3. a primary "Complete" button.
///
/// The interactive handler reads the requester back out of the first block and
/// the description out of the second, so this layout must stay stable.
pub fn encode_assignment_message(description: &str, requester_id: &str) -> Vec<SlackBlock> {
    let complete_button = SlackBlockButtonElement::new(SlackBlockPlainText::new("Complete".to_string()).with_emoji(true).into())
        .with_action_id(SlackActionId(COMPLETE_ACTION_ID.to_string()))
        .with_style(SlackBlockButtonStyle::Primary)
        .with_value(COMPLETE_ACTION_VALUE.to_string());

    vec![
        markdown_section(format!("{} has assigned you the following task:", mention(requester_id))),
        markdown_section(description.to_string()),
        SlackBlock::Actions(SlackActionsBlock::new(vec![SlackActionBlockElement::Button(complete_button)])),
    ]
}

/// The blocks that replace the assignment message once the task is done.
pub fn encode_completion_message(description: &str, requester_id: &str) -> Vec<SlackBlock> {
    vec![markdown_section(format!(
        "Congratulations! You completed the task '{}' assigned by {}",
        description,
        mention(requester_id)
    ))]
}

/// Plain-text fallback for the assignment message, shown in notifications.
pub fn encode_assignment_fallback(description: &str, requester_id: &str) -> String {
    format!("{} has assigned you a task: {}", mention(requester_id), description)
}

/// The notice sent to the requester when the assignee completes the task.
pub fn encode_completion_notice(description: &str, assignee_id: &str) -> String {
    format!("{} has completed the task: {}!", mention(assignee_id), description)
}

/// The slash command reply confirming who got the task.
pub fn encode_assignment_confirmation(assignment: &TaskAssignment) -> String {
    format!("{} has been assigned the task \"{}\"", mention(&assignment.assignee_id), assignment.description)
}

// Tests.
