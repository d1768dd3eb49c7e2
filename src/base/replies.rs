//! Fixed replies the bot sends back to Slack.

/// Greeting served from the root route.
pub const GREETING: &str = "Hello there! The task bot is up.";

/// Reply to the interactive endpoint once a task has been marked complete.
pub const TASK_COMPLETED: &str = "Task marked as complete.";

/// Error body for event callbacks that carry no verification challenge.
pub const NO_CHALLENGE: &str = "no challenge found";

/// Reply to a slash command whose text could not be parsed into an assignee and a task.
pub fn usage(trigger: &str) -> String {
    format!("Please make sure you formatted your message correctly! Usage: {trigger} @user <task description>")
}

/// Reply to a slash command that is not the configured trigger.
pub fn unknown_command(command: &str) -> String {
    format!("Unknown command `{command}`.")
}

/// Reply to a button click whose action value the bot does not handle.
pub fn unsupported_action(value: &str) -> String {
    format!("Ignored unsupported action '{value}'.")
}

// Tests.
