//! Parsing of slash command text into a task assignment.

use crate::base::error::BridgeError;

/// A task handed from one Slack user to another.
///
/// Built from the slash command text when the command arrives, and consumed
/// immediately to post the assignment message. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAssignment {
    /// The Slack user the task is assigned to (e.g. `U123`).
    pub assignee_id: String,
    /// The Slack user who issued the command.
    pub requester_id: String,
    /// What needs doing, trimmed and non-empty.
    pub description: String,
}

/// Find the first user mention in `text`.
///
/// A mention looks like `<@U123>` or `<@U123|jane>`. The display label after
/// `|` is discarded, as is the leading `@`. Returns the user ID and the text
/// following the closing `>`.
pub fn parse_mention(text: &str) -> Result<(&str, &str), BridgeError> {
    let start = text.find('<').ok_or_else(|| BridgeError::Parse("no user mention found".to_string()))?;
    let after_open = &text[start + 1..];

    let end = after_open.find('>').ok_or_else(|| BridgeError::Parse("user mention is not closed with `>`".to_string()))?;
    let raw = &after_open[..end];
    let rest = &after_open[end + 1..];

    let id = raw.split_once('|').map_or(raw, |(id, _label)| id);

    // Channel links (`<#C1|general>`) and special mentions (`<!here>`) can't be assigned tasks.
    let Some(id) = id.strip_prefix('@') else {
        return Err(BridgeError::Parse(format!("`<{raw}>` is not a user mention")));
    };

    if id.is_empty() || id.contains(char::is_whitespace) {
        return Err(BridgeError::Parse(format!("`<{raw}>` does not name a user")));
    }

    Ok((id, rest))
}

/// Decode the text of a task command into a [`TaskAssignment`].
///
/// The text must start with (or contain) a user mention, followed by the task
/// description. Anything before the mention is ignored.
pub fn decode_command(text: &str, requester_id: &str) -> Result<TaskAssignment, BridgeError> {
    let (assignee_id, rest) = parse_mention(text)?;

    let description = rest.trim();
    if description.is_empty() {
        return Err(BridgeError::Parse("task description is empty".to_string()));
    }

    Ok(TaskAssignment {
        assignee_id: assignee_id.to_string(),
        requester_id: requester_id.to_string(),
        description: description.to_string(),
    })
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_mention() {
        let task = decode_command("<@U123> write the report", "U9").unwrap();

        assert_eq!(task.assignee_id, "U123");
        assert_eq!(task.requester_id, "U9");
        assert_eq!(task.description, "write the report");
    }

    #[test]
    fn test_decode_discards_display_label() {
        let task = decode_command("<@U123|Jane> write the report", "U9").unwrap();

        assert_eq!(task.assignee_id, "U123");
        assert_eq!(task.description, "write the report");
    }

    #[test]
    fn test_decode_trims_description() {
        let task = decode_command("  <@U123>\t  write the report \n", "U9").unwrap();

        assert_eq!(task.description, "write the report");
    }

    #[test]
    fn test_decode_keeps_later_mentions_in_description() {
        let task = decode_command("<@U123> pair with <@U456> on the report", "U9").unwrap();

        assert_eq!(task.assignee_id, "U123");
        assert_eq!(task.description, "pair with <@U456> on the report");
    }

    #[test]
    fn test_decode_rejects_empty_description() {
        let err = decode_command("<@U123>   ", "U9").unwrap_err();

        assert!(matches!(err, BridgeError::Parse(_)));
    }

    #[test]
    fn test_decode_rejects_missing_mention() {
        assert!(matches!(decode_command("write the report", "U9"), Err(BridgeError::Parse(_))));
        assert!(matches!(decode_command("", "U9"), Err(BridgeError::Parse(_))));
    }

    #[test]
    fn test_decode_rejects_unclosed_mention() {
        assert!(matches!(decode_command("<@U123 write the report", "U9"), Err(BridgeError::Parse(_))));
    }

    #[test]
    fn test_decode_rejects_close_before_open() {
        // The `>` must come after the `<`.
        assert!(matches!(decode_command("> <@U123 write", "U9"), Err(BridgeError::Parse(_))));
    }

    #[test]
    fn test_decode_rejects_non_user_mentions() {
        assert!(matches!(decode_command("<#C123|general> write the report", "U9"), Err(BridgeError::Parse(_))));
        assert!(matches!(decode_command("<!here> write the report", "U9"), Err(BridgeError::Parse(_))));
        assert!(matches!(decode_command("<@> write the report", "U9"), Err(BridgeError::Parse(_))));
        assert!(matches!(decode_command("<@|Jane> write the report", "U9"), Err(BridgeError::Parse(_))));
    }

    #[test]
    fn test_parse_mention_returns_remainder() {
        let (id, rest) = parse_mention("<@U2> has assigned you the following task:").unwrap();

        assert_eq!(id, "U2");
        assert_eq!(rest, " has assigned you the following task:");
    }
}
