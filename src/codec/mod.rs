//! Task-message codec.
//!
//! Converts between the free-form text of a `/task` slash command and a
//! structured [`TaskAssignment`], renders the Block Kit messages the bot posts,
//! and decodes the payload Slack sends when the "Complete" button is clicked.
//!
//! Everything in here is pure: no I/O, no clients, no global state.

pub mod action;
pub mod blocks;
pub mod command;

pub use action::{BlockText, InteractiveAction, MessageBlock, decode_interactive_action};
pub use blocks::{
    COMPLETE_ACTION_ID, COMPLETE_ACTION_VALUE, encode_assignment_confirmation, encode_assignment_fallback, encode_assignment_message, encode_completion_message,
    encode_completion_notice,
};
pub use command::{TaskAssignment, decode_command, parse_mention};
