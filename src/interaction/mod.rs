//! Webhook handling and user interactions for task-bot.
//!
//! This module provides the logic behind each Slack-facing endpoint:
//! - Assigning tasks from the `/task` slash command
//! - Completing tasks when the assignee clicks the "Complete" button
//! - Answering the Events API verification challenge

pub mod action;
pub mod command;
pub mod event;
