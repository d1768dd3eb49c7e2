//! Core components, types, and utilities for the task-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Fixed user-facing replies.
//! - Common types, errors, and result handling.

pub mod config;
pub mod error;
pub mod replies;
pub mod types;
