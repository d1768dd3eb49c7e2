//! Handles Events API requests.
//!
//! The bot subscribes to no events; the endpoint exists so Slack can verify
//! the request URL.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::base::replies;

/// The part of an Events API request the bot reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventEnvelope {
    #[serde(default)]
    pub challenge: Option<String>,
}

/// Reply body for an Events API request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EventReply {
    Challenge { challenge: String },
    Error {
        #[serde(rename = "ERROR")]
        error: String,
    },
}

/// Echo the verification challenge, if there is one.
pub fn handle_event(envelope: EventEnvelope) -> EventReply {
    match envelope.challenge {
        Some(challenge) => {
            info!("Answering URL verification challenge.");
            EventReply::Challenge { challenge }
        }
        None => {
            warn!("Received event without a challenge.");
            EventReply::Error {
                error: replies::NO_CHALLENGE.to_string(),
            }
        }
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_is_echoed() {
        let reply = handle_event(EventEnvelope {
            challenge: Some("3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P".to_string()),
        });

        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            serde_json::json!({ "challenge": "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P" })
        );
    }

    #[test]
    fn test_missing_challenge_is_an_error() {
        let reply = handle_event(EventEnvelope::default());

        assert_eq!(serde_json::to_value(&reply).unwrap(), serde_json::json!({ "ERROR": "no challenge found" }));
    }
}
