//! Errors surfaced at the webhook boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Errors produced while handling a single webhook request.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The command text did not contain a user mention followed by a task description.
    #[error("Could not parse task command: {0}")]
    Parse(String),

    /// An interactive payload was missing fields or was not valid JSON.
    #[error("Malformed interactive payload: {0}")]
    MalformedPayload(String),

    /// A call to the Slack Web API failed or timed out.
    #[error("Slack API call failed: {0}")]
    ExternalApi(String),

    /// The request signature could not be verified.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The request body exceeded the size limit.
    #[error("Payload too large")]
    PayloadTooLarge,
}

impl BridgeError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Parse failures are normally turned into usage text before reaching here.
            Self::Parse(_) => StatusCode::BAD_REQUEST,
            Self::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            Self::ExternalApi(_) => StatusCode::BAD_GATEWAY,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!("Responding with {}: {}", status, self);
        } else {
            warn!("Responding with {}: {}", status, self);
        }

        (status, self.to_string()).into_response()
    }
}

impl From<anyhow::Error> for BridgeError {
    fn from(err: anyhow::Error) -> Self {
        Self::ExternalApi(format!("{err:#}"))
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BridgeError::MalformedPayload("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BridgeError::ExternalApi("x".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(BridgeError::Unauthorized("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BridgeError::PayloadTooLarge.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_response_carries_diagnostic() {
        let response = BridgeError::MalformedPayload("missing field `actions`".into()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_anyhow_errors_map_to_external_api() {
        let err: BridgeError = anyhow::anyhow!("channel_not_found").into();

        assert!(matches!(err, BridgeError::ExternalApi(ref m) if m.contains("channel_not_found")));
    }
}
