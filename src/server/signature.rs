//! Slack request signature verification.
//!
//! Slack signs every request with `v0=HMAC-SHA256(signing_secret, "v0:{timestamp}:{body}")`.
//! The HMAC check itself is delegated to slack-morphism; this middleware pulls
//! the headers and body out of the request and rejects replays.

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use slack_morphism::signature_verifier::SlackEventSignatureVerifier;
use tracing::instrument;

use crate::base::error::BridgeError;

use super::{AppState, MAX_BODY_BYTES};

/// Requests older than this are rejected as possible replays.
const MAX_REQUEST_AGE_SECS: i64 = 60 * 5;

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, BridgeError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| BridgeError::Unauthorized(format!("missing `{name}` header")))
}

/// Check that a request timestamp is recent relative to `now` (both in Unix seconds).
pub fn check_timestamp(timestamp: &str, now: i64) -> Result<(), BridgeError> {
    let ts: i64 = timestamp
        .parse()
        .map_err(|_| BridgeError::Unauthorized(format!("request timestamp `{timestamp}` is not a number")))?;

    if (now - ts).abs() > MAX_REQUEST_AGE_SECS {
        return Err(BridgeError::Unauthorized("request timestamp is too old".to_string()));
    }

    Ok(())
}

/// Middleware that only lets through requests signed with the configured signing secret.
#[instrument(skip_all)]
pub async fn verify_slack_signature(State(state): State<AppState>, request: Request, next: Next) -> Result<Response, BridgeError> {
    let (parts, body) = request.into_parts();

    let timestamp = header(&parts.headers, SlackEventSignatureVerifier::SLACK_SIGNED_TIMESTAMP)?.to_string();
    let signature = header(&parts.headers, SlackEventSignatureVerifier::SLACK_SIGNED_HASH_HEADER)?.to_string();

    check_timestamp(&timestamp, Utc::now().timestamp())?;

    let bytes = to_bytes(body, MAX_BODY_BYTES).await.map_err(|_| BridgeError::PayloadTooLarge)?;
    let text = std::str::from_utf8(&bytes).map_err(|_| BridgeError::MalformedPayload("request body is not UTF-8".to_string()))?;

    state
        .verifier
        .verify(&signature, text, &timestamp)
        .map_err(|e| BridgeError::Unauthorized(format!("invalid request signature ({e:?})")))?;

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_timestamp_is_accepted() {
        assert!(check_timestamp("1700000000", 1_700_000_000).is_ok());
        assert!(check_timestamp("1700000000", 1_700_000_000 + MAX_REQUEST_AGE_SECS).is_ok());
        assert!(check_timestamp("1700000000", 1_700_000_000 - 30).is_ok());
    }

    #[test]
    fn test_stale_timestamp_is_rejected() {
        let err = check_timestamp("1700000000", 1_700_000_000 + MAX_REQUEST_AGE_SECS + 1).unwrap_err();

        assert!(matches!(err, BridgeError::Unauthorized(_)));
    }

    #[test]
    fn test_garbage_timestamp_is_rejected() {
        assert!(matches!(check_timestamp("yesterday", 1_700_000_000), Err(BridgeError::Unauthorized(_))));
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let headers = HeaderMap::new();

        assert!(matches!(header(&headers, "x-slack-signature"), Err(BridgeError::Unauthorized(_))));
    }
}
