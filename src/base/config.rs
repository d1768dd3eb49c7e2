//! Load configuration via `config` crate with env-override support.

use std::{net::SocketAddr, ops::Deref, sync::Arc, time::Duration};

use anyhow::anyhow;
use serde::Deserialize;

use super::types::{Res, Void};

/// Default address the webhook server binds to.
fn default_listen_address() -> String {
    "127.0.0.1:5000".to_string()
}

/// Default slash command that triggers a task assignment.
fn default_command_trigger() -> String {
    "/task".to_string()
}

/// Default timeout for a single Slack Web API call, in seconds.
fn default_slack_api_timeout_secs() -> u64 {
    10
}

/// Signatures are verified unless explicitly turned off.
fn default_verify_signatures() -> bool {
    true
}

/// Configuration for the task-bot application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared, immutable settings.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<ConfigInner> for Config {
    fn from(inner: ConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

/// The settings themselves, as loaded from the environment and config file.
#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// Slack bot token used for Web API calls (`SLACK_BOT_TOKEN`).
    pub slack_bot_token: String,
    /// Slack signing secret used to verify inbound requests (`SLACK_SIGNING_SECRET`).
    pub slack_signing_secret: String,
    /// Socket address for the webhook server (`LISTEN_ADDRESS`).
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
    /// Slash command that assigns a task (`COMMAND_TRIGGER`).
    #[serde(default = "default_command_trigger")]
    pub command_trigger: String,
    /// Timeout for each outbound Slack call, in seconds (`SLACK_API_TIMEOUT_SECS`).
    /// Slack expects slash commands to be answered within three seconds, so keep this short.
    #[serde(default = "default_slack_api_timeout_secs")]
    pub slack_api_timeout_secs: u64,
    /// Whether inbound requests must carry a valid Slack signature (`VERIFY_SIGNATURES`).
    /// Only disable this for local testing.
    #[serde(default = "default_verify_signatures")]
    pub verify_signatures: bool,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            slack_bot_token: String::new(),
            slack_signing_secret: String::new(),
            listen_address: default_listen_address(),
            command_trigger: default_command_trigger(),
            slack_api_timeout_secs: default_slack_api_timeout_secs(),
            verify_signatures: default_verify_signatures(),
        }
    }
}

impl ConfigInner {
    /// The parsed listen address.
    pub fn listen_address(&self) -> Res<SocketAddr> {
        self.listen_address
            .parse()
            .map_err(|e| anyhow!("Listen address `{}` is not a valid socket address: {}", self.listen_address, e))
    }

    /// The per-call Slack API timeout.
    pub fn slack_api_timeout(&self) -> Duration {
        Duration::from_secs(self.slack_api_timeout_secs)
    }

    /// Check the loaded values for consistency.
    pub fn validate(&self) -> Void {
        if self.slack_bot_token.trim().is_empty() {
            return Err(anyhow!("Slack bot token must be set."));
        }

        if self.slack_signing_secret.trim().is_empty() {
            return Err(anyhow!("Slack signing secret must be set."));
        }

        if !self.command_trigger.starts_with('/') || self.command_trigger.len() < 2 {
            return Err(anyhow!("Command trigger must be a slash command like `/task`."));
        }

        if self.slack_api_timeout_secs < 1 || self.slack_api_timeout_secs > 60 {
            return Err(anyhow!("Slack API timeout must be between 1 and 60 seconds."));
        }

        self.listen_address()?;

        Ok(())
    }
}

impl Config {
    /// Load from `TASK_BOT_*` environment variables, plus a TOML file if one is given or present.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("TASK_BOT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ConfigInner {
        ConfigInner {
            slack_bot_token: "xoxb-test".to_string(),
            slack_signing_secret: "secret".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = valid();

        assert!(config.validate().is_ok());
        assert_eq!(config.command_trigger, "/task");
        assert!(config.verify_signatures);
        assert_eq!(config.slack_api_timeout(), Duration::from_secs(10));
        assert_eq!(config.listen_address().unwrap().port(), 5000);
    }

    #[test]
    fn test_missing_secrets_are_rejected() {
        let config = ConfigInner {
            slack_signing_secret: "secret".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ConfigInner {
            slack_bot_token: "xoxb-test".to_string(),
            slack_signing_secret: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let config = ConfigInner {
            command_trigger: "task".to_string(),
            ..valid()
        };
        assert!(config.validate().is_err());

        let config = ConfigInner {
            slack_api_timeout_secs: 0,
            ..valid()
        };
        assert!(config.validate().is_err());

        let config = ConfigInner {
            listen_address: "localhost".to_string(),
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserializes_with_defaults() {
        let inner: ConfigInner = config::Config::builder()
            .set_override("slack_bot_token", "xoxb-test")
            .unwrap()
            .set_override("slack_signing_secret", "secret")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(inner.listen_address, "127.0.0.1:5000");
        assert_eq!(inner.command_trigger, "/task");
        assert!(inner.verify_signatures);
    }
}
