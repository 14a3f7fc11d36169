// Runtime configuration and Slack boundary models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub slack_verification_token: Option<String>,
    pub slack_channel: String,
    pub cooldown_seconds: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl RuntimeConfig {
    pub fn cooldown(&self) -> chrono::Duration {
        let secs = i64::try_from(self.cooldown_seconds)
            .unwrap_or(i64::MAX)
            .min(i64::from(u32::MAX));
        chrono::Duration::seconds(secs)
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub view: String,
    pub token: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct SlackConfig {
    pub api_url: String,
    pub oauth_token: String,
    pub channel: String,
    pub request_timeout_seconds: u64,
}

/// Form fields Slack sends with a slash command.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlackCommandForm {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
}

/// Synchronous reply to a slash command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackAck {
    pub response_type: String,
    pub text: String,
}

impl SlackAck {
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            response_type: "ephemeral".to_string(),
            text: text.into(),
        }
    }
}
