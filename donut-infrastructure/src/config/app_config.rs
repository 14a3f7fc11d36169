use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use donut_domain::{RuntimeConfig, SlackConfig, StoreConfig};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub airtable_token: Option<String>,
    pub airtable_base_url: String,
    pub airtable_view: String,
    pub slack_verification_token: Option<String>,
    pub slack_oauth_token: Option<String>,
    pub slack_api_url: String,
    pub slack_channel: String,
    pub cooldown_seconds: u64,
    pub request_timeout_seconds: u64,
    pub max_body_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            airtable_token: None,
            airtable_base_url: "https://api.airtable.com/v0/apphBP3YhZKaBIYti/donuts".to_string(),
            airtable_view: "sorted".to_string(),
            slack_verification_token: None,
            slack_oauth_token: None,
            slack_api_url: "https://slack.com/api/chat.postMessage".to_string(),
            slack_channel: "CBKD5GK7F".to_string(),
            cooldown_seconds: 300,
            request_timeout_seconds: 15,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("DONUT_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);

        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        self.airtable_token = normalize_secret(self.airtable_token.take());
        self.slack_verification_token = normalize_secret(self.slack_verification_token.take());
        self.slack_oauth_token = normalize_secret(self.slack_oauth_token.take());
        self.airtable_base_url = self.airtable_base_url.trim().trim_end_matches('/').to_string();
        self.airtable_view = self.airtable_view.trim().to_string();
        self.slack_channel = self.slack_channel.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.airtable_token.is_none() {
            return Err(anyhow!("airtable_token must be set"));
        }
        if self.slack_verification_token.is_none() {
            return Err(anyhow!("slack_verification_token must be set"));
        }
        if self.slack_oauth_token.is_none() {
            return Err(anyhow!("slack_oauth_token must be set"));
        }
        if self.airtable_base_url.is_empty() {
            return Err(anyhow!("airtable_base_url must not be empty"));
        }
        if self.slack_channel.is_empty() {
            return Err(anyhow!("slack_channel must not be empty"));
        }
        if self.cooldown_seconds == 0 {
            return Err(anyhow!("cooldown_seconds must be greater than 0"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.airtable_token.clone(),
            slack_verification_token: self.slack_verification_token.clone(),
            slack_channel: self.slack_channel.clone(),
            cooldown_seconds: self.cooldown_seconds,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig {
            base_url: self.airtable_base_url.clone(),
            view: self.airtable_view.clone(),
            token: self.airtable_token.clone().unwrap_or_default(),
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_slack_config(&self) -> SlackConfig {
        SlackConfig {
            api_url: self.slack_api_url.clone(),
            oauth_token: self.slack_oauth_token.clone().unwrap_or_default(),
            channel: self.slack_channel.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("DONUT_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("DONUT_AIRTABLE_TOKEN") {
            self.airtable_token = Some(value);
        }
        if let Some(value) = lookup("DONUT_AIRTABLE_BASE_URL") {
            self.airtable_base_url = value;
        }
        if let Some(value) = lookup("DONUT_AIRTABLE_VIEW") {
            self.airtable_view = value;
        }
        if let Some(value) = lookup("DONUT_SLACK_VERIFICATION_TOKEN") {
            self.slack_verification_token = Some(value);
        }
        if let Some(value) = lookup("DONUT_SLACK_OAUTH_TOKEN") {
            self.slack_oauth_token = Some(value);
        }
        if let Some(value) = lookup("DONUT_SLACK_API_URL") {
            self.slack_api_url = value;
        }
        if let Some(value) = lookup("DONUT_SLACK_CHANNEL") {
            self.slack_channel = value;
        }
        if let Some(value) = lookup("DONUT_COOLDOWN_SECONDS") {
            self.cooldown_seconds = value.parse().unwrap_or(self.cooldown_seconds);
        }
        if let Some(value) = lookup("DONUT_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Some(value) = lookup("DONUT_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
    }
}

// Tokens are often pasted with their scheme attached.
fn normalize_secret(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    let bare = trimmed
        .strip_prefix("Bearer ")
        .map(str::trim)
        .unwrap_or(trimmed);
    if bare.is_empty() {
        None
    } else {
        Some(bare.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn configured() -> AppConfig {
        AppConfig {
            airtable_token: Some("key123".to_string()),
            slack_verification_token: Some("verify".to_string()),
            slack_oauth_token: Some("xoxb-1".to_string()),
            ..AppConfig::default()
        }
    }

    #[test]
    fn defaults_need_secrets() {
        let mut config = AppConfig::default();
        config.normalize();
        let err = config.validate().expect_err("missing secrets");
        assert!(err.to_string().contains("airtable_token"));
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn normalize_strips_bearer_prefix_and_blanks() {
        let mut config = configured();
        config.airtable_token = Some("  Bearer keyABC ".to_string());
        config.slack_oauth_token = Some("   ".to_string());
        config.airtable_base_url = "https://api.airtable.com/v0/app/donuts/".to_string();
        config.normalize();
        assert_eq!(config.airtable_token.as_deref(), Some("keyABC"));
        assert_eq!(config.slack_oauth_token, None);
        assert_eq!(config.airtable_base_url, "https://api.airtable.com/v0/app/donuts");
    }

    #[test]
    fn overrides_replace_file_values() {
        let vars: HashMap<&str, &str> = [
            ("DONUT_BIND_ADDR", "0.0.0.0:8080"),
            ("DONUT_SLACK_CHANNEL", "C999"),
            ("DONUT_COOLDOWN_SECONDS", "60"),
            ("DONUT_MAX_BODY_BYTES", "not-a-number"),
        ]
        .into_iter()
        .collect();
        let mut config = configured();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.slack_channel, "C999");
        assert_eq!(config.cooldown_seconds, 60);
        assert_eq!(config.max_body_bytes, 64 * 1024);
    }

    #[test]
    fn parses_toml_with_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            airtable_token = "key1"
            slack_channel = "C42"
            "#,
        )
        .expect("parse");
        assert_eq!(config.airtable_token.as_deref(), Some("key1"));
        assert_eq!(config.slack_channel, "C42");
        assert_eq!(config.airtable_view, "sorted");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = configured();
        config.bind_addr = "nope".to_string();
        assert!(config.validate().is_err());

        let mut config = configured();
        config.cooldown_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = configured();
        config.request_timeout_seconds = 0;
        let err = config.validate().expect_err("zero timeout");
        assert!(err.to_string().contains("request_timeout_seconds"));
    }
}
