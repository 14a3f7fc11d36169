use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use donut_domain::{ChatNotifier, NotifyError, SlackConfig};

/// Posts to a fixed channel through Slack's `chat.postMessage`.
pub struct SlackNotifier {
    client: Client,
    config: SlackConfig,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl SlackNotifier {
    pub fn new(config: SlackConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ChatNotifier for SlackNotifier {
    async fn post(&self, text: &str) -> Result<(), NotifyError> {
        let payload = json!({
            "channel": self.config.channel,
            "text": text,
        });
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.oauth_token)
            .json(&payload)
            .send()
            .await
            .map_err(|err| NotifyError(err.to_string()))?
            .error_for_status()
            .map_err(|err| NotifyError(err.to_string()))?;
        // Slack answers 200 even when the post fails.
        let body: PostMessageResponse = response
            .json()
            .await
            .map_err(|err| NotifyError(format!("invalid response: {}", err)))?;
        if !body.ok {
            return Err(NotifyError(
                body.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }
        Ok(())
    }
}
