use std::sync::Arc;

use anyhow::Result;

use donut_application::AppState;
use donut_infrastructure::{AirtableStore, AppConfig, SlackNotifier};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let store = Arc::new(AirtableStore::new(config.to_store_config())?);
        let notifier = Arc::new(SlackNotifier::new(config.to_slack_config())?);
        let state = AppState::new(config.to_runtime_config(), store, notifier);
        Ok(Self { state })
    }
}
