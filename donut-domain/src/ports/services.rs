use async_trait::async_trait;

use crate::errors::NotifyError;

/// Posts visible replies to the donut channel.
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    async fn post(&self, text: &str) -> Result<(), NotifyError>;
}
