use async_trait::async_trait;

use crate::entities::{EventRecord, NewEvent};
use crate::errors::StoreError;

/// Append-only record store holding the donut history.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Current snapshot in the store's sorted view order.
    async fn fetch_all(&self) -> Result<Vec<EventRecord>, StoreError>;
    async fn append(&self, event: &NewEvent) -> Result<EventRecord, StoreError>;
}
