//! In-memory port fakes shared by unit tests here and by the HTTP crate's
//! tests. Only compiled for tests or with the `test-support` feature.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use donut_domain::{
    ChatNotifier, EventRecord, EventStore, NewEvent, NotifyError, RuntimeConfig, StoreError,
};

use crate::AppState;

/// Store that keeps records most-recent-first, like the `sorted` view.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<EventRecord>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn with_records(records: Vec<EventRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            unavailable: true,
        }
    }

    pub fn snapshot(&self) -> Vec<EventRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<EventRecord>, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(self.snapshot())
    }

    async fn append(&self, event: &NewEvent) -> Result<EventRecord, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        let display_name = if event.user_name.is_empty() {
            event.donut_target.clone()
        } else {
            event.user_name.clone()
        };
        let record = EventRecord {
            donut_target: event.donut_target.clone(),
            user_name: event.user_name.clone(),
            event_type: event.event_type,
            created_at: Utc::now(),
            display_name,
        };
        let mut records = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("poisoned".to_string()))?;
        records.insert(0, record.clone());
        Ok(record)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    posts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn posts(&self) -> Vec<String> {
        self.posts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatNotifier for RecordingNotifier {
    async fn post(&self, text: &str) -> Result<(), NotifyError> {
        self.posts
            .lock()
            .map_err(|_| NotifyError("poisoned".to_string()))?
            .push(text.to_string());
        Ok(())
    }
}

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        api_token: Some("store-secret".to_string()),
        slack_verification_token: Some("slack-secret".to_string()),
        slack_channel: "CTEST".to_string(),
        cooldown_seconds: 300,
        max_body_bytes: 65536,
        request_timeout_seconds: 5,
    }
}

pub fn test_state(
    store: Arc<MemoryStore>,
    notifier: Arc<RecordingNotifier>,
) -> AppState {
    AppState::new(runtime_config(), store, notifier)
}
