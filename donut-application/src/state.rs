use std::sync::Arc;

use donut_domain::ports::{ChatNotifier, EventStore};
use donut_domain::services::DonutRules;
use donut_domain::RuntimeConfig;

use crate::Metrics;

/// Shared per-process handles. Holds no record snapshot: every operation
/// fetches its own from the store.
#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub store: Arc<dyn EventStore>,
    pub notifier: Arc<dyn ChatNotifier>,
    pub rules: DonutRules,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(
        config: RuntimeConfig,
        store: Arc<dyn EventStore>,
        notifier: Arc<dyn ChatNotifier>,
    ) -> Self {
        let rules = DonutRules::new(config.cooldown());
        Self {
            config,
            store,
            notifier,
            rules,
            metrics: Arc::new(Metrics::default()),
        }
    }
}
