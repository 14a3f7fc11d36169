use chrono::Utc;
use tracing::{error, info};

use donut_domain::{EventRecord, NewEvent};

use crate::AppError;
use crate::AppState;

/// Validates `event` against a fresh snapshot and appends it.
pub async fn create_event(state: &AppState, event: NewEvent) -> Result<EventRecord, AppError> {
    if event.donut_target.is_empty() {
        return Err(AppError::BadRequest("donut is required".to_string()));
    }

    let records = state.store.fetch_all().await.map_err(|err| {
        error!("failed to fetch donut records: {}", err);
        state.metrics.record_store_error();
        AppError::Store(err)
    })?;

    if let Err(violation) = state.rules.validate_create(&records, &event, Utc::now()) {
        info!(
            "rejected {} for {}: {}",
            event.event_type, event.donut_target, violation
        );
        state.metrics.record_rejection();
        return Err(AppError::Rule(violation));
    }

    let created = state.store.append(&event).await.map_err(|err| {
        error!("failed to append donut record: {}", err);
        state.metrics.record_store_error();
        AppError::Store(err)
    })?;
    state.metrics.record_event();
    info!("recorded {} for {}", created.event_type, created.donut_target);
    Ok(created)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use donut_domain::{EventType, RuleViolation};

    use super::*;
    use crate::test_support::{test_state, MemoryStore, RecordingNotifier};

    fn record(target: &str, user: &str, event_type: EventType, age: Duration) -> EventRecord {
        EventRecord {
            donut_target: target.to_string(),
            user_name: user.to_string(),
            event_type,
            created_at: Utc::now() - age,
            display_name: user.to_string(),
        }
    }

    #[tokio::test]
    async fn appends_valid_donut() {
        let store = Arc::new(MemoryStore::default());
        let state = test_state(store.clone(), Arc::new(RecordingNotifier::default()));
        let created = create_event(&state, NewEvent::donutted("<@U1>", "alice"))
            .await
            .expect("created");
        assert_eq!(created.event_type, EventType::Donutted);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn cooldown_never_reaches_store() {
        let store = Arc::new(MemoryStore::with_records(vec![record(
            "<@U1>",
            "alice",
            EventType::Donutted,
            Duration::minutes(1),
        )]));
        let state = test_state(store.clone(), Arc::new(RecordingNotifier::default()));
        let err = create_event(&state, NewEvent::donutted("<@U1>", "alice"))
            .await
            .expect_err("cooldown");
        assert!(matches!(
            err,
            AppError::Rule(RuleViolation::CooldownViolation { .. })
        ));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn brought_clears_debt() {
        let store = Arc::new(MemoryStore::with_records(vec![record(
            "B",
            "user2",
            EventType::Donutted,
            Duration::hours(2),
        )]));
        let state = test_state(store.clone(), Arc::new(RecordingNotifier::default()));
        create_event(&state, NewEvent::brought("B", "user2"))
            .await
            .expect("debt found");
        let debts = donut_domain::outstanding_debts(&store.snapshot());
        assert!(debts.is_empty());
    }

    #[tokio::test]
    async fn empty_target_is_bad_request() {
        let state = test_state(
            Arc::new(MemoryStore::default()),
            Arc::new(RecordingNotifier::default()),
        );
        let err = create_event(&state, NewEvent::donutted("", "alice"))
            .await
            .expect_err("bad request");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let state = test_state(
            Arc::new(MemoryStore::unavailable()),
            Arc::new(RecordingNotifier::default()),
        );
        let err = create_event(&state, NewEvent::donutted("<@U1>", "alice"))
            .await
            .expect_err("store down");
        assert!(matches!(err, AppError::Store(_)));
    }
}
