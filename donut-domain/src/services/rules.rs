use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};

use crate::entities::{EventRecord, LeaderboardEntry, NewEvent, OutstandingDebt};
use crate::errors::RuleViolation;
use crate::value_objects::EventType;

pub const DEFAULT_COOLDOWN_SECONDS: i64 = 5 * 60;

/// Rule evaluation over a snapshot of the record list. Holds no state of
/// its own beyond the cooldown window.
#[derive(Debug, Clone, Copy)]
pub struct DonutRules {
    cooldown: Duration,
}

impl Default for DonutRules {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_COOLDOWN_SECONDS))
    }
}

impl DonutRules {
    pub fn new(cooldown: Duration) -> Self {
        Self { cooldown }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn validate_create(
        &self,
        records: &[EventRecord],
        event: &NewEvent,
        now: DateTime<Utc>,
    ) -> Result<(), RuleViolation> {
        match event.event_type {
            EventType::Donutted => {
                let blocked = records.iter().any(|record| {
                    record.donut_target == event.donut_target
                        && now.signed_duration_since(record.created_at) < self.cooldown
                });
                if blocked {
                    return Err(RuleViolation::CooldownViolation {
                        target: event.donut_target.clone(),
                    });
                }
                Ok(())
            }
            EventType::Brought => {
                let owed = outstanding_debts(records).into_iter().any(|debt| {
                    debt.donut_target == event.donut_target && debt.user_name == event.user_name
                });
                if !owed {
                    return Err(RuleViolation::DebtNotFound {
                        target: event.donut_target.clone(),
                        user_name: event.user_name.clone(),
                    });
                }
                Ok(())
            }
        }
    }
}

/// One record per distinct target: the first one met in list order.
/// Entries keep the order in which their target first appears.
pub fn latest_per_target(records: &[EventRecord]) -> Vec<&EventRecord> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| seen.insert(record.donut_target.as_str()))
        .collect()
}

pub fn outstanding_debts(records: &[EventRecord]) -> Vec<OutstandingDebt> {
    latest_per_target(records)
        .into_iter()
        .filter(|record| record.event_type == EventType::Donutted)
        .map(|record| OutstandingDebt {
            donut_target: record.donut_target.clone(),
            user_name: record.user_name.clone(),
            created_at: record.created_at,
        })
        .collect()
}

/// Display-name frequencies, highest first. Ties keep first-occurrence order.
pub fn leaderboard(records: &[EventRecord]) -> Vec<LeaderboardEntry> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<LeaderboardEntry> = Vec::new();
    for record in records {
        match positions.get(record.display_name.as_str()).copied() {
            Some(idx) => entries[idx].count += 1,
            None => {
                positions.insert(record.display_name.as_str(), entries.len());
                entries.push(LeaderboardEntry {
                    display_name: record.display_name.clone(),
                    count: 1,
                });
            }
        }
    }
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

pub fn latest_display_name(records: &[EventRecord]) -> Result<&str, RuleViolation> {
    records
        .first()
        .map(|record| record.display_name.as_str())
        .ok_or(RuleViolation::EmptyHistory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).single().expect("valid time")
    }

    fn record(target: &str, user: &str, event_type: EventType, at: DateTime<Utc>) -> EventRecord {
        EventRecord {
            donut_target: target.to_string(),
            user_name: user.to_string(),
            event_type,
            created_at: at,
            display_name: user.to_string(),
        }
    }

    #[test]
    fn latest_per_target_keeps_first_seen_record() {
        // Most-recent-first, as the `sorted` view returns them.
        let records = vec![
            record("A", "alice", EventType::Brought, t0() + Duration::minutes(20)),
            record("B", "bob", EventType::Donutted, t0() + Duration::minutes(10)),
            record("A", "alice", EventType::Donutted, t0()),
        ];
        let latest = latest_per_target(&records);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0], &records[0]);
        assert_eq!(latest[1], &records[1]);
    }

    #[test]
    fn latest_per_target_ignores_timestamps() {
        let records = vec![
            record("A", "alice", EventType::Donutted, t0()),
            record("A", "alice", EventType::Brought, t0() + Duration::hours(1)),
        ];
        let latest = latest_per_target(&records);
        assert_eq!(latest, vec![&records[0]]);
    }

    #[test]
    fn outstanding_debts_pinned_against_three_record_fixture() {
        let records = vec![
            record("A", "alice", EventType::Brought, t0() + Duration::minutes(20)),
            record("B", "bob", EventType::Donutted, t0() + Duration::minutes(10)),
            record("A", "alice", EventType::Donutted, t0()),
        ];
        let debts = outstanding_debts(&records);
        assert_eq!(
            debts,
            vec![OutstandingDebt {
                donut_target: "B".to_string(),
                user_name: "bob".to_string(),
                created_at: t0() + Duration::minutes(10),
            }]
        );
    }

    #[test]
    fn donutted_within_cooldown_is_rejected() {
        let rules = DonutRules::default();
        let records = vec![record("A", "alice", EventType::Donutted, t0())];
        let err = rules
            .validate_create(&records, &NewEvent::donutted("A", "alice"), t0() + Duration::minutes(1))
            .expect_err("cooldown");
        assert_eq!(err, RuleViolation::CooldownViolation { target: "A".to_string() });
        assert!(rules
            .validate_create(&records, &NewEvent::donutted("A", "alice"), t0() + Duration::minutes(6))
            .is_ok());
    }

    #[test]
    fn cooldown_boundary_is_exclusive() {
        let rules = DonutRules::default();
        let records = vec![record("A", "alice", EventType::Donutted, t0())];
        let event = NewEvent::donutted("A", "alice");
        assert!(rules
            .validate_create(&records, &event, t0() + Duration::minutes(5))
            .is_ok());
        assert!(rules
            .validate_create(&records, &event, t0() + Duration::seconds(299))
            .is_err());
    }

    #[test]
    fn cooldown_only_applies_to_same_target() {
        let rules = DonutRules::default();
        let records = vec![record("A", "alice", EventType::Donutted, t0())];
        assert!(rules
            .validate_create(&records, &NewEvent::donutted("B", "bob"), t0())
            .is_ok());
    }

    #[test]
    fn brought_requires_matching_debt() {
        let rules = DonutRules::default();
        let mut records = vec![record("B", "user2", EventType::Donutted, t0())];
        assert!(rules
            .validate_create(&records, &NewEvent::brought("B", "user2"), t0())
            .is_ok());

        // Appended record lands at the head of the sorted view.
        records.insert(0, record("B", "user2", EventType::Brought, t0() + Duration::minutes(1)));
        assert!(outstanding_debts(&records).is_empty());
    }

    #[test]
    fn brought_without_debt_is_rejected() {
        let rules = DonutRules::default();
        let records = vec![record("B", "user2", EventType::Donutted, t0())];
        let err = rules
            .validate_create(&records, &NewEvent::brought("C", "user3"), t0())
            .expect_err("no debt");
        assert!(matches!(err, RuleViolation::DebtNotFound { .. }));

        let err = rules
            .validate_create(&records, &NewEvent::brought("B", "someone-else"), t0())
            .expect_err("user mismatch");
        assert!(matches!(err, RuleViolation::DebtNotFound { .. }));
    }

    #[test]
    fn leaderboard_sorts_by_count_then_first_occurrence() {
        let records = vec![
            record("C", "carol", EventType::Donutted, t0()),
            record("A", "alice", EventType::Donutted, t0()),
            record("B", "bob", EventType::Donutted, t0()),
            record("A", "alice", EventType::Brought, t0()),
            record("B", "bob", EventType::Donutted, t0()),
        ];
        let board = leaderboard(&records);
        let names: Vec<_> = board.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
        assert_eq!(board.iter().map(|e| e.count).sum::<usize>(), records.len());
        assert!(board.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn empty_history() {
        assert_eq!(latest_display_name(&[]), Err(RuleViolation::EmptyHistory));
        assert!(outstanding_debts(&[]).is_empty());
        assert!(leaderboard(&[]).is_empty());
    }

    #[test]
    fn latest_display_name_reads_head_of_list() {
        let records = vec![
            record("B", "bob", EventType::Donutted, t0()),
            record("A", "alice", EventType::Donutted, t0()),
        ];
        assert_eq!(latest_display_name(&records), Ok("bob"));
    }
}
