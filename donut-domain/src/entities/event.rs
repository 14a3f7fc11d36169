// Event entity
// Represents one donut-related happening as stored in the record store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::RuleViolation;
use crate::value_objects::EventType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub donut_target: String,
    pub user_name: String,
    pub event_type: EventType,
    pub created_at: DateTime<Utc>,
    pub display_name: String,
}

/// A validated record waiting to be appended. The store assigns
/// `createdAt` and `displayName`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub donut_target: String,
    pub user_name: String,
    pub event_type: EventType,
}

impl NewEvent {
    pub fn donutted(donut_target: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            donut_target: donut_target.into(),
            user_name: user_name.into(),
            event_type: EventType::Donutted,
        }
    }

    pub fn brought(donut_target: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            donut_target: donut_target.into(),
            user_name: user_name.into(),
            event_type: EventType::Brought,
        }
    }
}

/// Body of `POST /donut`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonutRequest {
    pub donut: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
}

impl TryFrom<CreateDonutRequest> for NewEvent {
    type Error = RuleViolation;

    fn try_from(request: CreateDonutRequest) -> Result<Self, Self::Error> {
        let event_type = match request.event_type.as_deref() {
            None => EventType::default(),
            Some(raw) => raw.parse()?,
        };
        Ok(Self {
            donut_target: request.donut.trim().to_string(),
            user_name: request.user_name.unwrap_or_default().trim().to_string(),
            event_type,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutstandingDebt {
    pub donut_target: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub display_name: String,
    pub count: usize,
}
