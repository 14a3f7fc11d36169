// Domain error kinds

use thiserror::Error;

/// Business-rule failures raised by the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("{target} was donutted less than the cooldown window ago")]
    CooldownViolation { target: String },
    #[error("no outstanding donut debt for {target} ({user_name})")]
    DebtNotFound { target: String, user_name: String },
    #[error("invalid event type '{0}'")]
    InvalidEventType(String),
    #[error("no donut history recorded")]
    EmptyHistory,
}

/// Failures talking to the remote record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    #[error("record store rejected payload: {0}")]
    Rejected(String),
}

/// Failures posting a message back to chat.
#[derive(Debug, Error)]
#[error("chat post failed: {0}")]
pub struct NotifyError(pub String);
