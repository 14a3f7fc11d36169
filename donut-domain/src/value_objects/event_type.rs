// Event type value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RuleViolation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventType {
    #[default]
    Donutted,
    Brought,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Donutted => "Donutted",
            EventType::Brought => "Brought",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Exact match only: the store holds a single-select column with these two options.
impl FromStr for EventType {
    type Err = RuleViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Donutted" => Ok(EventType::Donutted),
            "Brought" => Ok(EventType::Brought),
            other => Err(RuleViolation::InvalidEventType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_values() {
        assert_eq!("Donutted".parse::<EventType>(), Ok(EventType::Donutted));
        assert_eq!(" Brought ".parse::<EventType>(), Ok(EventType::Brought));
    }

    #[test]
    fn rejects_unknown_values() {
        let err = "Eaten".parse::<EventType>().expect_err("reject");
        assert_eq!(err, RuleViolation::InvalidEventType("Eaten".to_string()));
        assert!("donutted".parse::<EventType>().is_err());
    }
}
