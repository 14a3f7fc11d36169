pub mod slack_notifier;

pub use slack_notifier::*;
