pub mod donut_commands;
pub mod slack_commands;
