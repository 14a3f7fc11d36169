use tracing::{info, warn};

use donut_domain::{Mention, NewEvent, RuleViolation, SlackAck, SlackCommandForm};

use crate::commands::donut_commands;
use crate::queries::shame_queries;
use crate::replies;
use crate::AppError;
use crate::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlackCommand {
    Me,
    Shame,
    Brought(Mention),
    Help,
}

impl SlackCommand {
    pub fn parse(text: &str) -> Self {
        let keyword = text
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match keyword.as_str() {
            "me" => SlackCommand::Me,
            "shame" => SlackCommand::Shame,
            _ => match Mention::parse(text) {
                Some(mention) => SlackCommand::Brought(mention),
                None => SlackCommand::Help,
            },
        }
    }
}

/// Acknowledges the slash command and posts the real reply in the background.
pub fn handle_slash_command(state: &AppState, form: SlackCommandForm) -> SlackAck {
    state.metrics.record_slack_command();
    let state = state.clone();
    tokio::spawn(async move {
        run_slash_command(&state, &form).await;
    });
    SlackAck::ephemeral(replies::ACK_TEXT)
}

/// Runs the command and posts its reply. Post failures are logged, never retried.
pub async fn run_slash_command(state: &AppState, form: &SlackCommandForm) {
    let reply = dispatch(state, form).await;
    if let Err(err) = state.notifier.post(&reply).await {
        warn!("slack post-back failed: {}", err);
    }
}

pub async fn dispatch(state: &AppState, form: &SlackCommandForm) -> String {
    let command = SlackCommand::parse(&form.text);
    info!("slack command from {}: {:?}", form.user_name, command);
    match command {
        SlackCommand::Me => donut_me(state, form).await,
        SlackCommand::Shame => shame(state).await,
        SlackCommand::Brought(mention) => report_brought(state, form, mention).await,
        SlackCommand::Help => replies::help(),
    }
}

async fn donut_me(state: &AppState, form: &SlackCommandForm) -> String {
    let target = Mention::tag(&form.user_id);
    let event = NewEvent::donutted(target.clone(), form.user_name.clone());
    match donut_commands::create_event(state, event).await {
        Ok(_) => replies::donutted(&target),
        Err(AppError::Rule(RuleViolation::CooldownViolation { .. })) => replies::cooldown(&target),
        Err(err) => failure_reply(err),
    }
}

async fn shame(state: &AppState) -> String {
    match shame_queries::build_shame_report(state).await {
        Ok(report) => replies::shame(
            report.latest.as_deref(),
            &report.debtors,
            &report.leaderboard,
        ),
        Err(err) => failure_reply(err),
    }
}

async fn report_brought(state: &AppState, form: &SlackCommandForm, mention: Mention) -> String {
    if mention.refers_to(&form.user_id) {
        return replies::SELF_REPORT.to_string();
    }
    let name = if mention.display_name.is_empty() {
        mention.id.clone()
    } else {
        mention.display_name.clone()
    };
    let event = NewEvent::brought(mention.id, mention.display_name);
    match donut_commands::create_event(state, event).await {
        Ok(_) => replies::brought(&form.user_name, &name),
        Err(AppError::Rule(RuleViolation::DebtNotFound { .. })) => replies::not_owed(&name),
        Err(err) => failure_reply(err),
    }
}

fn failure_reply(err: AppError) -> String {
    warn!("slack command failed: {}", err);
    replies::STORE_FAILURE.to_string()
}
