use axum::extract::State;
use axum::Form;
use axum::Json;
use tracing::warn;

use donut_application::commands::slack_commands;
use donut_application::AppState;
use donut_domain::{SlackAck, SlackCommandForm};

use crate::error::HttpError;
use crate::middleware::verify_slack_token;

pub async fn slash_command(
    State(state): State<AppState>,
    Form(form): Form<SlackCommandForm>,
) -> Result<Json<SlackAck>, HttpError> {
    if !verify_slack_token(&state.config, &form.token) {
        warn!("rejected slack command with bad token from {}", form.user_id);
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(slack_commands::handle_slash_command(&state, form)))
}
