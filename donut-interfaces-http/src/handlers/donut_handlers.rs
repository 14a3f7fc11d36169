use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use tracing::info;

use donut_application::commands::donut_commands;
use donut_application::queries::debt_queries;
use donut_application::AppState;
use donut_domain::{CreateDonutRequest, EventRecord, NewEvent, OutstandingDebt};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn list_debts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<OutstandingDebt>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let debts = debt_queries::list_outstanding_debts(&state).await?;
    Ok(Json(debts))
}

pub async fn create_donut(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateDonutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EventRecord>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let Json(payload) = payload.map_err(|rejection| {
        info!("rejected malformed donut request: {}", rejection.body_text());
        state.metrics.record_rejection();
        HttpError::Rejected
    })?;
    let event = NewEvent::try_from(payload).map_err(|violation| {
        info!("rejected donut request: {}", violation);
        state.metrics.record_rejection();
        HttpError::Rejected
    })?;
    let created = donut_commands::create_event(&state, event).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
