use serde::Serialize;
use tracing::error;

use donut_domain::{latest_display_name, leaderboard, outstanding_debts, LeaderboardEntry};

use crate::AppError;
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct ShameReport {
    pub latest: Option<String>,
    pub debtors: Vec<String>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

pub async fn build_shame_report(state: &AppState) -> Result<ShameReport, AppError> {
    let records = state.store.fetch_all().await.map_err(|err| {
        error!("failed to fetch donut records: {}", err);
        state.metrics.record_store_error();
        AppError::Store(err)
    })?;
    Ok(ShameReport {
        latest: latest_display_name(&records).ok().map(str::to_string),
        debtors: outstanding_debts(&records)
            .into_iter()
            .map(|debt| debt.user_name)
            .collect(),
        leaderboard: leaderboard(&records),
    })
}
