use tracing::error;

use donut_domain::{outstanding_debts, OutstandingDebt};

use crate::AppError;
use crate::AppState;

pub async fn list_outstanding_debts(state: &AppState) -> Result<Vec<OutstandingDebt>, AppError> {
    let records = state.store.fetch_all().await.map_err(|err| {
        error!("failed to fetch donut records: {}", err);
        state.metrics.record_store_error();
        AppError::Store(err)
    })?;
    Ok(outstanding_debts(&records))
}
