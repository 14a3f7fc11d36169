use axum::Router;

use donut_application::AppState;

use crate::handlers::{donut_handlers, ops_handlers, slack_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", axum::routing::get(ops_handlers::home))
        .route(
            "/donut",
            axum::routing::get(donut_handlers::list_debts).post(donut_handlers::create_donut),
        )
        .route("/slack", axum::routing::post(slack_handlers::slash_command))
        .route("/health/live", axum::routing::get(ops_handlers::health_live))
        .route("/health/ready", axum::routing::get(ops_handlers::health_ready))
        .route("/metrics", axum::routing::get(ops_handlers::metrics_prometheus))
        .with_state(state)
}
