use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use donut_application::AppError;

#[derive(Debug)]
pub enum HttpError {
    Unauthorized,
    BadRequest(String),
    /// Business-rule rejection; the specific rule is not disclosed.
    Rejected,
    StoreUnavailable(String),
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::Unauthorized => HttpError::Unauthorized,
            AppError::BadRequest(msg) => HttpError::BadRequest(msg),
            AppError::Rule(_) => HttpError::Rejected,
            AppError::Store(err) => HttpError::StoreUnavailable(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, format!("bad request: {}", msg)),
            HttpError::Rejected => (StatusCode::UNPROCESSABLE_ENTITY, "rejected".to_string()),
            HttpError::StoreUnavailable(detail) => {
                error!("store failure surfaced to caller: {}", detail);
                (StatusCode::BAD_GATEWAY, "donut store unavailable".to_string())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
