//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use urldna_core::logic::scan::ScanError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed body, blank URL, empty or oversized batch
    #[error("{0}")]
    BadRequest(String),

    #[error("Classifier error: {0}")]
    ClassifierError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::ClassifierError(msg) => {
                tracing::error!("Classifier error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Classification failed")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<ScanError> for AppError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::InvalidInput(_) | ScanError::BatchTooLarge { .. } => {
                AppError::BadRequest(err.to_string())
            }
            ScanError::Classifier(inner) => AppError::ClassifierError(inner.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
