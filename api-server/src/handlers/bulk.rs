//! Batch prediction handler

use axum::{extract::{rejection::JsonRejection, State}, Json};

use urldna_core::logic::scan::{predict_batch, BatchReport};

use crate::{AppState, AppResult};
use crate::models::BulkRequest;

/// Classify up to 500 URLs, in request order
pub async fn bulk(
    State(state): State<AppState>,
    body: Result<Json<BulkRequest>, JsonRejection>,
) -> AppResult<Json<BatchReport>> {
    let Json(req) = body?;
    let urls = req.url_strings();
    let report = predict_batch(state.classifier.as_ref(), &urls)?;

    tracing::info!("Bulk scan: {} of {} entries classified", report.total, urls.len());

    Ok(Json(report))
}
