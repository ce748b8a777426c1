//! Single URL prediction handler

use axum::{extract::{rejection::JsonRejection, State}, Json};

use urldna_core::logic::scan::{predict_url, Prediction};

use crate::{AppState, AppResult};
use crate::models::PredictRequest;

/// Classify one URL and return its threat DNA
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<Prediction>> {
    let Json(req) = body?;
    let prediction = predict_url(state.classifier.as_ref(), &req.url)?;

    tracing::debug!(
        url = %prediction.url,
        prediction = %prediction.prediction,
        confidence = prediction.confidence,
        "URL classified"
    );

    Ok(Json(prediction))
}
