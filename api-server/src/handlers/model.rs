//! Model status handler

use axum::{extract::State, Json};

use urldna_core::logic::model::ModelStatus;

use crate::AppState;

/// Active classifier backend, labels and feature layout
pub async fn status(State(state): State<AppState>) -> Json<ModelStatus> {
    Json(state.classifier.status())
}
