//! Prediction handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::models::Decision;
use crate::validation::validate_payload;
use crate::{AppResult, AppState};

/// `POST /predecir`
///
/// body → validate → project → scale → classify. Each stage returns its own
/// error kind; `AppError` picks the status code.
#[tracing::instrument(name = "predecir", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Decision>> {
    let Json(payload) = payload?;

    let application = validate_payload(&payload, &state.projector)?;
    let features = state.projector.project(&application);
    let decision = state.adapter.decide(&features)?;

    tracing::info!(
        label = decision.label,
        status = %decision.status,
        probability = ?decision.rejection_probability,
        "Decision issued"
    );

    Ok(Json(decision))
}
