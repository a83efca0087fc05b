//! Model info handler

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::features::LayoutInfo;
use crate::inference::{artifacts::ArtifactInfo, PredictionVariant};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub variant: PredictionVariant,
    pub scaler: &'static str,
    pub classifier: &'static str,
    pub supports_probability: bool,
    pub artifacts: Vec<ArtifactInfo>,
    pub layout: LayoutInfo,
    pub ready_at: DateTime<Utc>,
}

/// `GET /modelo`
pub async fn info(State(state): State<AppState>) -> Json<ModelInfo> {
    Json(ModelInfo {
        variant: state.adapter.variant(),
        scaler: state.adapter.scaler_kind(),
        classifier: state.adapter.classifier_kind(),
        supports_probability: state.adapter.supports_probability(),
        artifacts: state.artifacts.to_vec(),
        layout: state.projector.layout().clone(),
        ready_at: state.ready_at,
    })
}
