//! Credit Decision Service
//!
//! Scores loan applications with a pre-trained scaler and classifier.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                    CREDIT DECISION SERVICE                       │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  POST /predecir                                                  │
//! │     │                                                            │
//! │     ▼                                                            │
//! │  ┌───────────┐   ┌─────────────┐   ┌──────────────────────────┐  │
//! │  │ Request   │──▶│ Feature     │──▶│ Inference Adapter        │  │
//! │  │ Validator │   │ Projector   │   │ scaler → classifier      │  │
//! │  └───────────┘   └─────────────┘   └────────────┬─────────────┘  │
//! │                                                 ▼                │
//! │                                   ┌──────────────────────────┐   │
//! │                                   │ Artifacts (loaded once)  │   │
//! │                                   └──────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod features;
pub mod handlers;
pub mod inference;
pub mod lifecycle;
pub mod models;
pub mod validation;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{AppError, AppResult};

use features::FeatureProjector;
use inference::{artifacts::ArtifactInfo, InferenceAdapter};

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub projector: Arc<FeatureProjector>,
    pub adapter: Arc<InferenceAdapter>,
    pub artifacts: Arc<[ArtifactInfo]>,
    pub ready_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(projector: FeatureProjector, adapter: InferenceAdapter) -> Self {
        Self {
            projector: Arc::new(projector),
            adapter: Arc::new(adapter),
            artifacts: Arc::from(Vec::new()),
            ready_at: Utc::now(),
        }
    }

    /// Record where the artifacts came from, for `/modelo`
    pub fn with_artifacts(mut self, artifacts: Vec<ArtifactInfo>) -> Self {
        self.artifacts = Arc::from(artifacts);
        self
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/modelo", get(handlers::model::info))
        .route("/predecir", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
