//! Service lifecycle
//!
//! `Initializing` → `Ready`, once. Loading consumes the initializing value,
//! so there is no path back and no way to serve without artifacts.

use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::features::FeatureProjector;
use crate::inference::adapter::MissingProbabilitySupport;
use crate::inference::{load_classifier, load_scaler, ArtifactError, InferenceAdapter};
use crate::{create_router, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Initializing,
    Ready,
}

/// Startup failed; the process must not start serving
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Probability(#[from] MissingProbabilitySupport),
}

/// Artifacts not loaded yet; not accepting traffic
pub struct Initializing {
    config: Config,
}

impl Initializing {
    pub fn new(config: Config) -> Self {
        tracing::info!(state = ?ServiceState::Initializing, "Service initializing");
        Self { config }
    }

    /// Load classifier then scaler. Blocking, runs exactly once before the
    /// listener is bound.
    pub fn load_artifacts(self) -> Result<Ready, StartupError> {
        let projector = FeatureProjector::new();
        let layout = projector.layout();
        tracing::info!(
            version = layout.version,
            hash = %format!("{:08x}", layout.hash),
            features = layout.feature_count,
            "Feature layout"
        );

        tracing::info!("Loading model...");
        let classifier = load_classifier(&self.config.model_path, layout)?;

        tracing::info!("Loading scaler...");
        let scaler = load_scaler(&self.config.scaler_path, layout)?;

        let adapter = InferenceAdapter::new(scaler.value, classifier.value, self.config.variant)?;
        tracing::info!(
            state = ?ServiceState::Ready,
            variant = %adapter.variant(),
            "Model and scaler ready"
        );

        let state = AppState::new(projector, adapter).with_artifacts(vec![classifier.info, scaler.info]);

        Ok(Ready {
            config: self.config,
            state,
        })
    }
}

/// Artifacts loaded; serving requests
pub struct Ready {
    config: Config,
    state: AppState,
}

impl Ready {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Bind and serve until the process stops
    pub async fn serve(self) -> std::io::Result<()> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("🚀 Server listening on http://{}", addr);

        axum::serve(listener, create_router(self.state)).await
    }
}
