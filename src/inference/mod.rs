//! Inference Module - scaler and classifier seams
//!
//! The scaler and classifier are produced outside this service and loaded
//! from disk once at startup. Everything else only sees them through the
//! [`Scaler`] and [`Classifier`] traits, so tests can swap in mocks.

pub mod adapter;
pub mod artifacts;
pub mod classifier;
pub mod scaler;

use thiserror::Error;

use crate::features::{FeatureVector, ScaledVector};

pub use adapter::{InferenceAdapter, PredictionVariant};
pub use artifacts::{load_classifier, load_scaler, ArtifactError, ArtifactInfo, LoadedArtifact};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Failure inside the scaler or classifier while serving a request.
/// Never the caller's fault.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("scaler failed: {0}")]
    Scaler(String),

    #[error("classifier failed: {0}")]
    Classifier(String),

    #[error("classifier returned unexpected label {0}")]
    UnexpectedLabel(i64),

    #[error("classifier returned invalid rejection probability {0}")]
    InvalidProbability(f64),

    #[error("classifier does not support probability estimates")]
    ProbabilityUnsupported,
}

// ============================================================================
// ARTIFACT TRAITS
// ============================================================================

/// Pre-fitted feature transform
pub trait Scaler: Send + Sync {
    /// Short artifact kind, e.g. `standard_scaler`
    fn kind(&self) -> &'static str;

    fn transform(&self, features: &FeatureVector) -> Result<ScaledVector, InferenceError>;
}

/// Pre-trained binary classifier
pub trait Classifier: Send + Sync {
    /// Short artifact kind, e.g. `logistic_regression`
    fn kind(&self) -> &'static str;

    fn predict(&self, features: &ScaledVector) -> Result<i64, InferenceError>;

    fn supports_probability(&self) -> bool {
        false
    }

    /// `[p(label 0), p(label 1)]`
    fn predict_proba(&self, _features: &ScaledVector) -> Result<[f64; 2], InferenceError> {
        Err(InferenceError::ProbabilityUnsupported)
    }
}
