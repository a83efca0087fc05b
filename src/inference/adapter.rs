//! Inference Adapter
//!
//! Runs scaler → classifier for one feature vector and packages the result
//! as a [`Decision`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Classifier, InferenceError, Scaler};
use crate::features::FeatureVector;
use crate::models::{CreditLabel, Decision};

/// Shape of the `POST /predecir` success body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionVariant {
    /// Label and status only
    Minimal,
    /// Label, status and rejection probability
    #[default]
    Extended,
}

impl FromStr for PredictionVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "extended" => Ok(Self::Extended),
            other => Err(format!("unknown prediction variant '{}'", other)),
        }
    }
}

impl fmt::Display for PredictionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimal => write!(f, "minimal"),
            Self::Extended => write!(f, "extended"),
        }
    }
}

/// Configured extended variant, but the classifier cannot estimate
/// probabilities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("prediction variant 'extended' requires a classifier with probability estimates, '{kind}' has none")]
pub struct MissingProbabilitySupport {
    pub kind: String,
}

#[derive(Clone)]
pub struct InferenceAdapter {
    scaler: Arc<dyn Scaler>,
    classifier: Arc<dyn Classifier>,
    variant: PredictionVariant,
}

impl InferenceAdapter {
    /// The extended variant refuses classifiers without `predict_proba`
    /// instead of silently dropping the probability field.
    pub fn new(
        scaler: Arc<dyn Scaler>,
        classifier: Arc<dyn Classifier>,
        variant: PredictionVariant,
    ) -> Result<Self, MissingProbabilitySupport> {
        if variant == PredictionVariant::Extended && !classifier.supports_probability() {
            return Err(MissingProbabilitySupport {
                kind: classifier.kind().to_string(),
            });
        }

        Ok(Self {
            scaler,
            classifier,
            variant,
        })
    }

    pub fn variant(&self) -> PredictionVariant {
        self.variant
    }

    pub fn scaler_kind(&self) -> &'static str {
        self.scaler.kind()
    }

    pub fn classifier_kind(&self) -> &'static str {
        self.classifier.kind()
    }

    pub fn supports_probability(&self) -> bool {
        self.classifier.supports_probability()
    }

    /// transform → predict (→ predict_proba)
    pub fn decide(&self, features: &FeatureVector) -> Result<Decision, InferenceError> {
        let scaled = self.scaler.transform(features)?;

        let raw = self.classifier.predict(&scaled)?;
        let label = CreditLabel::from_label(raw).ok_or(InferenceError::UnexpectedLabel(raw))?;
        let decision = Decision::new(label);

        match self.variant {
            PredictionVariant::Minimal => Ok(decision),
            PredictionVariant::Extended => {
                let [_, rejected] = self.classifier.predict_proba(&scaled)?;
                if !(0.0..=1.0).contains(&rejected) {
                    return Err(InferenceError::InvalidProbability(rejected));
                }
                Ok(decision.with_rejection_probability(rejected))
            }
        }
    }
}

impl fmt::Debug for InferenceAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceAdapter")
            .field("scaler", &self.scaler.kind())
            .field("classifier", &self.classifier.kind())
            .field("variant", &self.variant)
            .finish()
    }
}
