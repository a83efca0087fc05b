//! Scaler implementations
//!
//! Parameters are exported from the fitted scikit-learn transformers
//! (`mean_`/`scale_` for `StandardScaler`, `min_`/`scale_` for
//! `MinMaxScaler`) and applied column-wise in layout order.

use super::artifacts::ArtifactError;
use super::{InferenceError, Scaler};
use crate::features::{FeatureVector, ScaledVector, FEATURE_COUNT};

/// `x' = (x - mean) / scale`
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Option<[f64; FEATURE_COUNT]>,
    scale: Option<[f64; FEATURE_COUNT]>,
}

impl StandardScaler {
    pub const KIND: &'static str = "standard_scaler";

    /// `None` skips centering or scaling, like `with_mean=False` /
    /// `with_std=False`.
    pub fn new(
        mean: Option<[f64; FEATURE_COUNT]>,
        scale: Option<[f64; FEATURE_COUNT]>,
    ) -> Result<Self, ArtifactError> {
        if let Some(mean) = &mean {
            ensure_finite(Self::KIND, "mean", mean)?;
        }
        if let Some(scale) = &scale {
            ensure_finite(Self::KIND, "scale", scale)?;
            if let Some(i) = scale.iter().position(|s| *s == 0.0) {
                return Err(ArtifactError::InvalidParameter {
                    kind: Self::KIND,
                    reason: format!("scale[{}] is zero", i),
                });
            }
        }
        Ok(Self { mean, scale })
    }
}

impl Scaler for StandardScaler {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn transform(&self, features: &FeatureVector) -> Result<ScaledVector, InferenceError> {
        let mut values = *features.as_array();

        if let Some(mean) = &self.mean {
            values.iter_mut().zip(mean).for_each(|(v, m)| *v -= m);
        }
        if let Some(scale) = &self.scale {
            values.iter_mut().zip(scale).for_each(|(v, s)| *v /= s);
        }

        finish(values)
    }
}

/// `x' = x * scale + min`
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl MinMaxScaler {
    pub const KIND: &'static str = "min_max_scaler";

    pub fn new(min: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Result<Self, ArtifactError> {
        ensure_finite(Self::KIND, "min", &min)?;
        ensure_finite(Self::KIND, "scale", &scale)?;
        Ok(Self { min, scale })
    }
}

impl Scaler for MinMaxScaler {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn transform(&self, features: &FeatureVector) -> Result<ScaledVector, InferenceError> {
        let values = std::array::from_fn(|i| features.as_array()[i] * self.scale[i] + self.min[i]);
        finish(values)
    }
}

pub(crate) fn ensure_finite(kind: &'static str, field: &str, values: &[f64]) -> Result<(), ArtifactError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(ArtifactError::InvalidParameter {
            kind,
            reason: format!("{}[{}] is not finite", field, i),
        }),
        None => Ok(()),
    }
}

fn finish(values: [f64; FEATURE_COUNT]) -> Result<ScaledVector, InferenceError> {
    let scaled = ScaledVector::from_values(values);
    match scaled.first_non_finite() {
        Some(i) => Err(InferenceError::Scaler(format!("non-finite output at column {}", i))),
        None => Ok(scaled),
    }
}
