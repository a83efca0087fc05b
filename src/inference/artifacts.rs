//! Artifact loader
//!
//! Reads the scaler and classifier exported by the training notebook. Each
//! file is a JSON object with a `kind` tag, the fitted parameters and an
//! optional `feature_names` list that must match the projector layout.
//!
//! ```json
//! {"kind": "standard_scaler", "feature_names": ["Status_Existing_Account", ...],
//!  "mean": [...], "scale": [...]}
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::info;

use super::classifier::{DecisionTree, LinearSvc, LogisticRegression, TreeEnsemble};
use super::scaler::{MinMaxScaler, StandardScaler};
use super::{Classifier, Scaler};
use crate::features::{LayoutInfo, FEATURE_COUNT};

// ============================================================================
// ERRORS
// ============================================================================

/// Artifact could not be loaded. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("artifact {} is not a valid artifact file: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{kind}: {field} has {found} values, expected {expected}")]
    Dimension {
        kind: &'static str,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{kind}: {reason}")]
    InvalidParameter { kind: &'static str, reason: String },

    #[error("feature names do not match the layout: expected {expected:?}, found {found:?}")]
    LayoutMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

// ============================================================================
// FILE FORMAT
// ============================================================================

#[derive(Debug, Deserialize)]
struct ArtifactFile<T> {
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    #[serde(flatten)]
    params: T,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ScalerParams {
    StandardScaler {
        mean: Vec<f64>,
        scale: Vec<f64>,
        #[serde(default = "enabled")]
        with_mean: bool,
        #[serde(default = "enabled")]
        with_std: bool,
    },
    MinMaxScaler {
        min: Vec<f64>,
        scale: Vec<f64>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ClassifierParams {
    LogisticRegression {
        coef: Vec<f64>,
        intercept: f64,
        #[serde(default = "binary_classes")]
        classes: Vec<i64>,
    },
    LinearSvc {
        coef: Vec<f64>,
        intercept: f64,
        #[serde(default = "binary_classes")]
        classes: Vec<i64>,
    },
    TreeEnsemble {
        trees: Vec<TreeParams>,
        #[serde(default = "binary_classes")]
        classes: Vec<i64>,
    },
}

#[derive(Debug, Deserialize)]
struct TreeParams {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<[f64; 2]>,
}

fn enabled() -> bool {
    true
}

fn binary_classes() -> Vec<i64> {
    vec![0, 1]
}

// ============================================================================
// LOADED ARTIFACT
// ============================================================================

/// Provenance of a loaded artifact, reported by `/modelo`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactInfo {
    pub kind: String,
    pub path: String,
    pub sha256: String,
    pub size_bytes: usize,
}

pub struct LoadedArtifact<T: ?Sized> {
    pub value: Arc<T>,
    pub info: ArtifactInfo,
}

/// Load the scaler artifact
pub fn load_scaler(
    path: impl AsRef<Path>,
    layout: &LayoutInfo,
) -> Result<LoadedArtifact<dyn Scaler>, ArtifactError> {
    let path = path.as_ref();
    let (file, info_base) = read_artifact::<ScalerParams>(path)?;
    check_feature_names(file.feature_names, layout)?;

    let scaler: Arc<dyn Scaler> = match file.params {
        ScalerParams::StandardScaler {
            mean,
            scale,
            with_mean,
            with_std,
        } => {
            let mean = fixed(StandardScaler::KIND, "mean", mean)?;
            let scale = fixed(StandardScaler::KIND, "scale", scale)?;
            Arc::new(StandardScaler::new(
                with_mean.then_some(mean),
                with_std.then_some(scale),
            )?)
        }
        ScalerParams::MinMaxScaler { min, scale } => Arc::new(MinMaxScaler::new(
            fixed(MinMaxScaler::KIND, "min", min)?,
            fixed(MinMaxScaler::KIND, "scale", scale)?,
        )?),
    };

    let info = info_base.with_kind(scaler.kind());
    info!(path = %info.path, kind = %info.kind, sha256 = %info.sha256, "Scaler loaded");

    Ok(LoadedArtifact { value: scaler, info })
}

/// Load the classifier artifact
pub fn load_classifier(
    path: impl AsRef<Path>,
    layout: &LayoutInfo,
) -> Result<LoadedArtifact<dyn Classifier>, ArtifactError> {
    let path = path.as_ref();
    let (file, info_base) = read_artifact::<ClassifierParams>(path)?;
    check_feature_names(file.feature_names, layout)?;

    let classifier: Arc<dyn Classifier> = match file.params {
        ClassifierParams::LogisticRegression {
            coef,
            intercept,
            classes,
        } => {
            check_classes(LogisticRegression::KIND, &classes)?;
            Arc::new(LogisticRegression::new(
                fixed(LogisticRegression::KIND, "coef", coef)?,
                intercept,
            )?)
        }
        ClassifierParams::LinearSvc {
            coef,
            intercept,
            classes,
        } => {
            check_classes(LinearSvc::KIND, &classes)?;
            Arc::new(LinearSvc::new(fixed(LinearSvc::KIND, "coef", coef)?, intercept)?)
        }
        ClassifierParams::TreeEnsemble { trees, classes } => {
            check_classes(TreeEnsemble::KIND, &classes)?;
            let trees = trees
                .iter()
                .map(|t| {
                    DecisionTree::from_arrays(
                        &t.children_left,
                        &t.children_right,
                        &t.feature,
                        &t.threshold,
                        &t.value,
                    )
                })
                .collect::<Result<Vec<_>, _>>()?;
            Arc::new(TreeEnsemble::new(trees)?)
        }
    };

    let info = info_base.with_kind(classifier.kind());
    info!(
        path = %info.path,
        kind = %info.kind,
        sha256 = %info.sha256,
        probability = classifier.supports_probability(),
        "Classifier loaded"
    );

    Ok(LoadedArtifact { value: classifier, info })
}

// ============================================================================
// HELPERS
// ============================================================================

impl ArtifactInfo {
    fn with_kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }
}

fn read_artifact<P>(path: &Path) -> Result<(ArtifactFile<P>, ArtifactInfo), ArtifactError>
where
    P: for<'de> Deserialize<'de>,
{
    info!(path = %path.display(), "Loading artifact");

    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let file = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let info = ArtifactInfo {
        kind: String::new(),
        path: path.display().to_string(),
        sha256: hex::encode(Sha256::digest(&bytes)),
        size_bytes: bytes.len(),
    };

    Ok((file, info))
}

fn fixed(kind: &'static str, field: &'static str, values: Vec<f64>) -> Result<[f64; FEATURE_COUNT], ArtifactError> {
    let found = values.len();
    <[f64; FEATURE_COUNT]>::try_from(values).map_err(|_| ArtifactError::Dimension {
        kind,
        field,
        expected: FEATURE_COUNT,
        found,
    })
}

fn check_feature_names(names: Option<Vec<String>>, layout: &LayoutInfo) -> Result<(), ArtifactError> {
    match names {
        Some(found) if found != layout.feature_names => Err(ArtifactError::LayoutMismatch {
            expected: layout.feature_names.clone(),
            found,
        }),
        _ => Ok(()),
    }
}

fn check_classes(kind: &'static str, classes: &[i64]) -> Result<(), ArtifactError> {
    if classes == [0, 1] {
        Ok(())
    } else {
        Err(ArtifactError::InvalidParameter {
            kind,
            reason: format!("classes must be [0, 1], found {:?}", classes),
        })
    }
}
