//! Classifier implementations
//!
//! Linear models carry `coef_`/`intercept_`; tree models carry the parallel
//! node arrays of each fitted `tree_` (`children_left`, `children_right`,
//! `feature`, `threshold`, `value`). Labels are always 0 (approved) and
//! 1 (rejected).

use super::artifacts::ArtifactError;
use super::scaler::ensure_finite;
use super::{Classifier, InferenceError};
use crate::features::{ScaledVector, FEATURE_COUNT};

// ============================================================================
// LINEAR MODELS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct LinearDecision {
    coef: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearDecision {
    fn new(kind: &'static str, coef: [f64; FEATURE_COUNT], intercept: f64) -> Result<Self, ArtifactError> {
        ensure_finite(kind, "coef", &coef)?;
        ensure_finite(kind, "intercept", &[intercept])?;
        Ok(Self { coef, intercept })
    }

    fn score(&self, features: &ScaledVector) -> Result<f64, InferenceError> {
        let score = features
            .as_array()
            .iter()
            .zip(&self.coef)
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.intercept;

        if score.is_finite() {
            Ok(score)
        } else {
            Err(InferenceError::Classifier(format!("non-finite decision value {}", score)))
        }
    }

    fn label(score: f64) -> i64 {
        if score > 0.0 {
            1
        } else {
            0
        }
    }
}

/// Logistic regression: positive decision → label 1, `p(1) = sigmoid(d)`
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    decision: LinearDecision,
}

impl LogisticRegression {
    pub const KIND: &'static str = "logistic_regression";

    pub fn new(coef: [f64; FEATURE_COUNT], intercept: f64) -> Result<Self, ArtifactError> {
        Ok(Self {
            decision: LinearDecision::new(Self::KIND, coef, intercept)?,
        })
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn predict(&self, features: &ScaledVector) -> Result<i64, InferenceError> {
        self.decision.score(features).map(LinearDecision::label)
    }

    fn supports_probability(&self) -> bool {
        true
    }

    fn predict_proba(&self, features: &ScaledVector) -> Result<[f64; 2], InferenceError> {
        let score = self.decision.score(features)?;
        let rejected = 1.0 / (1.0 + (-score).exp());
        Ok([1.0 - rejected, rejected])
    }
}

/// Linear SVM: decision function only, no probability estimates
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSvc {
    decision: LinearDecision,
}

impl LinearSvc {
    pub const KIND: &'static str = "linear_svc";

    pub fn new(coef: [f64; FEATURE_COUNT], intercept: f64) -> Result<Self, ArtifactError> {
        Ok(Self {
            decision: LinearDecision::new(Self::KIND, coef, intercept)?,
        })
    }
}

impl Classifier for LinearSvc {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn predict(&self, features: &ScaledVector) -> Result<i64, InferenceError> {
        self.decision.score(features).map(LinearDecision::label)
    }
}

// ============================================================================
// TREE ENSEMBLE
// ============================================================================

/// Marker used by scikit-learn for "no child"
pub const TREE_LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        proba: [f64; 2],
    },
}

/// One fitted decision tree, flattened
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Build from scikit-learn's parallel node arrays.
    ///
    /// Children must point to a later node, which is how scikit-learn lays
    /// trees out and guarantees every walk terminates.
    pub fn from_arrays(
        children_left: &[i64],
        children_right: &[i64],
        feature: &[i64],
        threshold: &[f64],
        value: &[[f64; 2]],
    ) -> Result<Self, ArtifactError> {
        let count = children_left.len();
        if count == 0 {
            return Err(invalid_tree("tree has no nodes"));
        }
        for (name, len) in [
            ("children_right", children_right.len()),
            ("feature", feature.len()),
            ("threshold", threshold.len()),
            ("value", value.len()),
        ] {
            if len != count {
                return Err(invalid_tree(format!(
                    "{} has {} entries, children_left has {}",
                    name, len, count
                )));
            }
        }

        let mut nodes = Vec::with_capacity(count);
        for i in 0..count {
            let (left, right) = (children_left[i], children_right[i]);

            if left == TREE_LEAF || right == TREE_LEAF {
                if left != right {
                    return Err(invalid_tree(format!("node {} has exactly one child", i)));
                }
                nodes.push(Node::Leaf {
                    proba: normalize(i, value[i])?,
                });
                continue;
            }

            let child = |c: i64| match usize::try_from(c) {
                Ok(c) if c > i && c < count => Ok(c),
                _ => Err(invalid_tree(format!("node {} has invalid child {}", i, c))),
            };
            let split_feature = match usize::try_from(feature[i]) {
                Ok(f) if f < FEATURE_COUNT => f,
                _ => return Err(invalid_tree(format!("node {} splits on feature {}", i, feature[i]))),
            };
            if !threshold[i].is_finite() {
                return Err(invalid_tree(format!("node {} has non-finite threshold", i)));
            }

            nodes.push(Node::Split {
                feature: split_feature,
                threshold: threshold[i],
                left: child(left)?,
                right: child(right)?,
            });
        }

        Ok(Self { nodes })
    }

    fn leaf_proba(&self, features: &ScaledVector) -> [f64; 2] {
        let values = features.as_array();
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { proba } => return *proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if values[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

/// Decision tree or random forest: mean of per-tree leaf probabilities
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEnsemble {
    trees: Vec<DecisionTree>,
}

impl TreeEnsemble {
    pub const KIND: &'static str = "tree_ensemble";

    pub fn new(trees: Vec<DecisionTree>) -> Result<Self, ArtifactError> {
        if trees.is_empty() {
            return Err(invalid_tree("ensemble has no trees"));
        }
        Ok(Self { trees })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for TreeEnsemble {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn predict(&self, features: &ScaledVector) -> Result<i64, InferenceError> {
        let [approved, rejected] = self.predict_proba(features)?;
        // Ties go to the first class
        Ok(if rejected > approved { 1 } else { 0 })
    }

    fn supports_probability(&self) -> bool {
        true
    }

    fn predict_proba(&self, features: &ScaledVector) -> Result<[f64; 2], InferenceError> {
        let mut total = [0.0, 0.0];
        for tree in &self.trees {
            let [p0, p1] = tree.leaf_proba(features);
            total[0] += p0;
            total[1] += p1;
        }

        let n = self.trees.len() as f64;
        Ok([total[0] / n, total[1] / n])
    }
}

fn normalize(node: usize, weights: [f64; 2]) -> Result<[f64; 2], ArtifactError> {
    let [a, b] = weights;
    let sum = a + b;
    if !(a.is_finite() && b.is_finite()) || a < 0.0 || b < 0.0 || sum <= 0.0 {
        return Err(invalid_tree(format!("leaf {} has invalid class weights {:?}", node, weights)));
    }
    Ok([a / sum, b / sum])
}

fn invalid_tree(reason: impl Into<String>) -> ArtifactError {
    ArtifactError::InvalidParameter {
        kind: TreeEnsemble::KIND,
        reason: reason.into(),
    }
}
