//! Credit decision model

use serde::{Deserialize, Serialize};

/// Binary outcome produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditLabel {
    Approved,
    Rejected,
}

impl CreditLabel {
    /// Map a raw classifier label. Anything other than 0 or 1 is not a
    /// label this service knows how to report.
    pub fn from_label(label: i64) -> Option<Self> {
        match label {
            0 => Some(Self::Approved),
            1 => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_label(self) -> u8 {
        match self {
            Self::Approved => 0,
            Self::Rejected => 1,
        }
    }

    /// Human-readable status returned to clients
    pub fn status(self) -> &'static str {
        match self {
            Self::Approved => "Aprobado",
            Self::Rejected => "Rechazado (Alto Riesgo)",
        }
    }
}

/// Response body of `POST /predecir`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    #[serde(rename = "prediccion_numerica")]
    pub label: u8,

    #[serde(rename = "status_credito")]
    pub status: String,

    /// Probability of class 1, rounded to 4 decimals. Only present in the
    /// extended response variant.
    #[serde(rename = "probabilidad_rechazo", skip_serializing_if = "Option::is_none", default)]
    pub rejection_probability: Option<f64>,
}

impl Decision {
    pub fn new(label: CreditLabel) -> Self {
        Self {
            label: label.as_label(),
            status: label.status().to_string(),
            rejection_probability: None,
        }
    }

    pub fn with_rejection_probability(mut self, probability: f64) -> Self {
        self.rejection_probability = Some(round_probability(probability));
        self
    }
}

/// Round to 4 decimal places
pub fn round_probability(probability: f64) -> f64 {
    (probability * 10_000.0).round() / 10_000.0
}
