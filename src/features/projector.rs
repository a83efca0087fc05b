//! Feature Projector
//!
//! Turns a validated application into the ordered vector the scaler and
//! classifier expect. The projector owns the column list; the request
//! validator reads names and bounds through it.

use super::layout::{credit_columns, Column, LayoutInfo, FEATURE_COUNT};
use super::vector::FeatureVector;
use crate::models::CreditApplication;

#[derive(Debug, Clone)]
pub struct FeatureProjector {
    columns: [Column; FEATURE_COUNT],
    layout: LayoutInfo,
}

impl FeatureProjector {
    /// Build the projector for the credit layout. Called once at startup.
    pub fn new() -> Self {
        let columns = credit_columns();
        let layout = LayoutInfo::from_columns(&columns);
        Self { columns, layout }
    }

    /// Columns in reference order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn layout(&self) -> &LayoutInfo {
        &self.layout
    }

    /// Select the twenty fields in reference order
    pub fn project(&self, application: &CreditApplication) -> FeatureVector {
        FeatureVector::from_values(std::array::from_fn(|i| {
            self.columns[i].value(application) as f64
        }))
    }
}

impl Default for FeatureProjector {
    fn default() -> Self {
        Self::new()
    }
}
