//! Feature Layout - Centralized column definition
//!
//! The scaler and classifier were fitted on the twenty application columns
//! in exactly the order returned by [`credit_columns`]. Validation bounds
//! live next to the column they constrain, so field order and bounds have a
//! single source.
//!
//! ## Rules
//! 1. Add, remove or reorder a column → increment `LAYOUT_VERSION`
//! 2. Retrained artifacts must be exported with the same column order

use std::fmt;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::models::CreditApplication;

// ============================================================================
// LAYOUT VERSION
// ============================================================================

/// Current layout version
pub const LAYOUT_VERSION: u8 = 1;

/// Number of model input columns
pub const FEATURE_COUNT: usize = 20;

// ============================================================================
// COLUMN
// ============================================================================

/// One model input column: wire name, inclusive bounds and the accessor that
/// reads it from a validated application.
#[derive(Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub min: i64,
    pub max: i64,
    read: fn(&CreditApplication) -> i64,
}

impl Column {
    fn new(name: &'static str, min: i64, max: i64, read: fn(&CreditApplication) -> i64) -> Self {
        Self { name, min, max, read }
    }

    /// Read this column from an application
    pub fn value(&self, application: &CreditApplication) -> i64 {
        (self.read)(application)
    }

    /// Inclusive bound check
    pub fn accepts(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish()
    }
}

/// The reference column order. Authoritative.
pub fn credit_columns() -> [Column; FEATURE_COUNT] {
    [
        Column::new("Status_Existing_Account", 0, 4, |a| a.status_existing_account),
        Column::new("Duration_in_Month", 4, 72, |a| a.duration_in_month),
        Column::new("Credit_History", 0, 4, |a| a.credit_history),
        Column::new("Purpose", 0, 10, |a| a.purpose),
        Column::new("Credit_Amount", 250, 18420, |a| a.credit_amount),
        Column::new("Savings_Account_Bonds", 0, 4, |a| a.savings_account_bonds),
        Column::new("Present_Employment_Since", 0, 4, |a| a.present_employment_since),
        Column::new("Installment_Rate_Percentage", 1, 4, |a| a.installment_rate_percentage),
        Column::new("Personal_Status_Sex", 0, 3, |a| a.personal_status_sex),
        Column::new("Other_Debtors_Guarantors", 0, 2, |a| a.other_debtors_guarantors),
        Column::new("Present_Residence_Since", 1, 4, |a| a.present_residence_since),
        Column::new("Property", 0, 3, |a| a.property),
        Column::new("Age_in_Years", 19, 75, |a| a.age_in_years),
        Column::new("Other_Installment_Plans", 0, 2, |a| a.other_installment_plans),
        Column::new("Housing", 0, 2, |a| a.housing),
        Column::new("Number_of_Existing_Credits", 1, 4, |a| a.number_of_existing_credits),
        Column::new("Job", 0, 3, |a| a.job),
        Column::new("Number_of_Dependents", 1, 2, |a| a.number_of_dependents),
        Column::new("Telephone", 0, 1, |a| a.telephone),
        Column::new("Foreign_Worker", 0, 1, |a| a.foreign_worker),
    ]
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over the layout version and the ordered column names.
/// Logged at startup and exposed by `/modelo` so a deployment can be matched
/// against the layout its artifacts were exported with.
pub fn compute_layout_hash(columns: &[Column]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[LAYOUT_VERSION]);

    for column in columns {
        hasher.update(column.name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout summary for logging and the model-info endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn from_columns(columns: &[Column]) -> Self {
        Self {
            version: LAYOUT_VERSION,
            hash: compute_layout_hash(columns),
            feature_count: columns.len(),
            feature_names: columns.iter().map(|c| c.name.to_string()).collect(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_column_names_unique() {
        let columns = credit_columns();
        let names: HashSet<_> = columns.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_bounds_are_ordered() {
        for column in credit_columns() {
            assert!(column.min <= column.max, "{} has inverted bounds", column.name);
            assert!(column.accepts(column.min));
            assert!(column.accepts(column.max));
            assert!(!column.accepts(column.min - 1));
            assert!(!column.accepts(column.max + 1));
        }
    }

    #[test]
    fn test_reference_order() {
        let columns = credit_columns();
        assert_eq!(columns[0].name, "Status_Existing_Account");
        assert_eq!(columns[4].name, "Credit_Amount");
        assert_eq!(columns[4].min, 250);
        assert_eq!(columns[4].max, 18420);
        assert_eq!(columns[12].name, "Age_in_Years");
        assert_eq!(columns[19].name, "Foreign_Worker");
    }

    #[test]
    fn test_layout_hash_deterministic() {
        let columns = credit_columns();
        assert_eq!(compute_layout_hash(&columns), compute_layout_hash(&columns));
    }

    #[test]
    fn test_layout_hash_detects_reorder() {
        let mut columns = credit_columns();
        let original = compute_layout_hash(&columns);
        columns.swap(0, 1);
        assert_ne!(original, compute_layout_hash(&columns));
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::from_columns(&credit_columns());
        assert_eq!(info.version, LAYOUT_VERSION);
        assert_eq!(info.feature_count, FEATURE_COUNT);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
        assert_eq!(info.feature_names[1], "Duration_in_Month");
    }
}
