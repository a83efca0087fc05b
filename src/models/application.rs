//! Credit application model

use serde::{Deserialize, Serialize};

/// A validated loan application.
///
/// Only built by the request validator, after every field has been checked
/// for presence, type and range. Field names on the wire follow the
/// column names the model was trained on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreditApplication {
    #[serde(rename = "Status_Existing_Account")]
    pub status_existing_account: i64,
    #[serde(rename = "Duration_in_Month")]
    pub duration_in_month: i64,
    #[serde(rename = "Credit_History")]
    pub credit_history: i64,
    #[serde(rename = "Purpose")]
    pub purpose: i64,
    #[serde(rename = "Credit_Amount")]
    pub credit_amount: i64,
    #[serde(rename = "Savings_Account_Bonds")]
    pub savings_account_bonds: i64,
    #[serde(rename = "Present_Employment_Since")]
    pub present_employment_since: i64,
    #[serde(rename = "Installment_Rate_Percentage")]
    pub installment_rate_percentage: i64,
    #[serde(rename = "Personal_Status_Sex")]
    pub personal_status_sex: i64,
    #[serde(rename = "Other_Debtors_Guarantors")]
    pub other_debtors_guarantors: i64,
    #[serde(rename = "Present_Residence_Since")]
    pub present_residence_since: i64,
    #[serde(rename = "Property")]
    pub property: i64,
    #[serde(rename = "Age_in_Years")]
    pub age_in_years: i64,
    #[serde(rename = "Other_Installment_Plans")]
    pub other_installment_plans: i64,
    #[serde(rename = "Housing")]
    pub housing: i64,
    #[serde(rename = "Number_of_Existing_Credits")]
    pub number_of_existing_credits: i64,
    #[serde(rename = "Job")]
    pub job: i64,
    #[serde(rename = "Number_of_Dependents")]
    pub number_of_dependents: i64,
    #[serde(rename = "Telephone")]
    pub telephone: i64,
    #[serde(rename = "Foreign_Worker")]
    pub foreign_worker: i64,
}
