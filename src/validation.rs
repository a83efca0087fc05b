//! Request validation
//!
//! Checks a parsed JSON body against the projector's column list and either
//! returns a [`CreditApplication`] or every problem found. Nothing here knows
//! about HTTP; `AppError` maps the outcome to a status code.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::features::FeatureProjector;
use crate::models::CreditApplication;

/// Why a single field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldErrorKind {
    #[serde(rename = "faltante")]
    Missing,
    #[serde(rename = "tipo_invalido")]
    InvalidType,
    #[serde(rename = "fuera_de_rango")]
    OutOfRange,
    #[serde(rename = "no_reconocido")]
    UnknownField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(rename = "campo")]
    pub field: String,
    #[serde(rename = "motivo")]
    pub kind: FieldErrorKind,
    #[serde(rename = "mensaje")]
    pub message: String,
}

impl FieldError {
    fn missing(field: &str) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::Missing,
            message: "campo obligatorio ausente".to_string(),
        }
    }

    fn invalid_type(field: &str, found: &Value) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::InvalidType,
            message: format!("se esperaba un número entero, se recibió {}", describe(found)),
        }
    }

    fn out_of_range(field: &str, value: i64, min: i64, max: i64) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::OutOfRange,
            message: format!("el valor {} está fuera del rango permitido [{}, {}]", value, min, max),
        }
    }

    fn unknown(field: &str) -> Self {
        Self {
            field: field.to_string(),
            kind: FieldErrorKind::UnknownField,
            message: "campo no reconocido".to_string(),
        }
    }
}

/// One or more fields failed validation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} campo(s) inválido(s): {}", .errors.len(), field_list(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn names(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Body could not be read as a JSON object
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RequestFormatError(pub String);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    #[error(transparent)]
    Malformed(#[from] RequestFormatError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Validate a request body.
///
/// Errors are reported in column order, followed by unknown keys in key
/// order.
pub fn validate_payload(
    payload: &Value,
    projector: &FeatureProjector,
) -> Result<CreditApplication, PayloadError> {
    let Value::Object(fields) = payload else {
        return Err(RequestFormatError(format!(
            "el cuerpo debe ser un objeto JSON, se recibió {}",
            describe(payload)
        ))
        .into());
    };

    let errors = collect_errors(fields, projector);
    if !errors.is_empty() {
        return Err(ValidationError { errors }.into());
    }

    serde_json::from_value(payload.clone())
        .map_err(|e| RequestFormatError(e.to_string()).into())
}

fn collect_errors(fields: &Map<String, Value>, projector: &FeatureProjector) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for column in projector.columns() {
        match fields.get(column.name) {
            None => errors.push(FieldError::missing(column.name)),
            Some(value) => match value.as_i64() {
                None => errors.push(FieldError::invalid_type(column.name, value)),
                Some(n) if !column.accepts(n) => {
                    errors.push(FieldError::out_of_range(column.name, n, column.min, column.max))
                }
                Some(_) => {}
            },
        }
    }

    let mut unknown: Vec<&String> = fields
        .keys()
        .filter(|key| projector.column(key).is_none())
        .collect();
    unknown.sort();
    errors.extend(unknown.into_iter().map(|key| FieldError::unknown(key)));

    errors
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "un booleano",
        Value::Number(n) if n.is_f64() => "un número decimal",
        Value::Number(_) => "un entero fuera de rango",
        Value::String(_) => "texto",
        Value::Array(_) => "una lista",
        Value::Object(_) => "un objeto",
    }
}

fn field_list(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "Status_Existing_Account": 1,
            "Duration_in_Month": 24,
            "Credit_History": 2,
            "Purpose": 3,
            "Credit_Amount": 5000,
            "Savings_Account_Bonds": 0,
            "Present_Employment_Since": 2,
            "Installment_Rate_Percentage": 4,
            "Personal_Status_Sex": 1,
            "Other_Debtors_Guarantors": 0,
            "Present_Residence_Since": 2,
            "Property": 1,
            "Age_in_Years": 35,
            "Other_Installment_Plans": 2,
            "Housing": 1,
            "Number_of_Existing_Credits": 1,
            "Job": 2,
            "Number_of_Dependents": 1,
            "Telephone": 0,
            "Foreign_Worker": 1
        })
    }

    fn expect_invalid(payload: &Value) -> ValidationError {
        match validate_payload(payload, &FeatureProjector::new()) {
            Err(PayloadError::Invalid(e)) => e,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_payload_accepted() {
        let application = validate_payload(&valid_payload(), &FeatureProjector::new()).unwrap();
        assert_eq!(application.credit_amount, 5000);
        assert_eq!(application.age_in_years, 35);
    }

    #[test]
    fn test_every_bound_rejected_one_past_each_end() {
        let projector = FeatureProjector::new();
        for column in projector.columns() {
            for bad in [column.min - 1, column.max + 1] {
                let mut payload = valid_payload();
                payload[column.name] = json!(bad);

                let err = expect_invalid(&payload);
                assert_eq!(err.errors.len(), 1, "{} = {}", column.name, bad);
                assert_eq!(err.errors[0].field, column.name);
                assert_eq!(err.errors[0].kind, FieldErrorKind::OutOfRange);
            }
        }
    }

    #[test]
    fn test_every_bound_accepted_at_each_end() {
        let projector = FeatureProjector::new();
        for column in projector.columns() {
            for good in [column.min, column.max] {
                let mut payload = valid_payload();
                payload[column.name] = json!(good);
                assert!(validate_payload(&payload, &projector).is_ok(), "{} = {}", column.name, good);
            }
        }
    }

    #[test]
    fn test_duration_below_minimum() {
        let mut payload = valid_payload();
        payload["Duration_in_Month"] = json!(3);

        let err = expect_invalid(&payload);
        assert!(err.names("Duration_in_Month"));
        assert!(err.to_string().contains("Duration_in_Month"));
        assert!(err.errors[0].message.contains("[4, 72]"));
    }

    #[test]
    fn test_missing_field_named() {
        let projector = FeatureProjector::new();
        for column in projector.columns() {
            let mut payload = valid_payload();
            payload.as_object_mut().unwrap().remove(column.name);

            let err = expect_invalid(&payload);
            assert_eq!(err.errors.len(), 1);
            assert_eq!(err.errors[0].field, column.name);
            assert_eq!(err.errors[0].kind, FieldErrorKind::Missing);
        }
    }

    #[test]
    fn test_extra_field_rejected() {
        let mut payload = valid_payload();
        payload["Nombre"] = json!("Ana");

        let err = expect_invalid(&payload);
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "Nombre");
        assert_eq!(err.errors[0].kind, FieldErrorKind::UnknownField);
    }

    #[test]
    fn test_wrong_types_rejected() {
        for bad in [json!("24"), json!(24.5), json!(24.0), json!(true), json!(null), json!([24])] {
            let mut payload = valid_payload();
            payload["Duration_in_Month"] = bad.clone();

            let err = expect_invalid(&payload);
            assert_eq!(err.errors.len(), 1, "value {}", bad);
            assert_eq!(err.errors[0].kind, FieldErrorKind::InvalidType);
        }
    }

    #[test]
    fn test_all_errors_reported_together() {
        let mut payload = valid_payload();
        let fields = payload.as_object_mut().unwrap();
        fields.remove("Purpose");
        fields.insert("Age_in_Years".to_string(), json!(90));
        fields.insert("Job".to_string(), json!("dos"));
        fields.insert("zeta".to_string(), json!(1));
        fields.insert("alfa".to_string(), json!(1));

        let err = expect_invalid(&payload);
        let names: Vec<_> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(names, vec!["Purpose", "Age_in_Years", "Job", "alfa", "zeta"]);
    }

    #[test]
    fn test_non_object_is_malformed() {
        let projector = FeatureProjector::new();
        for body in [json!([1, 2, 3]), json!("texto"), json!(42), json!(null)] {
            match validate_payload(&body, &projector) {
                Err(PayloadError::Malformed(_)) => {}
                other => panic!("expected malformed error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_field_error_wire_format() {
        let error = FieldError::out_of_range("Duration_in_Month", 3, 4, 72);
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "campo": "Duration_in_Month",
                "motivo": "fuera_de_rango",
                "mensaje": "el valor 3 está fuera del rango permitido [4, 72]"
            })
        );
    }
}
