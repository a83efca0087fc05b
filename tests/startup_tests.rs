//! Startup Integration Tests
//!
//! Loads real artifact files through the lifecycle and serves a request
//! with them.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use credit_decision_service::config::Config;
use credit_decision_service::create_router;
use credit_decision_service::features::{FeatureProjector, FEATURE_COUNT};
use credit_decision_service::inference::PredictionVariant;
use credit_decision_service::lifecycle::{Initializing, StartupError};

fn config(dir: &std::path::Path, variant: PredictionVariant) -> Config {
    let mut config = Config::from_lookup(|_| None);
    config.model_path = dir.join("modelo_diamante_v3.json");
    config.scaler_path = dir.join("scaler_diamante.json");
    config.variant = variant;
    config
}

/// Standard scaler centred on a typical applicant; logistic regression that
/// only looks at the scaled credit amount.
fn write_artifacts(dir: &std::path::Path) {
    let names = FeatureProjector::new().layout().feature_names.clone();

    let mut mean = vec![0.0; FEATURE_COUNT];
    let mut scale = vec![1.0; FEATURE_COUNT];
    mean[4] = 3000.0;
    scale[4] = 2000.0;
    std::fs::write(
        dir.join("scaler_diamante.json"),
        json!({
            "kind": "standard_scaler",
            "feature_names": names,
            "mean": mean,
            "scale": scale
        })
        .to_string(),
    )
    .unwrap();

    let mut coef = vec![0.0; FEATURE_COUNT];
    coef[4] = 2.0;
    std::fs::write(
        dir.join("modelo_diamante_v3.json"),
        json!({
            "kind": "logistic_regression",
            "feature_names": names,
            "coef": coef,
            "intercept": -1.0,
            "classes": [0, 1]
        })
        .to_string(),
    )
    .unwrap();
}

fn applicant(credit_amount: i64) -> Value {
    json!({
        "Foreign_Worker": 1,
        "Telephone": 0,
        "Number_of_Dependents": 1,
        "Job": 2,
        "Number_of_Existing_Credits": 1,
        "Housing": 1,
        "Other_Installment_Plans": 2,
        "Age_in_Years": 35,
        "Property": 1,
        "Present_Residence_Since": 2,
        "Other_Debtors_Guarantors": 0,
        "Personal_Status_Sex": 1,
        "Installment_Rate_Percentage": 4,
        "Present_Employment_Since": 2,
        "Savings_Account_Bonds": 0,
        "Credit_Amount": credit_amount,
        "Purpose": 3,
        "Credit_History": 2,
        "Duration_in_Month": 24,
        "Status_Existing_Account": 1
    })
}

async fn predict(app: axum::Router, body: &Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predecir")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_loaded_artifacts_serve_decisions() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());

    let ready = Initializing::new(config(dir.path(), PredictionVariant::Extended))
        .load_artifacts()
        .unwrap();
    let app = create_router(ready.state().clone());

    // (3000 - 3000) / 2000 * 2 - 1 = -1 → approved, p = sigmoid(-1)
    let (status, body) = predict(app.clone(), &applicant(3000)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediccion_numerica"], 0);
    assert_eq!(body["status_credito"], "Aprobado");
    assert_eq!(body["probabilidad_rechazo"], 0.2689);

    // (7000 - 3000) / 2000 * 2 - 1 = 3 → rejected, p = sigmoid(3)
    let (status, body) = predict(app, &applicant(7000)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediccion_numerica"], 1);
    assert_eq!(body["status_credito"], "Rechazado (Alto Riesgo)");
    assert_eq!(body["probabilidad_rechazo"], 0.9526);
}

#[tokio::test]
async fn test_model_info_reports_checksums() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());

    let ready = Initializing::new(config(dir.path(), PredictionVariant::Minimal))
        .load_artifacts()
        .unwrap();
    let app = create_router(ready.state().clone());

    let response = app
        .oneshot(Request::builder().uri("/modelo").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["variant"], "minimal");
    assert_eq!(body["artifacts"][0]["kind"], "logistic_regression");
    assert_eq!(body["artifacts"][1]["kind"], "standard_scaler");
    assert_eq!(body["artifacts"][0]["sha256"].as_str().unwrap().len(), 64);
}

#[test]
fn test_corrupt_scaler_prevents_ready() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());
    std::fs::write(dir.path().join("scaler_diamante.json"), b"\x80\x04\x95pickle").unwrap();

    let result = Initializing::new(config(dir.path(), PredictionVariant::Minimal)).load_artifacts();
    assert!(matches!(result, Err(StartupError::Artifact(_))));
}

#[test]
fn test_reordered_feature_names_prevent_ready() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path());

    let mut names = FeatureProjector::new().layout().feature_names.clone();
    names.reverse();
    std::fs::write(
        dir.path().join("scaler_diamante.json"),
        json!({
            "kind": "min_max_scaler",
            "feature_names": names,
            "min": vec![0.0; FEATURE_COUNT],
            "scale": vec![1.0; FEATURE_COUNT]
        })
        .to_string(),
    )
    .unwrap();

    let result = Initializing::new(config(dir.path(), PredictionVariant::Minimal)).load_artifacts();
    assert!(matches!(result, Err(StartupError::Artifact(_))));
}
