//! Error handling
//!
//! Translates the three request error kinds into HTTP responses. This is
//! the only place that knows about status codes.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::inference::InferenceError;
use crate::validation::{PayloadError, RequestFormatError, ValidationError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("malformed request: {0}")]
    RequestFormat(#[from] RequestFormatError),

    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),
}

impl From<PayloadError> for AppError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Malformed(e) => AppError::RequestFormat(e),
            PayloadError::Invalid(e) => AppError::Validation(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::RequestFormat(RequestFormatError(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(err) => {
                tracing::warn!("Validation failed: {}", err);
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "Datos de entrada inválidos",
                        "detalles": err.errors,
                    }),
                )
            }
            AppError::RequestFormat(err) => {
                tracing::warn!("Malformed request: {}", err);
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": "Solicitud malformada",
                        "detalles": err.0,
                    }),
                )
            }
            AppError::Inference(err) => {
                tracing::error!("Inference error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Error interno durante la inferencia",
                        "detalles": err.to_string(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
