use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid trip: {}", describe(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

fn describe(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{} {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    #[cfg(test)]
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Failure of a trip store write: rejected input or a failed insert.
#[derive(Error, Debug)]
pub enum TripError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<TripError> for AppError {
    fn from(err: TripError) -> Self {
        match err {
            TripError::Validation(err) => AppError::Validation(err),
            TripError::Storage(err) => AppError::Storage(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(err) => {
                warn!("Rejected trip: {}", err);
                let body = json!({ "error": "validation failed", "fields": err.fields });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            AppError::MalformedPayload(reason) => {
                warn!("Malformed payload: {}", reason);
                let body = json!({ "error": format!("malformed payload: {reason}") });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            AppError::Storage(err) => {
                error!("Storage failure: {}", err);
                let body = json!({ "error": "internal storage failure" });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
