use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::error::AppError;
use crate::models::request::CreateTripRequest;
use crate::models::stats::TripStats;
use crate::models::trip::Trip;
use crate::store::TripStore;

#[derive(Clone)]
pub struct AppState {
    pub store: TripStore,
    pub openapi: Arc<Value>,
}

/// POST /trips
pub async fn create_trip_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Trip>), AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::MalformedPayload(rejection.body_text()))?;
    let request = trip_request(body)?;

    let trip = state.store.create(request).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

/// Only a JSON object is a trip; serde would otherwise match array elements by position.
fn trip_request(body: Value) -> Result<CreateTripRequest, AppError> {
    match body {
        Value::Object(map) => serde_json::from_value(Value::Object(map))
            .map_err(|e| AppError::MalformedPayload(e.to_string())),
        other => Err(AppError::MalformedPayload(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// GET /trips
pub async fn list_trips_handler(State(state): State<AppState>) -> Result<Json<Vec<Trip>>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// GET /trips/stats
pub async fn trip_stats_handler(State(state): State<AppState>) -> Result<Json<TripStats>, AppError> {
    Ok(Json(state.store.aggregate_stats().await?))
}

/// GET /openapi.json
pub async fn openapi_handler(State(state): State<AppState>) -> Json<Value> {
    Json(state.openapi.as_ref().clone())
}
