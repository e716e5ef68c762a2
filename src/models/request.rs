use serde::Deserialize;
use serde_json::Value;

use super::trip::TransportMode;
use crate::emissions::emission_factor;
use crate::error::{FieldError, ValidationError};

/// Raw `POST /trips` body. Fields stay loosely typed so every violation can be
/// reported by name instead of failing on the first serde error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    #[serde(default)]
    pub origin: Option<Value>,
    #[serde(default)]
    pub destination: Option<Value>,
    #[serde(default)]
    pub distance_km: Option<Value>,
    #[serde(default)]
    pub mode: Option<Value>,
}

/// A trip that passed validation and may be handed to the calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub mode: TransportMode,
}

impl CreateTripRequest {
    #[cfg(test)]
    pub fn new(origin: &str, destination: &str, distance_km: f64, mode: &str) -> Self {
        Self {
            origin: Some(Value::from(origin)),
            destination: Some(Value::from(destination)),
            distance_km: Some(Value::from(distance_km)),
            mode: Some(Value::from(mode)),
        }
    }

    pub fn validate(self) -> Result<NewTrip, ValidationError> {
        let mut fields = Vec::new();

        let origin = required_text("origin", self.origin, &mut fields);
        let destination = required_text("destination", self.destination, &mut fields);
        let distance_km = positive_distance(self.distance_km, &mut fields);
        let mode = known_mode(self.mode, &mut fields);

        if let (Some(km), Some(mode)) = (distance_km, mode) {
            if !(km * emission_factor(mode)).is_finite() {
                fields.push(FieldError::new("distanceKm", "is too large"));
            }
        }

        match (origin, destination, distance_km, mode) {
            (Some(origin), Some(destination), Some(distance_km), Some(mode)) if fields.is_empty() => {
                Ok(NewTrip {
                    origin,
                    destination,
                    distance_km,
                    mode,
                })
            }
            _ => Err(ValidationError { fields }),
        }
    }
}

fn required_text(
    field: &'static str,
    value: Option<Value>,
    fields: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::String(_)) => {
            fields.push(FieldError::new(field, "must not be empty"));
            None
        }
        None | Some(Value::Null) => {
            fields.push(FieldError::new(field, "is required"));
            None
        }
        Some(_) => {
            fields.push(FieldError::new(field, "must be a string"));
            None
        }
    }
}

fn positive_distance(value: Option<Value>, fields: &mut Vec<FieldError>) -> Option<f64> {
    const FIELD: &str = "distanceKm";

    match value {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(km) if km.is_finite() && km > 0.0 => Some(km),
            _ => {
                fields.push(FieldError::new(FIELD, "must be greater than 0"));
                None
            }
        },
        None | Some(Value::Null) => {
            fields.push(FieldError::new(FIELD, "is required"));
            None
        }
        Some(_) => {
            fields.push(FieldError::new(FIELD, "must be a number"));
            None
        }
    }
}

fn known_mode(value: Option<Value>, fields: &mut Vec<FieldError>) -> Option<TransportMode> {
    const FIELD: &str = "mode";
    const ALLOWED: &str = "must be one of FLIGHT, TRAIN, CAR";

    match value {
        Some(Value::String(s)) => match s.parse() {
            Ok(mode) => Some(mode),
            Err(_) => {
                fields.push(FieldError::new(FIELD, ALLOWED));
                None
            }
        },
        None | Some(Value::Null) => {
            fields.push(FieldError::new(FIELD, "is required"));
            None
        }
        Some(_) => {
            fields.push(FieldError::new(FIELD, ALLOWED));
            None
        }
    }
}
