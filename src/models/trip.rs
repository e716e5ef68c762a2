use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Transport category of a trip. Maps to the `transport_mode` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "transport_mode", rename_all = "UPPERCASE")]
pub enum TransportMode {
    Car,
    Flight,
    Train,
}

impl TransportMode {
    pub const ALL: [TransportMode; 3] = [TransportMode::Car, TransportMode::Flight, TransportMode::Train];

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Car => "CAR",
            TransportMode::Flight => "FLIGHT",
            TransportMode::Train => "TRAIN",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mode '{}'", self.0)
    }
}

impl FromStr for TransportMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

/// A stored journey. Rows are written once and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub mode: TransportMode,
    pub emissions_kg: f64,
}
