use serde::Serialize;

use super::trip::TransportMode;

/// Summed emissions for one mode that has at least one trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeEmissions {
    pub mode: TransportMode,
    pub sum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripStats {
    pub total_kg: f64,
    /// Ordered by mode name. Modes without trips are absent, not zero.
    pub by_mode: Vec<ModeEmissions>,
}

impl TripStats {
    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            total_kg: 0.0,
            by_mode: Vec::new(),
        }
    }
}
