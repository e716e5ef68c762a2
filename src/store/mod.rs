use chrono::{SubsecRound, Utc};
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::emissions::{emissions_kg, round_kg};
use crate::error::{StoreError, TripError};
use crate::models::request::CreateTripRequest;
use crate::models::stats::{ModeEmissions, TripStats};
use crate::models::trip::Trip;

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// Durable trip storage. Each call is one independent unit of work against the backend.
pub trait TripRepository: Send + Sync {
    fn insert<'a>(&'a self, trip: &'a Trip) -> BoxFuture<'a, Result<(), StoreError>>;

    /// All trips, newest first.
    fn list(&self) -> BoxFuture<'_, Result<Vec<Trip>, StoreError>>;

    /// Raw sums. `by_mode` holds only modes with trips, ordered by mode name.
    fn stats(&self) -> BoxFuture<'_, Result<TripStats, StoreError>>;
}

#[derive(Clone)]
pub struct TripStore {
    repo: Arc<dyn TripRepository>,
}

impl TripStore {
    pub fn new(repo: Arc<dyn TripRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, request: CreateTripRequest) -> Result<Trip, TripError> {
        let new_trip = request.validate()?;

        let trip = Trip {
            id: Uuid::new_v4(),
            // timestamptz keeps microseconds
            created_at: Utc::now().trunc_subsecs(6),
            emissions_kg: emissions_kg(new_trip.distance_km, new_trip.mode),
            origin: new_trip.origin,
            destination: new_trip.destination,
            distance_km: new_trip.distance_km,
            mode: new_trip.mode,
        };

        self.repo.insert(&trip).await?;
        info!(
            "Recorded trip {} ({}, {} km, {} kg CO2e)",
            trip.id, trip.mode, trip.distance_km, trip.emissions_kg
        );

        Ok(trip)
    }

    pub async fn list(&self) -> Result<Vec<Trip>, StoreError> {
        self.repo.list().await
    }

    pub async fn aggregate_stats(&self) -> Result<TripStats, StoreError> {
        let raw = self.repo.stats().await?;

        // Sums of 3-decimal values drift in f64; bring them back to the stored precision.
        Ok(TripStats {
            total_kg: round_kg(raw.total_kg),
            by_mode: raw
                .by_mode
                .into_iter()
                .map(|entry| ModeEmissions {
                    mode: entry.mode,
                    sum: round_kg(entry.sum),
                })
                .collect(),
        })
    }
}
