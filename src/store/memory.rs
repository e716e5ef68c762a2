use futures::future::BoxFuture;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::TripRepository;
use crate::error::StoreError;
use crate::models::stats::{ModeEmissions, TripStats};
use crate::models::trip::{TransportMode, Trip};

/// Backend kept in process memory, for tests.
#[derive(Default)]
pub struct MemoryTripRepository {
    trips: RwLock<Vec<Trip>>,
}

impl MemoryTripRepository {
    /// Rows in insertion order.
    pub async fn snapshot(&self) -> Vec<Trip> {
        self.trips.read().await.clone()
    }

    async fn push(&self, trip: &Trip) -> Result<(), StoreError> {
        self.trips.write().await.push(trip.clone());
        Ok(())
    }

    async fn newest_first(&self) -> Result<Vec<Trip>, StoreError> {
        // Reverse first so equal timestamps keep the latest insert on top.
        let mut trips: Vec<Trip> = self.trips.read().await.iter().rev().cloned().collect();
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trips)
    }

    async fn sums(&self) -> Result<TripStats, StoreError> {
        let trips = self.trips.read().await;

        let mut sums: BTreeMap<&'static str, (TransportMode, f64)> = BTreeMap::new();
        for trip in trips.iter() {
            sums.entry(trip.mode.as_str())
                .or_insert((trip.mode, 0.0))
                .1 += trip.emissions_kg;
        }

        Ok(TripStats {
            total_kg: trips.iter().map(|t| t.emissions_kg).sum(),
            by_mode: sums
                .into_values()
                .map(|(mode, sum)| ModeEmissions { mode, sum })
                .collect(),
        })
    }
}

impl TripRepository for MemoryTripRepository {
    fn insert<'a>(&'a self, trip: &'a Trip) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(self.push(trip))
    }

    fn list(&self) -> BoxFuture<'_, Result<Vec<Trip>, StoreError>> {
        Box::pin(self.newest_first())
    }

    fn stats(&self) -> BoxFuture<'_, Result<TripStats, StoreError>> {
        Box::pin(self.sums())
    }
}
