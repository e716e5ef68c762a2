use futures::future::BoxFuture;
use futures::TryStreamExt;

use super::TripRepository;
use crate::db::{queries, DbPool};
use crate::error::StoreError;
use crate::models::stats::{ModeEmissions, TripStats};
use crate::models::trip::{TransportMode, Trip};

pub struct PgTripRepository {
    pool: DbPool,
}

impl PgTripRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PgTripRepository {
    async fn insert_trip(&self, trip: &Trip) -> Result<(), StoreError> {
        sqlx::query(queries::INSERT_TRIP)
            .bind(trip.id)
            .bind(trip.created_at)
            .bind(&trip.origin)
            .bind(&trip.destination)
            .bind(trip.distance_km)
            .bind(trip.mode)
            .bind(trip.emissions_kg)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_trips(&self) -> Result<Vec<Trip>, StoreError> {
        let trips = sqlx::query_as::<_, Trip>(queries::SELECT_TRIPS_NEWEST_FIRST)
            .fetch(&self.pool)
            .try_collect::<Vec<Trip>>()
            .await?;
        Ok(trips)
    }

    async fn sum_emissions(&self) -> Result<TripStats, StoreError> {
        let total_kg: f64 = sqlx::query_scalar(queries::SELECT_TOTAL_EMISSIONS)
            .fetch_one(&self.pool)
            .await?;

        let rows: Vec<(TransportMode, f64)> = sqlx::query_as(queries::SELECT_EMISSIONS_BY_MODE)
            .fetch_all(&self.pool)
            .await?;

        let by_mode = rows
            .into_iter()
            .map(|(mode, sum)| ModeEmissions { mode, sum })
            .collect();

        Ok(TripStats { total_kg, by_mode })
    }
}

impl TripRepository for PgTripRepository {
    fn insert<'a>(&'a self, trip: &'a Trip) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(self.insert_trip(trip))
    }

    fn list(&self) -> BoxFuture<'_, Result<Vec<Trip>, StoreError>> {
        Box::pin(self.list_trips())
    }

    fn stats(&self) -> BoxFuture<'_, Result<TripStats, StoreError>> {
        Box::pin(self.sum_emissions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::request::CreateTripRequest;
    use crate::store::TripStore;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;

    #[tokio::test]
    #[ignore = "needs a disposable Postgres database in DATABASE_URL"]
    async fn round_trip_against_postgres() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPoolOptions::new().max_connections(2).connect(&url).await.unwrap();
        db::run_migrations(&pool).await.unwrap();
        sqlx::query("TRUNCATE trips").execute(&pool).await.unwrap();

        let store = TripStore::new(Arc::new(PgTripRepository::new(pool)));
        assert_eq!(store.aggregate_stats().await.unwrap(), TripStats::empty());

        let train = store
            .create(CreateTripRequest::new("Milan", "Rome", 100.0, "TRAIN"))
            .await
            .unwrap();
        store
            .create(CreateTripRequest::new("Milan", "Rome", 100.0, "FLIGHT"))
            .await
            .unwrap();
        let car = store
            .create(CreateTripRequest::new("Milan", "Rome", 100.0, "CAR"))
            .await
            .unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0], car);
        assert_eq!(listed[2], train);

        let stats = store.aggregate_stats().await.unwrap();
        assert_eq!(stats.total_kg, 30.6);
        let modes: Vec<_> = stats.by_mode.iter().map(|m| m.mode).collect();
        assert_eq!(
            modes,
            [TransportMode::Car, TransportMode::Flight, TransportMode::Train]
        );
    }
}
