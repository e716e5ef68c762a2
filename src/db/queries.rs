pub const INSERT_TRIP: &str = r#"
INSERT INTO trips (id, created_at, origin, destination, distance_km, mode, emissions_kg)
VALUES ($1, $2, $3, $4, $5, $6, $7);
"#;

pub const SELECT_TRIPS_NEWEST_FIRST: &str = r#"
SELECT id, created_at, origin, destination, distance_km, mode, emissions_kg
FROM trips
ORDER BY created_at DESC;
"#;

pub const SELECT_TOTAL_EMISSIONS: &str = r#"
SELECT COALESCE(SUM(emissions_kg), 0)::float8 AS total FROM trips;
"#;

// Grouping only yields modes that have rows; absent modes stay absent.
pub const SELECT_EMISSIONS_BY_MODE: &str = r#"
SELECT mode, SUM(emissions_kg)::float8 AS sum
FROM trips
GROUP BY mode
ORDER BY mode::text ASC;
"#;
