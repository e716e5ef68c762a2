//! Per-mode emission factors and the trip emissions calculation.
//!
//! The factor table is part of the stored data contract: `emissions_kg` is fixed at creation,
//! so changing a factor here never touches rows that already exist.

use crate::models::trip::TransportMode;

/// kg CO2e per km.
pub const fn emission_factor(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Flight => 0.158,
        TransportMode::Train => 0.028,
        TransportMode::Car => 0.12,
    }
}

/// Above this magnitude an f64 has no fractional digits left to round.
const ROUNDING_LIMIT: f64 = 1e15;

/// Rounds to 3 decimals, halves away from zero.
pub fn round_kg(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= ROUNDING_LIMIT {
        return value;
    }
    (value * 1000.0).round() / 1000.0
}

/// Expects a positive, finite distance; validation runs before this.
pub fn emissions_kg(distance_km: f64, mode: TransportMode) -> f64 {
    round_kg(distance_km * emission_factor(mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_table() {
        assert_eq!(emission_factor(TransportMode::Flight), 0.158);
        assert_eq!(emission_factor(TransportMode::Train), 0.028);
        assert_eq!(emission_factor(TransportMode::Car), 0.12);
    }

    #[test]
    fn hundred_km_per_mode() {
        assert_eq!(emissions_kg(100.0, TransportMode::Train), 2.8);
        assert_eq!(emissions_kg(100.0, TransportMode::Flight), 15.8);
        assert_eq!(emissions_kg(100.0, TransportMode::Car), 12.0);
    }

    #[test]
    fn result_has_three_decimals() {
        // 12.3456 * 0.028 = 0.3456768
        assert_eq!(emissions_kg(12.3456, TransportMode::Train), 0.346);
        // 1234.5678 * 0.158 = 195.0617124
        assert_eq!(emissions_kg(1234.5678, TransportMode::Flight), 195.062);
        // 0.001 * 0.12 = 0.00012
        assert_eq!(emissions_kg(0.001, TransportMode::Car), 0.0);
    }

    #[test]
    fn rounding_goes_away_from_zero_on_halves() {
        assert_eq!(round_kg(0.0625), 0.063);
        assert_eq!(round_kg(2.5), 2.5);
        assert_eq!(round_kg(-0.0625), -0.063);
    }

    #[test]
    fn huge_distances_keep_a_finite_product() {
        assert_eq!(emissions_kg(1e307, TransportMode::Flight), 1e307 * 0.158);
        assert_eq!(emissions_kg(f64::MAX, TransportMode::Car), f64::MAX * 0.12);
        assert!(emissions_kg(f64::MAX, TransportMode::Flight).is_finite());
    }

    #[test]
    fn tiny_distances_round_to_zero() {
        let subnormal = f64::from_bits(1);
        assert!(subnormal > 0.0);
        assert_eq!(emissions_kg(subnormal, TransportMode::Flight), 0.0);
        assert_eq!(emissions_kg(f64::MIN_POSITIVE, TransportMode::Train), 0.0);
    }

    #[test]
    fn rounding_stops_where_f64_has_no_decimals() {
        assert_eq!(round_kg(1e15 + 2.0), 1e15 + 2.0);
        assert_eq!(round_kg(-1e300), -1e300);
        assert_eq!(round_kg(123_456.789_4), 123_456.789);
    }

    #[test]
    fn round_kg_clears_float_noise() {
        assert_eq!(round_kg(2.8 + 1.4), 4.2);
        assert_eq!(round_kg(12.0 + 15.8 + 2.8), 30.6);
    }
}
