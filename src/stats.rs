//! Route statistics: aggregate distance and travel-time estimation.
//!
//! Backend-supplied statistics are always preferred; the local estimate is
//! a fallback for responses that carry none.

use crate::geometry::{self, Coordinate};

/// Assumed base driving speed in km/h.
const BASE_SPEED_KMH: f64 = 30.0;

/// Derating applied to the base speed under emergency conditions.
///
/// Both constants are policy knobs, not measured values: the effective
/// assumption is 24 km/h.
const EMERGENCY_FACTOR: f64 = 0.8;

/// Aggregate distance and estimated travel time for one route.
///
/// Derived data only: either taken verbatim from the backend or recomputed
/// from a route, never edited field-by-field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStatistics {
    pub distance_km: f64,
    pub estimated_minutes: f64,
}

impl RouteStatistics {
    /// Local fallback: haversine distance sum plus the speed heuristic.
    pub fn from_route(route: &[Coordinate]) -> Self {
        let distance_km = geometry::total_distance_km(route);
        Self {
            distance_km,
            estimated_minutes: estimate_time_minutes(distance_km),
        }
    }
}

/// Estimated travel time in minutes for a distance in kilometers.
pub fn estimate_time_minutes(distance_km: f64) -> f64 {
    let adjusted_speed = BASE_SPEED_KMH * EMERGENCY_FACTOR;
    (distance_km / adjusted_speed) * 60.0
}

/// Formats minutes as whole hours plus rounded remaining minutes.
///
/// The hour component is omitted when zero: 95 -> "1h 35m", 45 -> "45m".
pub fn format_duration(minutes: f64) -> String {
    let hours = (minutes / 60.0).floor() as i64;
    let mins = (minutes % 60.0).round() as i64;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_speed_is_24_kmh() {
        // 24 km at 30 km/h derated by 0.8 is exactly one hour
        assert_eq!(estimate_time_minutes(24.0), 60.0);
    }

    #[test]
    fn zero_distance_is_zero_minutes() {
        assert_eq!(estimate_time_minutes(0.0), 0.0);
    }

    #[test]
    fn format_with_hours() {
        assert_eq!(format_duration(95.0), "1h 35m");
    }

    #[test]
    fn format_without_hours() {
        assert_eq!(format_duration(45.0), "45m");
    }

    #[test]
    fn format_rounds_minutes() {
        assert_eq!(format_duration(45.4), "45m");
        assert_eq!(format_duration(45.6), "46m");
    }

    #[test]
    fn from_route_matches_geometry() {
        let route = vec![
            Coordinate::new(28.6, 77.2),
            Coordinate::new(28.7, 77.2),
        ];
        let stats = RouteStatistics::from_route(&route);
        let distance = geometry::total_distance_km(&route);
        assert_eq!(stats.distance_km, distance);
        assert_eq!(stats.estimated_minutes, estimate_time_minutes(distance));
    }
}
