//! Route geometry: distances, turn angles, and key-point reduction.
//!
//! Everything in this module is a pure function over immutable coordinate
//! data and is safe to call from anywhere.

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Minimum turn angle for a point to count as a turn, in degrees.
const TURN_THRESHOLD_DEG: f64 = 30.0;

/// Minimum spacing from the previous point for a turn to count, in km.
/// Filters out micro-jitter on nearly-straight segments.
const TURN_MIN_SPACING_KM: f64 = 0.1;

/// Routes longer than this get intermediate uniform samples.
const UNIFORM_SAMPLE_MIN_LEN: usize = 10;

/// Divisor for the uniform sampling step (`step = n / UNIFORM_SAMPLE_DIVISOR`).
const UNIFORM_SAMPLE_DIVISOR: usize = 5;

/// A geographic point as (latitude, longitude) in degrees.
///
/// Immutable value type. Callers are responsible for keeping lat within
/// [-90, 90] and lng within [-180, 180]; out-of-range values are tolerated
/// by the rendering layer but produce meaningless distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned lat/lng bounding box, used for fit-to-view requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    /// Smallest box containing all points. None for an empty slice.
    pub fn of(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;
        let mut south = first.lat;
        let mut north = first.lat;
        let mut west = first.lng;
        let mut east = first.lng;

        for point in &points[1..] {
            south = south.min(point.lat);
            north = north.max(point.lat);
            west = west.min(point.lng);
            east = east.max(point.lng);
        }

        Some(Self {
            south_west: Coordinate::new(south, west),
            north_east: Coordinate::new(north, east),
        })
    }
}

/// Strategy for reducing a raw route to a set of key points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPointStrategy {
    /// Evenly spaced samples, roughly 5-7 points regardless of route length.
    /// Used for info-marker placement to avoid clutter on long routes.
    UniformSampling,
    /// Geometric detection: keep points where the route turns sharply.
    TurnBased,
}

/// Great-circle distance between two points in kilometers.
///
/// Symmetric, and zero iff the points coincide within float tolerance.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Turn angle at `p1`, in degrees, normalized into (-180, 180].
///
/// Computed as the difference between the incoming and outgoing planar
/// heading (`atan2(delta_lng, delta_lat)` per segment). A planar
/// approximation of the true spherical bearing, which is fine at city
/// scale.
pub fn bearing_delta_degrees(p0: Coordinate, p1: Coordinate, p2: Coordinate) -> f64 {
    let heading_in = (p1.lng - p0.lng).atan2(p1.lat - p0.lat);
    let heading_out = (p2.lng - p1.lng).atan2(p2.lat - p1.lat);

    let mut delta = (heading_out - heading_in).to_degrees();
    if delta <= -180.0 {
        delta += 360.0;
    }
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Sum of haversine distances over consecutive pairs, in kilometers.
///
/// Zero for routes of length <= 1.
pub fn total_distance_km(route: &[Coordinate]) -> f64 {
    route
        .windows(2)
        .map(|pair| haversine_km(pair[0], pair[1]))
        .sum()
}

/// Reduces a route to its key points using the given strategy.
///
/// For any input of length >= 2, the output starts with the route's first
/// point and ends with its last, in route order. Shorter inputs are
/// returned unchanged.
pub fn reduce_to_key_points(route: &[Coordinate], strategy: KeyPointStrategy) -> Vec<Coordinate> {
    if route.len() < 2 {
        return route.to_vec();
    }

    match strategy {
        KeyPointStrategy::UniformSampling => uniform_sample(route),
        KeyPointStrategy::TurnBased => turn_based(route),
    }
}

fn uniform_sample(route: &[Coordinate]) -> Vec<Coordinate> {
    let n = route.len();
    let mut points = vec![route[0]];

    if n > UNIFORM_SAMPLE_MIN_LEN {
        let step = n / UNIFORM_SAMPLE_DIVISOR;
        let mut i = step;
        while i < n - step {
            points.push(route[i]);
            i += step;
        }
    }

    points.push(route[n - 1]);
    points
}

fn turn_based(route: &[Coordinate]) -> Vec<Coordinate> {
    let n = route.len();
    let mut points = vec![route[0]];

    for i in 1..n - 1 {
        let delta = bearing_delta_degrees(route[i - 1], route[i], route[i + 1]);
        let spacing = haversine_km(route[i - 1], route[i]);
        if delta.abs() > TURN_THRESHOLD_DEG && spacing > TURN_MIN_SPACING_KM {
            points.push(route[i]);
        }
    }

    points.push(route[n - 1]);
    points
}
