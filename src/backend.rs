//! HTTP adapter for the routing backend.
//!
//! Wire shapes follow the backend contract exactly: coordinates travel as
//! `[lat, lng]` pairs, and failures carry a `{ "error": ... }` body with a
//! non-2xx status.

use serde::{Deserialize, Serialize};

use crate::geometry::Coordinate;
use crate::stats::RouteStatistics;
use crate::traits::{RouteError, RouteService};

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// One entry of the city directory, as served by `GET /api/cities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub city: String,
    pub lat: f64,
    pub lng: f64,
}

impl City {
    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

/// Body of `POST /api/find_route`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRequest {
    pub city: String,
    pub start_coords: [f64; 2],
    pub end_coords: [f64; 2],
}

impl RouteRequest {
    pub fn new(city: impl Into<String>, start: Coordinate, end: Coordinate) -> Self {
        Self {
            city: city.into(),
            start_coords: [start.lat, start.lng],
            end_coords: [end.lat, end.lng],
        }
    }
}

/// Statistics block the backend may attach to a successful response.
///
/// Rendered verbatim when present; never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BackendStatistics {
    pub distance_km: f64,
    pub estimated_time_minutes: f64,
}

impl From<BackendStatistics> for RouteStatistics {
    fn from(stats: BackendStatistics) -> Self {
        Self {
            distance_km: stats.distance_km,
            estimated_minutes: stats.estimated_time_minutes,
        }
    }
}

/// Successful body of `POST /api/find_route`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteResponse {
    pub route: Vec<[f64; 2]>,
    #[serde(default)]
    pub statistics: Option<BackendStatistics>,
}

impl RouteResponse {
    /// Decodes the wire pairs into coordinates, preserving order.
    pub fn route_coordinates(&self) -> Vec<Coordinate> {
        self.route
            .iter()
            .map(|pair| Coordinate::new(pair[0], pair[1]))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    error: String,
}

/// Blocking HTTP client for the routing backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    config: BackendConfig,
    client: reqwest::blocking::Client,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Extracts the backend's error message from a non-2xx response,
    /// falling back to the status code when the body is not the expected
    /// shape.
    fn failure_message(response: reqwest::blocking::Response) -> String {
        let status = response.status();
        response
            .json::<BackendErrorBody>()
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("route request failed with status {}", status))
    }
}

impl RouteService for BackendClient {
    fn cities(&self) -> Result<Vec<City>, RouteError> {
        let url = format!("{}/api/cities", self.config.base_url);
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(RouteError::NetworkFailure(Self::failure_message(response)));
        }

        Ok(response.json::<Vec<City>>()?)
    }

    fn find_route(&self, request: &RouteRequest) -> Result<RouteResponse, RouteError> {
        let url = format!("{}/api/find_route", self.config.base_url);
        tracing::debug!(city = %request.city, "requesting route");

        let response = self.client.post(url).json(request).send()?;

        if !response.status().is_success() {
            let message = Self::failure_message(response);
            tracing::warn!(%message, "route request rejected");
            return Err(RouteError::NetworkFailure(message));
        }

        Ok(response.json::<RouteResponse>()?)
    }
}
