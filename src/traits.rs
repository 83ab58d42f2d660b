//! Core seams for the routing client.
//!
//! These are intentionally minimal: the rendering surface and the routing
//! backend are external collaborators, and tests substitute in-process
//! implementations for both.

use std::fmt;

use crate::backend::{City, RouteRequest, RouteResponse};
use crate::geometry::{Bounds, Coordinate};
use crate::mode::SelectionMode;

/// Opaque handle to a polyline layer attached to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerHandle(pub u64);

/// Opaque handle to a marker attached to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Visual style of a polyline layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineStyle {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    pub dash_pattern: Option<String>,
}

/// Visual style of a marker: a colored circle with an optional label.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerVisual {
    pub color: String,
    pub diameter_px: u32,
    pub label: Option<String>,
}

/// The external map-display capability the core renders against.
///
/// Covers exactly what the client needs: view control, layer and marker
/// lifecycle, bounds queries, and fit-to-bounds. Handles returned by the
/// attach calls stay valid until the matching remove call.
pub trait RenderSurface {
    /// Centers the view on a point at the given zoom level.
    fn set_view(&mut self, center: Coordinate, zoom: f64);

    /// Attaches a polyline layer and returns its handle.
    fn add_polyline(&mut self, points: &[Coordinate], style: &PolylineStyle) -> LayerHandle;

    /// Detaches a polyline layer.
    fn remove_layer(&mut self, layer: LayerHandle);

    /// Attaches a marker, optionally with tooltip text.
    fn add_marker(
        &mut self,
        position: Coordinate,
        visual: &MarkerVisual,
        tooltip: Option<&str>,
    ) -> MarkerHandle;

    /// Detaches a marker.
    fn remove_marker(&mut self, marker: MarkerHandle);

    /// Bounding box of an attached layer, if it has any points.
    fn layer_bounds(&self, layer: LayerHandle) -> Option<Bounds>;

    /// Adjusts the view to contain the bounds with pixel padding.
    fn fit_bounds(&mut self, bounds: Bounds, padding_px: u32);
}

/// Receives interaction-state changes so mode-dependent controls can
/// refresh (e.g. enabling the find-route affordance).
pub trait UiStateObserver {
    /// Called after every mode change and every marker placement.
    ///
    /// `route_request_enabled` is true iff both start and end markers
    /// are set.
    fn state_changed(&mut self, mode: SelectionMode, route_request_enabled: bool);
}

/// The remote routing backend.
///
/// Concrete transport lives in [`crate::backend`]; tests implement this
/// directly.
pub trait RouteService {
    /// Fetches the city directory.
    fn cities(&self) -> Result<Vec<City>, RouteError>;

    /// Requests a route between two points within a city.
    fn find_route(&self, request: &RouteRequest) -> Result<RouteResponse, RouteError>;
}

/// Which required selection was missing when a route was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    City,
    StartPoint,
    EndPoint,
}

/// Errors surfaced to the operator as transient notifications.
///
/// All of these recover locally: no marker or route-layer state is
/// touched by a failed request.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteError {
    /// Transport failure or a non-2xx backend response (with its message).
    NetworkFailure(String),
    /// The backend returned a route too short to draw.
    EmptyRoute,
    /// Route requested before the required selections were made.
    MissingSelection(MissingInput),
}

impl From<reqwest::Error> for RouteError {
    fn from(err: reqwest::Error) -> Self {
        RouteError::NetworkFailure(err.to_string())
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::NetworkFailure(message) => write!(f, "{}", message),
            RouteError::EmptyRoute => write!(f, "No valid route found"),
            RouteError::MissingSelection(MissingInput::City) => {
                write!(f, "Please select a city first")
            }
            RouteError::MissingSelection(_) => {
                write!(f, "Please set both start and end points")
            }
        }
    }
}

impl std::error::Error for RouteError {}
