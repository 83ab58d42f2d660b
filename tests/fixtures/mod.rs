//! Test fixtures for route-scout.
//!
//! In-process implementations of the two external collaborators (the
//! rendering surface and the routing backend) plus a recording UI
//! observer.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use route_scout::backend::{City, RouteRequest, RouteResponse};
use route_scout::geometry::{Bounds, Coordinate};
use route_scout::mode::SelectionMode;
use route_scout::traits::{
    LayerHandle, MarkerHandle, MarkerVisual, PolylineStyle, RenderSurface, RouteError,
    RouteService, UiStateObserver,
};

// ============================================================================
// Mock rendering surface
// ============================================================================

#[derive(Debug, Clone)]
pub struct AttachedPolyline {
    pub handle: LayerHandle,
    pub points: Vec<Coordinate>,
    pub style: PolylineStyle,
}

#[derive(Debug, Clone)]
pub struct AttachedMarker {
    pub handle: MarkerHandle,
    pub position: Coordinate,
    pub visual: MarkerVisual,
    pub tooltip: Option<String>,
}

/// Records every surface call and tracks what is currently attached.
#[derive(Debug, Default)]
pub struct MockSurface {
    next_id: u64,
    pub polylines: Vec<AttachedPolyline>,
    pub markers: Vec<AttachedMarker>,
    pub view: Option<(Coordinate, f64)>,
    pub fit_calls: Vec<(Bounds, u32)>,
    pub removed_layers: Vec<LayerHandle>,
    pub removed_markers: Vec<MarkerHandle>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_tooltips(&self) -> Vec<Option<String>> {
        self.markers.iter().map(|m| m.tooltip.clone()).collect()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl RenderSurface for MockSurface {
    fn set_view(&mut self, center: Coordinate, zoom: f64) {
        self.view = Some((center, zoom));
    }

    fn add_polyline(&mut self, points: &[Coordinate], style: &PolylineStyle) -> LayerHandle {
        let handle = LayerHandle(self.next_id());
        self.polylines.push(AttachedPolyline {
            handle,
            points: points.to_vec(),
            style: style.clone(),
        });
        handle
    }

    fn remove_layer(&mut self, layer: LayerHandle) {
        self.polylines.retain(|p| p.handle != layer);
        self.removed_layers.push(layer);
    }

    fn add_marker(
        &mut self,
        position: Coordinate,
        visual: &MarkerVisual,
        tooltip: Option<&str>,
    ) -> MarkerHandle {
        let handle = MarkerHandle(self.next_id());
        self.markers.push(AttachedMarker {
            handle,
            position,
            visual: visual.clone(),
            tooltip: tooltip.map(|t| t.to_string()),
        });
        handle
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.markers.retain(|m| m.handle != marker);
        self.removed_markers.push(marker);
    }

    fn layer_bounds(&self, layer: LayerHandle) -> Option<Bounds> {
        self.polylines
            .iter()
            .find(|p| p.handle == layer)
            .and_then(|p| Bounds::of(&p.points))
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding_px: u32) {
        self.fit_calls.push((bounds, padding_px));
    }
}

// ============================================================================
// Mock routing backend
// ============================================================================

/// Serves canned cities and a queue of route responses, recording every
/// request it receives.
#[derive(Debug, Default)]
pub struct MockBackend {
    pub city_directory: Vec<City>,
    responses: RefCell<VecDeque<Result<RouteResponse, RouteError>>>,
    pub requests: RefCell<Vec<RouteRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cities(cities: Vec<City>) -> Self {
        Self {
            city_directory: cities,
            ..Self::default()
        }
    }

    pub fn queue_response(&self, response: Result<RouteResponse, RouteError>) {
        self.responses.borrow_mut().push_back(response);
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl RouteService for MockBackend {
    fn cities(&self) -> Result<Vec<City>, RouteError> {
        Ok(self.city_directory.clone())
    }

    fn find_route(&self, request: &RouteRequest) -> Result<RouteResponse, RouteError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(RouteError::NetworkFailure("no queued response".to_string())))
    }
}

// ============================================================================
// Recording observer
// ============================================================================

#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<(SelectionMode, bool)>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&(SelectionMode, bool)> {
        self.events.last()
    }
}

impl UiStateObserver for RecordingObserver {
    fn state_changed(&mut self, mode: SelectionMode, route_request_enabled: bool) {
        self.events.push((mode, route_request_enabled));
    }
}

// ============================================================================
// Shared data builders
// ============================================================================

pub fn delhi() -> City {
    City {
        city: "delhi".to_string(),
        lat: 28.6139,
        lng: 77.209,
    }
}

pub fn mumbai() -> City {
    City {
        city: "mumbai".to_string(),
        lat: 19.076,
        lng: 72.8777,
    }
}

/// A straight n-point route near the Delhi default view.
pub fn straight_route(n: usize) -> Vec<[f64; 2]> {
    (0..n).map(|i| [28.6 + i as f64 * 0.01, 77.2]).collect()
}

pub fn response_without_stats(route: Vec<[f64; 2]>) -> RouteResponse {
    RouteResponse {
        route,
        statistics: None,
    }
}
