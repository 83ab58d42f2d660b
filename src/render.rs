//! Converts an analyzed route into renderable primitives.
//!
//! The drawn polyline always carries the full-fidelity geometry; key-point
//! reduction is for info-marker placement only.

use crate::geometry::{self, Coordinate, KeyPointStrategy};
use crate::markers::MarkerStore;
use crate::traits::{LayerHandle, MarkerVisual, PolylineStyle, RenderSurface};

/// Pixel padding applied when fitting the view to a new route.
const FIT_PADDING_PX: u32 = 50;

/// Routes with more points than this get info markers at key points.
const INFO_MARKER_MIN_LEN: usize = 2;

const START_POINT_COLOR: &str = "#4CAF50";
const END_POINT_COLOR: &str = "#f44336";
const WAYPOINT_COLOR: &str = "#FF9800";

const ENDPOINT_MARKER_PX: u32 = 16;
const WAYPOINT_MARKER_PX: u32 = 12;

impl PolylineStyle {
    /// Style of the primary route path: blue, dashed, slightly translucent.
    pub fn primary_route() -> Self {
        Self {
            color: "#3388ff".to_string(),
            weight: 5,
            opacity: 0.8,
            dash_pattern: Some("10, 10".to_string()),
        }
    }
}

/// One rendered route: the attached polyline plus its source geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLayer {
    pub handle: LayerHandle,
    pub points: Vec<Coordinate>,
}

/// Owns the primary route layer and any alternative overlays.
///
/// Exactly one primary layer is active at a time and is replaced wholesale
/// on each new route: the old layer detaches from the surface before the
/// new one attaches. Empty is both the initial and the terminal state.
#[derive(Debug, Default)]
pub struct RouteRenderer {
    primary: Option<RouteLayer>,
    alternatives: Vec<RouteLayer>,
}

impl RouteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_primary_route(&self) -> bool {
        self.primary.is_some()
    }

    pub fn primary_route(&self) -> Option<&RouteLayer> {
        self.primary.as_ref()
    }

    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Displays a route as the primary layer, replacing any previous one.
    ///
    /// Attaches the full polyline, fits the view to its bounds, and (for
    /// routes of more than two points) places info markers at the
    /// uniformly sampled key points.
    pub fn display_primary_route<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        markers: &mut MarkerStore,
        route: &[Coordinate],
    ) {
        self.detach_primary(surface, markers);

        let handle = surface.add_polyline(route, &PolylineStyle::primary_route());
        if let Some(bounds) = surface.layer_bounds(handle) {
            surface.fit_bounds(bounds, FIT_PADDING_PX);
        }
        self.primary = Some(RouteLayer {
            handle,
            points: route.to_vec(),
        });

        if route.len() > INFO_MARKER_MIN_LEN {
            place_info_markers(surface, markers, route);
        }
        tracing::debug!(points = route.len(), "primary route displayed");
    }

    /// Detaches the primary layer and its info markers.
    pub fn clear_primary_route<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        markers: &mut MarkerStore,
    ) {
        self.detach_primary(surface, markers);
    }

    /// Replaces the alternative overlays, detaching the old ones first.
    ///
    /// The primary layer is untouched; no backend delivers alternatives
    /// yet, so this is the extension point for them.
    pub fn set_alternative_routes<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        routes: &[Vec<Coordinate>],
    ) {
        for layer in self.alternatives.drain(..) {
            surface.remove_layer(layer.handle);
        }
        for route in routes {
            let handle = surface.add_polyline(route, &PolylineStyle::primary_route());
            self.alternatives.push(RouteLayer {
                handle,
                points: route.clone(),
            });
        }
    }

    /// Detaches everything this renderer owns.
    pub fn clear_all<S: RenderSurface>(&mut self, surface: &mut S, markers: &mut MarkerStore) {
        self.detach_primary(surface, markers);
        for layer in self.alternatives.drain(..) {
            surface.remove_layer(layer.handle);
        }
    }

    fn detach_primary<S: RenderSurface>(&mut self, surface: &mut S, markers: &mut MarkerStore) {
        if let Some(layer) = self.primary.take() {
            surface.remove_layer(layer.handle);
        }
        markers.clear_info_markers(surface);
    }
}

fn place_info_markers<S: RenderSurface>(
    surface: &mut S,
    markers: &mut MarkerStore,
    route: &[Coordinate],
) {
    let key_points = geometry::reduce_to_key_points(route, KeyPointStrategy::UniformSampling);
    let last = key_points.len() - 1;

    for (index, point) in key_points.iter().enumerate() {
        let is_endpoint = index == 0 || index == last;
        let color = if index == 0 {
            START_POINT_COLOR
        } else if index == last {
            END_POINT_COLOR
        } else {
            WAYPOINT_COLOR
        };
        let diameter = if is_endpoint {
            ENDPOINT_MARKER_PX
        } else {
            WAYPOINT_MARKER_PX
        };

        let tooltip = if index == 0 {
            "Start Point".to_string()
        } else if index == last {
            "Destination".to_string()
        } else {
            format!("Waypoint {}", index)
        };

        let handle = surface.add_marker(
            *point,
            &MarkerVisual::info_point(color, diameter),
            Some(&tooltip),
        );
        markers.push_info_marker(*point, handle);
    }
}
