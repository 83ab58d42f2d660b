//! Marker ownership and lifecycle against the rendering surface.
//!
//! The store owns render handles only; every surface mutation goes through
//! the capability the caller passes in, so replacement can always detach
//! the stale handle before attaching its successor.

use crate::geometry::Coordinate;
use crate::traits::{MarkerHandle, MarkerVisual, RenderSurface};

/// Diameter of the start/end selection markers, in pixels.
const SELECTION_MARKER_PX: u32 = 30;

/// What a marker on the surface represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRole {
    Start,
    End,
    InfoWaypoint,
}

/// A marker the store has attached to the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedMarker {
    pub role: MarkerRole,
    pub position: Coordinate,
    pub handle: MarkerHandle,
}

impl MarkerVisual {
    /// Green circle labeled "S" for the start selection.
    pub fn start() -> Self {
        Self {
            color: "green".to_string(),
            diameter_px: SELECTION_MARKER_PX,
            label: Some("S".to_string()),
        }
    }

    /// Red circle labeled "E" for the end selection.
    pub fn end() -> Self {
        Self {
            color: "red".to_string(),
            diameter_px: SELECTION_MARKER_PX,
            label: Some("E".to_string()),
        }
    }

    /// Unlabeled dot for route info waypoints.
    pub fn info_point(color: &str, diameter_px: u32) -> Self {
        Self {
            color: color.to_string(),
            diameter_px,
            label: None,
        }
    }
}

/// Owns the start marker, the end marker, and the per-route info waypoints.
///
/// At most one Start and one End exist at a time; re-placing a role
/// detaches the previous handle first. Info waypoints are created per route
/// display and destroyed together.
#[derive(Debug, Default)]
pub struct MarkerStore {
    start: Option<PlacedMarker>,
    end: Option<PlacedMarker>,
    info: Vec<PlacedMarker>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places (or replaces) the start marker. Never fails; out-of-range
    /// coordinates are simply placed.
    pub fn place_start<S: RenderSurface>(&mut self, surface: &mut S, position: Coordinate) {
        if let Some(previous) = self.start.take() {
            surface.remove_marker(previous.handle);
        }
        let handle = surface.add_marker(position, &MarkerVisual::start(), None);
        self.start = Some(PlacedMarker {
            role: MarkerRole::Start,
            position,
            handle,
        });
    }

    /// Places (or replaces) the end marker.
    pub fn place_end<S: RenderSurface>(&mut self, surface: &mut S, position: Coordinate) {
        if let Some(previous) = self.end.take() {
            surface.remove_marker(previous.handle);
        }
        let handle = surface.add_marker(position, &MarkerVisual::end(), None);
        self.end = Some(PlacedMarker {
            role: MarkerRole::End,
            position,
            handle,
        });
    }

    pub fn has_start(&self) -> bool {
        self.start.is_some()
    }

    pub fn has_end(&self) -> bool {
        self.end.is_some()
    }

    pub fn start_position(&self) -> Option<Coordinate> {
        self.start.map(|marker| marker.position)
    }

    pub fn end_position(&self) -> Option<Coordinate> {
        self.end.map(|marker| marker.position)
    }

    /// Adopts an already-attached info waypoint.
    pub fn push_info_marker(&mut self, position: Coordinate, handle: MarkerHandle) {
        self.info.push(PlacedMarker {
            role: MarkerRole::InfoWaypoint,
            position,
            handle,
        });
    }

    pub fn info_marker_count(&self) -> usize {
        self.info.len()
    }

    /// Detaches every info waypoint. Called before each re-render.
    pub fn clear_info_markers<S: RenderSurface>(&mut self, surface: &mut S) {
        for marker in self.info.drain(..) {
            surface.remove_marker(marker.handle);
        }
    }

    /// Detaches every owned marker and empties the store.
    pub fn clear_all<S: RenderSurface>(&mut self, surface: &mut S) {
        if let Some(marker) = self.start.take() {
            surface.remove_marker(marker.handle);
        }
        if let Some(marker) = self.end.take() {
            surface.remove_marker(marker.handle);
        }
        self.clear_info_markers(surface);
    }
}
