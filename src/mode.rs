//! Point-selection mode state machine.

use crate::geometry::Coordinate;
use crate::markers::MarkerStore;
use crate::traits::{RenderSurface, UiStateObserver};

/// Which point the next surface click will set.
///
/// Exactly one value is active at any time, owned by [`ModeController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    None,
    SettingStart,
    SettingEnd,
}

/// One-shot controller for point-selection mode.
///
/// Every surface click consumes exactly one pending mode request: the
/// transition back to [`SelectionMode::None`] is part of the click
/// handling, not a side effect.
#[derive(Debug, Default)]
pub struct ModeController {
    mode: SelectionMode,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Assigns the requested mode and refreshes the observer.
    ///
    /// All three modes are valid entry points; no validation needed.
    pub fn set_mode(
        &mut self,
        mode: SelectionMode,
        markers: &MarkerStore,
        observer: &mut impl UiStateObserver,
    ) {
        self.mode = mode;
        self.notify(markers, observer);
    }

    /// Consumes a surface click: places the marker the current mode asks
    /// for, then always returns to `None`.
    ///
    /// No-op when no mode is pending.
    pub fn handle_surface_click<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        markers: &mut MarkerStore,
        observer: &mut impl UiStateObserver,
        point: Coordinate,
    ) {
        match self.mode {
            SelectionMode::None => return,
            SelectionMode::SettingStart => markers.place_start(surface, point),
            SelectionMode::SettingEnd => markers.place_end(surface, point),
        }
        self.mode = SelectionMode::None;
        self.notify(markers, observer);
    }

    /// Recomputes the route-request predicate and pushes the current state
    /// to the observer.
    pub fn notify(&self, markers: &MarkerStore, observer: &mut impl UiStateObserver) {
        let enabled = markers.has_start() && markers.has_end();
        observer.state_changed(self.mode, enabled);
    }
}
