//! Session context: one object owning the surface, the backend client,
//! and every interaction component, wired so each part sees only the
//! slices it needs.

use std::time::{Duration, Instant};

use crate::backend::{City, RouteRequest, RouteResponse};
use crate::debounce::Debouncer;
use crate::geometry::Coordinate;
use crate::markers::MarkerStore;
use crate::mode::{ModeController, SelectionMode};
use crate::render::RouteRenderer;
use crate::stats::RouteStatistics;
use crate::traits::{MissingInput, RenderSurface, RouteError, RouteService, UiStateObserver};

/// Initial map view when no city is selected yet.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(28.6139, 77.209);
pub const DEFAULT_ZOOM: f64 = 12.0;

/// Idle window for the city-search debounce.
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Identifies one issued route request for the stale-response guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestSeq(u64);

/// What became of a completed route request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteOutcome {
    /// The response was rendered and these statistics now apply.
    Applied(RouteStatistics),
    /// A newer request was issued while this one was in flight; the
    /// response was dropped without touching any state.
    Superseded,
}

/// The whole client session.
///
/// Overlapping in-flight requests resolve by sequence number: only the
/// newest issued request may apply its response, older ones complete as
/// [`RouteOutcome::Superseded`].
#[derive(Debug)]
pub struct RouteSession<S: RenderSurface, B: RouteService> {
    surface: S,
    service: B,
    markers: MarkerStore,
    controller: ModeController,
    renderer: RouteRenderer,
    cities: Vec<City>,
    selected_city: Option<City>,
    last_statistics: Option<RouteStatistics>,
    issued_seq: u64,
    search: Debouncer,
    pending_query: Option<String>,
}

impl<S: RenderSurface, B: RouteService> RouteSession<S, B> {
    /// Builds a session and centers the surface on the default view.
    pub fn new(mut surface: S, service: B) -> Self {
        surface.set_view(DEFAULT_CENTER, DEFAULT_ZOOM);
        Self {
            surface,
            service,
            markers: MarkerStore::new(),
            controller: ModeController::new(),
            renderer: RouteRenderer::new(),
            cities: Vec::new(),
            selected_city: None,
            last_statistics: None,
            issued_seq: 0,
            search: Debouncer::new(SEARCH_DEBOUNCE),
            pending_query: None,
        }
    }

    pub fn markers(&self) -> &MarkerStore {
        &self.markers
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn service(&self) -> &B {
        &self.service
    }

    pub fn renderer(&self) -> &RouteRenderer {
        &self.renderer
    }

    pub fn mode(&self) -> SelectionMode {
        self.controller.mode()
    }

    pub fn selected_city(&self) -> Option<&City> {
        self.selected_city.as_ref()
    }

    pub fn last_statistics(&self) -> Option<RouteStatistics> {
        self.last_statistics
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Fetches and stores the city directory.
    pub fn load_cities(&mut self) -> Result<(), RouteError> {
        self.cities = self.service.cities()?;
        tracing::info!(count = self.cities.len(), "city directory loaded");
        Ok(())
    }

    /// Case-insensitive substring filter over the loaded directory.
    pub fn filter_cities(&self, query: &str) -> Vec<City> {
        let needle = normalize(query);
        self.cities
            .iter()
            .filter(|city| normalize(&city.city).contains(&needle))
            .cloned()
            .collect()
    }

    /// Records a search keystroke, re-arming the debounce window.
    pub fn search_input(&mut self, query: &str, now: Instant) {
        self.pending_query = Some(query.to_string());
        self.search.rearm(now);
    }

    /// Runs the pending filter if its debounce window has elapsed
    /// undisturbed. At most one filter pass per idle window.
    pub fn poll_search(&mut self, now: Instant) -> Option<Vec<City>> {
        if !self.search.fire(now) {
            return None;
        }
        self.pending_query.take().map(|query| self.filter_cities(&query))
    }

    /// Selects a city and recenters the view on it.
    pub fn select_city(&mut self, city: City) {
        self.surface.set_view(city.position(), DEFAULT_ZOOM);
        self.selected_city = Some(city);
    }

    pub fn set_mode(&mut self, mode: SelectionMode, observer: &mut impl UiStateObserver) {
        self.controller.set_mode(mode, &self.markers, observer);
    }

    /// Routes a surface click through the one-shot mode controller.
    pub fn handle_map_click(&mut self, point: Coordinate, observer: &mut impl UiStateObserver) {
        self.controller
            .handle_surface_click(&mut self.surface, &mut self.markers, observer, point);
    }

    /// Validates the current selection and issues a new request sequence.
    ///
    /// Fails fast with [`RouteError::MissingSelection`] before any network
    /// work when the city or either endpoint is missing.
    pub fn begin_route_request(&mut self) -> Result<(RequestSeq, RouteRequest), RouteError> {
        let city = self
            .selected_city
            .as_ref()
            .ok_or(RouteError::MissingSelection(MissingInput::City))?;
        let start = self
            .markers
            .start_position()
            .ok_or(RouteError::MissingSelection(MissingInput::StartPoint))?;
        let end = self
            .markers
            .end_position()
            .ok_or(RouteError::MissingSelection(MissingInput::EndPoint))?;

        self.issued_seq += 1;
        let request = RouteRequest::new(city.city.clone(), start, end);
        Ok((RequestSeq(self.issued_seq), request))
    }

    /// Applies a response for the given request, unless a newer request
    /// superseded it.
    ///
    /// Raises [`RouteError::EmptyRoute`] for routes too short to draw,
    /// before touching any marker or layer state: a failed request leaves
    /// the previous display intact.
    pub fn complete_route_request(
        &mut self,
        seq: RequestSeq,
        response: RouteResponse,
    ) -> Result<RouteOutcome, RouteError> {
        if seq.0 != self.issued_seq {
            tracing::debug!(seq = seq.0, newest = self.issued_seq, "stale route response dropped");
            return Ok(RouteOutcome::Superseded);
        }

        let route = response.route_coordinates();
        if route.len() < 2 {
            return Err(RouteError::EmptyRoute);
        }

        let statistics = response
            .statistics
            .map(RouteStatistics::from)
            .unwrap_or_else(|| RouteStatistics::from_route(&route));

        self.renderer
            .display_primary_route(&mut self.surface, &mut self.markers, &route);
        self.last_statistics = Some(statistics);
        tracing::info!(
            distance_km = statistics.distance_km,
            estimated_minutes = statistics.estimated_minutes,
            "route applied"
        );
        Ok(RouteOutcome::Applied(statistics))
    }

    /// Synchronous request against the owned backend: validate, fetch,
    /// apply. A blocking call cannot be superseded, so this returns
    /// `Applied` on every success.
    pub fn request_route(&mut self) -> Result<RouteOutcome, RouteError> {
        let (seq, request) = self.begin_route_request()?;
        let response = self.service.find_route(&request)?;
        self.complete_route_request(seq, response)
    }

    /// Clears markers, route layers, city selection, and statistics, and
    /// returns the mode to `None`. Restores the initial session state.
    pub fn reset(&mut self, observer: &mut impl UiStateObserver) {
        self.renderer.clear_all(&mut self.surface, &mut self.markers);
        self.markers.clear_all(&mut self.surface);
        self.selected_city = None;
        self.last_statistics = None;
        self.controller
            .set_mode(SelectionMode::None, &self.markers, observer);
        tracing::debug!("session reset");
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
