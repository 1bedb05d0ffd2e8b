//! Per-mode request orchestration.
//!
//! Each demo mode runs a two-state machine, `Idle -> AwaitingResponse ->
//! Idle`. A trigger that arrives while its mode is awaiting a response is
//! ignored rather than queued, so at most one request per mode is ever in
//! flight and a stale response can never overwrite a newer one. Modes are
//! independent of each other. The return to `Idle` is tied to an `InFlight`
//! guard, so a trigger future dropped mid-request releases its mode too.
//!
//! The orchestrator owns the directions markers and the current plan of each
//! layer. Both are only replaced by a successful response; errors go to the
//! renderer and leave them untouched.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::coordinate::{Coordinate, RouteRequest};
use crate::error::ApiError;
use crate::overlay::{CameraHint, END_TITLE, Marker, OverlayPlan, START_TITLE};
use crate::traits::{ApiTransport, RenderSink};
use crate::{directions, geocode, matching};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DemoMode {
    Directions,
    Geocoding,
    Matching,
    /// Plain map with no demo-specific startup request.
    Simple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModePhase {
    Idle,
    AwaitingResponse,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    /// A plan was built and handed to the renderer.
    Rendered(OverlayPlan),
    /// The request failed; the error was handed to the renderer.
    Failed(ApiError),
    /// The mode already had a request in flight.
    Ignored,
    /// The trigger has no request associated with it in this mode.
    NoOp,
}

/// Fixed inputs used when the map first becomes ready.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoDefaults {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub matching_probes: Vec<Coordinate>,
}

impl Default for DemoDefaults {
    fn default() -> Self {
        Self {
            origin: Coordinate::new(37.78676, -122.41238),
            destination: Coordinate::new(37.77554, -122.46524),
            matching_probes: vec![
                Coordinate::new(37.78513, -122.41855),
                Coordinate::new(37.78621, -122.40971),
                Coordinate::new(37.78845, -122.40523),
            ],
        }
    }
}

#[derive(Debug, Default)]
struct OrchestratorState {
    in_flight: HashMap<DemoMode, ModePhase>,
    markers: Vec<Marker>,
    plans: HashMap<&'static str, OverlayPlan>,
}

impl OrchestratorState {
    fn phase(&self, mode: DemoMode) -> ModePhase {
        self.in_flight.get(&mode).copied().unwrap_or(ModePhase::Idle)
    }

    /// Moves `mode` to `AwaitingResponse`; false if it already was.
    fn try_begin(&mut self, mode: DemoMode) -> bool {
        if self.phase(mode) == ModePhase::AwaitingResponse {
            return false;
        }
        self.in_flight.insert(mode, ModePhase::AwaitingResponse);
        true
    }
}

/// Holds a mode in `AwaitingResponse`; dropping it returns the mode to `Idle`.
struct InFlight<'a> {
    state: &'a Mutex<OrchestratorState>,
    mode: DemoMode,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock_state(self.state)
            .in_flight
            .insert(self.mode, ModePhase::Idle);
    }
}

pub struct Orchestrator<T, R> {
    transport: T,
    renderer: R,
    defaults: DemoDefaults,
    request_timeout: Duration,
    state: Mutex<OrchestratorState>,
}

impl<T: ApiTransport, R: RenderSink> Orchestrator<T, R> {
    pub fn new(transport: T, renderer: R) -> Self {
        Self {
            transport,
            renderer,
            defaults: DemoDefaults::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            state: Mutex::new(OrchestratorState::default()),
        }
    }

    pub fn with_defaults(mut self, defaults: DemoDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn phase(&self, mode: DemoMode) -> ModePhase {
        self.lock().phase(mode)
    }

    /// Markers currently placed by directions mode, in placement order.
    pub fn markers(&self) -> Vec<Marker> {
        self.lock().markers.clone()
    }

    /// Replaces the marker arena, e.g. after the host lets the user drag a
    /// marker to a new position.
    pub fn place_markers(&self, markers: Vec<Marker>) {
        self.lock().markers = markers;
    }

    pub fn current_plan(&self, layer_id: &str) -> Option<OverlayPlan> {
        self.lock().plans.get(layer_id).cloned()
    }

    /// Style/map-ready event: starts the mode's demo request, if it has one.
    pub async fn on_map_ready(&self, mode: DemoMode) -> TriggerOutcome {
        info!(?mode, "map ready");
        self.renderer.recenter(&CameraHint::initial());
        match mode {
            DemoMode::Directions => self.route().await,
            DemoMode::Matching => self.snap(self.defaults.matching_probes.clone()).await,
            DemoMode::Geocoding | DemoMode::Simple => TriggerOutcome::NoOp,
        }
    }

    /// Tap event at a map coordinate.
    ///
    /// Directions mode re-routes between its markers in reverse; every other
    /// mode reverse-geocodes the tapped point.
    pub async fn on_tap(&self, mode: DemoMode, at: Coordinate) -> TriggerOutcome {
        debug!(?mode, %at, "tap");
        self.renderer.recenter(&CameraHint::centered(at));
        match mode {
            DemoMode::Directions => self.route().await,
            DemoMode::Geocoding | DemoMode::Matching | DemoMode::Simple => {
                self.reverse_geocode(mode, at).await
            }
        }
    }

    /// Routes between the current markers, or the defaults if none exist.
    pub async fn route(&self) -> TriggerOutcome {
        let mode = DemoMode::Directions;
        let Some(in_flight) = self.try_begin(mode) else {
            return ignored(mode);
        };
        let next = next_route(&self.lock().markers, &self.defaults);
        let route = match next {
            Ok(route) => route,
            Err(err) => return self.finish(in_flight, Err(err)),
        };

        let result = self
            .bounded(directions::request(&self.transport, &route))
            .await
            .map(|summary| {
                self.renderer.show_message(mode, &summary.label());
                OverlayPlan::directions(&route, &summary)
            });
        self.finish(in_flight, result)
    }

    pub async fn reverse_geocode(&self, mode: DemoMode, at: Coordinate) -> TriggerOutcome {
        let Some(in_flight) = self.try_begin(mode) else {
            return ignored(mode);
        };
        let result = self
            .bounded(geocode::request(&self.transport, at))
            .await
            .map(|found| OverlayPlan::geocode(&found));
        self.finish(in_flight, result)
    }

    pub async fn snap(&self, probes: Vec<Coordinate>) -> TriggerOutcome {
        let mode = DemoMode::Matching;
        let Some(in_flight) = self.try_begin(mode) else {
            return ignored(mode);
        };
        let result = self
            .bounded(matching::request(&self.transport, probes))
            .await
            .map(OverlayPlan::matching);
        self.finish(in_flight, result)
    }

    async fn bounded<X>(
        &self,
        request: impl Future<Output = Result<X, ApiError>>,
    ) -> Result<X, ApiError> {
        match tokio::time::timeout(self.request_timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout),
        }
    }

    fn try_begin(&self, mode: DemoMode) -> Option<InFlight<'_>> {
        if !self.lock().try_begin(mode) {
            return None;
        }
        Some(InFlight {
            state: &self.state,
            mode,
        })
    }

    fn finish(
        &self,
        in_flight: InFlight<'_>,
        result: Result<OverlayPlan, ApiError>,
    ) -> TriggerOutcome {
        let mode = in_flight.mode;
        if let Ok(plan) = &result {
            let mut state = self.lock();
            if mode == DemoMode::Directions {
                state.markers = plan.markers.clone();
            }
            state.plans.insert(plan.layer_id, plan.clone());
        }
        drop(in_flight);

        match result {
            Ok(plan) => {
                self.renderer.render(&plan);
                TriggerOutcome::Rendered(plan)
            }
            Err(err) => {
                warn!(?mode, error = %err, "request failed");
                self.renderer.show_error(mode, &err);
                TriggerOutcome::Failed(err)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, OrchestratorState> {
        lock_state(&self.state)
    }
}

fn lock_state(state: &Mutex<OrchestratorState>) -> MutexGuard<'_, OrchestratorState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn ignored(mode: DemoMode) -> TriggerOutcome {
    info!(?mode, "request already in flight, ignoring trigger");
    TriggerOutcome::Ignored
}

/// Derives the next directions request from the placed markers.
///
/// `Start`/`End` markers are read in placement order and reversed, so each
/// re-route swaps origin and destination.
fn next_route(markers: &[Marker], defaults: &DemoDefaults) -> Result<RouteRequest, ApiError> {
    let route = if markers.is_empty() {
        RouteRequest::directions(defaults.origin, defaults.destination)
    } else {
        let mut points: Vec<Coordinate> = markers
            .iter()
            .filter(|marker| marker.title == START_TITLE || marker.title == END_TITLE)
            .map(|marker| marker.coordinate)
            .collect();
        points.reverse();

        let [origin, destination] = points.as_slice() else {
            return Err(ApiError::InvalidRequest(format!(
                "directions need one Start and one End marker, found {}",
                points.len()
            )));
        };
        RouteRequest::directions(*origin, *destination)
    };
    route.ensure_finite()?;
    Ok(route)
}
