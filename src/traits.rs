//! Seams between the overlay pipeline and the outside world.
//!
//! The pipeline talks to the routing API through [`ApiTransport`] and hands
//! its results to the map host through [`RenderSink`]. Both are kept small so
//! hosts and tests can provide their own implementations.

use std::future::Future;

use serde_json::Value;

use crate::api::ApiRequest;
use crate::error::ApiError;
use crate::orchestrator::DemoMode;
use crate::overlay::{CameraHint, OverlayPlan};

/// Issues a single API request and returns the parsed JSON body.
///
/// Implementations must not retry; one call is one HTTP request.
pub trait ApiTransport {
    fn fetch(&self, request: &ApiRequest) -> impl Future<Output = Result<Value, ApiError>> + Send;
}

/// The rendering collaborator that draws plans on the map surface.
pub trait RenderSink {
    /// Draws `plan`, replacing whatever was previously drawn on its layer.
    fn render(&self, plan: &OverlayPlan);

    /// Shows a short informational message (toast).
    fn show_message(&self, mode: DemoMode, message: &str);

    /// Reports a failed request. Existing overlays must stay untouched.
    fn show_error(&self, mode: DemoMode, error: &ApiError);

    /// Moves the main camera; the inset map follows via [`CameraHint::inset`].
    fn recenter(&self, _camera: &CameraHint) {}
}
