//! Scripted transport and recording renderer.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use overlay_planner::api::{ApiRequest, Endpoint};
use overlay_planner::error::ApiError;
use overlay_planner::orchestrator::DemoMode;
use overlay_planner::overlay::{CameraHint, OverlayPlan};
use overlay_planner::traits::{ApiTransport, RenderSink};
use serde_json::Value;
use tokio::sync::Notify;

/// Replays queued responses per endpoint. The last queued response for an
/// endpoint repeats once the queue is down to one entry.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<HashMap<Endpoint, VecDeque<Result<Value, ApiError>>>>,
    requests: Mutex<Vec<ApiRequest>>,
    gate: Option<Arc<Notify>>,
    delay: Option<Duration>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, endpoint: Endpoint, response: Result<Value, ApiError>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .push_back(response);
        self
    }

    /// Holds every request until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self, endpoint: Endpoint) -> Result<Value, ApiError> {
        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(&endpoint) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string()))),
            None => Err(ApiError::Network(format!("no scripted response for {endpoint:?}"))),
        }
    }
}

impl ApiTransport for ScriptedTransport {
    async fn fetch(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_response(request.endpoint)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Plan(OverlayPlan),
    Message(String),
    Error(DemoMode, ApiError),
    Camera(CameraHint),
}

#[derive(Default)]
pub struct RecordingRenderer {
    events: Mutex<Vec<RenderEvent>>,
}

impl RecordingRenderer {
    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn plans(&self) -> Vec<OverlayPlan> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RenderEvent::Plan(plan) => Some(plan),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<ApiError> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RenderEvent::Error(_, err) => Some(err),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RenderEvent::Message(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: RenderEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl RenderSink for RecordingRenderer {
    fn render(&self, plan: &OverlayPlan) {
        self.push(RenderEvent::Plan(plan.clone()));
    }

    fn show_message(&self, _mode: DemoMode, message: &str) {
        self.push(RenderEvent::Message(message.to_string()));
    }

    fn show_error(&self, mode: DemoMode, error: &ApiError) {
        self.push(RenderEvent::Error(mode, error.clone()));
    }

    fn recenter(&self, camera: &CameraHint) {
        self.push(RenderEvent::Camera(*camera));
    }
}
