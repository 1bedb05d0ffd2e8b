//! HTTP adapter for the routing and geocoding API.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiKeys;
use crate::error::ApiError;
use crate::traits::ApiTransport;

/// Longest error body, in bytes, kept in `ApiError::Status`.
pub const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.nextbillion.io".to_string(),
            timeout_secs: 15,
        }
    }
}

/// Which of the two configured keys authenticates an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Map,
    Geocode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Directions,
    ReverseGeocode,
    SnapToRoads,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Directions => "/directions/json",
            Endpoint::ReverseGeocode => "/h/revgeocode",
            Endpoint::SnapToRoads => "/snapToRoads/json",
        }
    }

    pub fn key_kind(&self) -> KeyKind {
        match self {
            Endpoint::ReverseGeocode => KeyKind::Geocode,
            Endpoint::Directions | Endpoint::SnapToRoads => KeyKind::Map,
        }
    }
}

/// A single outbound GET request, minus authentication.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub query: Vec<(&'static str, String)>,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            query: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct NbApiClient {
    config: ApiConfig,
    keys: ApiKeys,
    client: reqwest::Client,
}

impl NbApiClient {
    pub fn new(config: ApiConfig, keys: ApiKeys) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            keys,
            client,
        })
    }

    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path()
        )
    }

    fn key_for(&self, endpoint: Endpoint) -> &str {
        match endpoint.key_kind() {
            KeyKind::Map => &self.keys.map,
            KeyKind::Geocode => &self.keys.geocode,
        }
    }
}

impl ApiTransport for NbApiClient {
    async fn fetch(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let url = self.url_for(request.endpoint);
        debug!(%url, query = ?request.query, "sending API request");

        let response = self
            .client
            .get(&url)
            .query(&request.query)
            .query(&[("key", self.key_for(request.endpoint))])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_body(response, &url).await;
            warn!(%url, status = status.as_u16(), "API request rejected");
            return Err(ApiError::Status {
                code: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Reads at most `MAX_ERROR_BODY` bytes of a rejected response.
async fn error_body(mut response: reqwest::Response, url: &str) -> String {
    let mut body = Vec::new();
    while body.len() < MAX_ERROR_BODY {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            Ok(None) => break,
            Err(err) => {
                warn!(%url, error = %err, "failed to read error body");
                break;
            }
        }
    }
    truncate_body(&body)
}

fn truncate_body(body: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(body).into_owned();
    if text.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|&i| text.is_char_boundary(i))
            .unwrap_or(0);
        text.truncate(cut);
    }
    text
}
