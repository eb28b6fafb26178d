//! HTTP access to the brewery lookup service.
//!
//! One [`LookupClient`] is built per run and reused for every request, so
//! connections are pooled. The client holds the endpoint and API key; the
//! key is appended as an opaque, percent-encoded path segment.

use std::time::Duration;

use url::Url;

use crate::error::{LookupFailure, PipelineError};
use crate::model::LatLng;
use crate::xml;

// ── Constants ───────────────────────────────────────────────────────

pub const DEFAULT_ENDPOINT: &str = "http://beermapping.com/webservice/";

/// Pause after every request, success or failure.
pub const REQUEST_DELAY: Duration = Duration::from_millis(250);

pub const USER_AGENT: &str = concat!("brewmap/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ── LookupClient ────────────────────────────────────────────────────

pub struct LookupClient {
    http: reqwest::blocking::Client,
    endpoint: Url,
    api_key: String,
    request_delay: Duration,
}

impl LookupClient {
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self, PipelineError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| PipelineError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") || endpoint.cannot_be_a_base() {
            return Err(PipelineError::InvalidEndpoint(format!(
                "{endpoint}: expected an http(s) base URL"
            )));
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PipelineError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            api_key: api_key.to_string(),
            request_delay: REQUEST_DELAY,
        })
    }

    /// Override the inter-request pause. Tests use this to run at full speed.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    /// `{endpoint}/locquery/{apikey}/{token}`
    pub fn locquery_url(&self, token: &str) -> Url {
        self.build_url(&["locquery", &self.api_key, token])
    }

    /// `{endpoint}/locmap/{apikey}/{id}`
    pub fn locmap_url(&self, id: u64) -> Url {
        self.build_url(&["locmap", &self.api_key, &id.to_string()])
    }

    fn build_url(&self, segments: &[&str]) -> Url {
        let mut url = self.endpoint.clone();
        // Cannot fail: the constructor rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Look up the identifier for a normalized query token.
    pub fn identifier_for(&self, token: &str) -> Result<u64, LookupFailure> {
        let body = self.get_text(self.locquery_url(token))?;
        xml::parse_identifier(&body)
    }

    /// Look up the coordinates for an identifier.
    pub fn coordinates_for(&self, id: u64) -> Result<LatLng, LookupFailure> {
        let body = self.get_text(self.locmap_url(id))?;
        xml::parse_coordinates(&body)
    }

    /// Single GET, no retry. Non-2xx is a failure; the body is not inspected.
    fn get_text(&self, url: Url) -> Result<String, LookupFailure> {
        // Errors are stripped of their URL so the API key never reaches logs.
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|e| LookupFailure::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupFailure::Status(status.as_u16()));
        }

        resp.text()
            .map_err(|e| LookupFailure::Transport(e.without_url().to_string()))
    }
}
