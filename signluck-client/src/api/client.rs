//! SignLuck backend HTTP client.
//!
//! Provides async methods for the plate lookup, route building and country
//! directory endpoints, and implements the engine's service traits on top of
//! them.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::domain::{Coordinates, Country, Language, MatchSet, PlateQuery, RouteSegment};
use crate::engine::{LookupService, RouteService};

use super::error::ApiError;
use super::types::{CheckRequest, CheckResponse, HealthResponse, RouteRequest, RouteResponse};

/// Default base URL: the backend as run locally behind the dev proxy.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How much of an undecodable body to keep in the error.
const ERROR_BODY_CHARS: usize = 500;

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend, without a trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Create a config pointing at the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// SignLuck backend client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        let parsed = match reqwest::Url::parse(&base_url) {
            Ok(url) => url,
            Err(_) => return Err(ApiError::InvalidBaseUrl(config.base_url)),
        };
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host().is_none() {
            return Err(ApiError::InvalidBaseUrl(config.base_url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The normalized base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up which countries' plates can contain the combination.
    pub async fn check(
        &self,
        query: &PlateQuery,
        language: Language,
    ) -> Result<MatchSet, ApiError> {
        let url = format!("{}/check", self.base_url);
        debug!(%query, %language, "checking plate");

        let request = self
            .http
            .post(&url)
            .query(&[("lang", language.as_code())])
            .json(&CheckRequest::new(query));

        let response: CheckResponse = send_json(request).await?;
        Ok(response.into())
    }

    /// Build a route through the most probable countries.
    ///
    /// With `origin` the backend orders segments nearest-first from that
    /// point; without it the order is by probability.
    pub async fn route(
        &self,
        query: &PlateQuery,
        language: Language,
        origin: Option<Coordinates>,
    ) -> Result<Vec<RouteSegment>, ApiError> {
        let url = format!("{}/route", self.base_url);
        debug!(%query, %language, located = origin.is_some(), "building route");

        let request = self
            .http
            .post(&url)
            .query(&[("lang", language.as_code())])
            .json(&RouteRequest::new(query, origin));

        let response: RouteResponse = send_json(request).await?;
        Ok(response.segments)
    }

    /// Fetch the full country directory.
    pub async fn countries(&self) -> Result<Vec<Country>, ApiError> {
        let url = format!("{}/countries", self.base_url);
        send_json(self.http.get(&url)).await
    }

    /// Check that the backend is up.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = format!("{}/", self.base_url);
        send_json(self.http.get(&url)).await
    }
}

/// Send a request and decode a JSON success body.
async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ApiError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let body = response.text().await?;
    trace!(bytes = body.len(), "received response body");

    serde_json::from_str(&body).map_err(|e| ApiError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(ERROR_BODY_CHARS).collect()),
    })
}

impl LookupService for ApiClient {
    async fn lookup(&self, query: &PlateQuery, language: Language) -> Result<MatchSet, ApiError> {
        self.check(query, language).await
    }
}

impl RouteService for ApiClient {
    async fn build_route(
        &self,
        query: &PlateQuery,
        language: Language,
        origin: Option<Coordinates>,
    ) -> Result<Vec<RouteSegment>, ApiError> {
        self.route(query, language, origin).await
    }
}
