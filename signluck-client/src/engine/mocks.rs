//! Mock services for engine tests.
//!
//! Each mock records the calls it receives and answers after a configurable
//! per-query delay, which together with tokio's paused clock lets tests pin
//! down the exact order in which lookups and route builds resolve.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::ApiError;
use crate::domain::{Coordinates, Language, MatchSet, PlateQuery, RouteSegment, sample_match, sample_segment};
use crate::geo::{GeoError, GeoSensor};

use super::route::RouteService;
use super::search::LookupService;

fn service_unavailable() -> ApiError {
    ApiError::Api {
        status: 503,
        message: "Service Unavailable".to_string(),
    }
}

/// Lookup that answers with a single match whose country code is the query.
#[derive(Clone, Default)]
pub struct MockLookup {
    calls: Arc<Mutex<Vec<(String, Language)>>>,
    delays: Arc<HashMap<String, Duration>>,
    failing: Arc<HashSet<String>>,
}

impl MockLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay the answer for `query` (normalized form).
    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        Arc::make_mut(&mut self.delays).insert(query.to_string(), delay);
        self
    }

    /// Fail lookups for `query` (normalized form).
    pub fn failing_on(mut self, query: &str) -> Self {
        Arc::make_mut(&mut self.failing).insert(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, Language)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

/// The match set [`MockLookup`] returns for `query`.
pub fn matches_for(query: &str) -> MatchSet {
    MatchSet::new(vec![sample_match(query, 25.0)], 1, 25.0)
}

impl LookupService for MockLookup {
    async fn lookup(&self, query: &PlateQuery, language: Language) -> Result<MatchSet, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.as_str().to_string(), language));

        if let Some(delay) = self.delays.get(query.as_str()) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing.contains(query.as_str()) {
            return Err(service_unavailable());
        }

        Ok(matches_for(query.as_str()))
    }
}

/// Route service answering with two segments, `{query}1` then `{query}2`.
#[derive(Clone, Default)]
pub struct MockRoutes {
    calls: Arc<Mutex<Vec<(String, Language, Option<Coordinates>)>>>,
    delays: Arc<HashMap<String, Duration>>,
    failing: Arc<HashSet<String>>,
}

impl MockRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        Arc::make_mut(&mut self.delays).insert(query.to_string(), delay);
        self
    }

    pub fn failing_on(mut self, query: &str) -> Self {
        Arc::make_mut(&mut self.failing).insert(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, Language, Option<Coordinates>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

/// The segments [`MockRoutes`] returns for `query`.
pub fn segments_for(query: &str) -> Vec<RouteSegment> {
    vec![
        sample_segment(&format!("{query}1")),
        sample_segment(&format!("{query}2")),
    ]
}

impl RouteService for MockRoutes {
    async fn build_route(
        &self,
        query: &PlateQuery,
        language: Language,
        origin: Option<Coordinates>,
    ) -> Result<Vec<RouteSegment>, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.as_str().to_string(), language, origin));

        if let Some(delay) = self.delays.get(query.as_str()) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing.contains(query.as_str()) {
            return Err(service_unavailable());
        }

        Ok(segments_for(query.as_str()))
    }
}

/// Sensor that never produces a fix.
#[derive(Clone, Copy, Default)]
pub struct HangingSensor;

impl GeoSensor for HangingSensor {
    async fn current_position(&self, _max_wait: Duration) -> Result<Coordinates, GeoError> {
        std::future::pending().await
    }
}

/// Sensor that refuses permission.
#[derive(Clone, Copy, Default)]
pub struct DeniedSensor;

impl GeoSensor for DeniedSensor {
    async fn current_position(&self, _max_wait: Duration) -> Result<Coordinates, GeoError> {
        Err(GeoError::Denied)
    }
}
