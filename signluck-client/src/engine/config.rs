//! Engine timing and startup configuration.

use std::time::Duration;

use crate::domain::Language;
use crate::geo::DEFAULT_GEOLOCATION_TIMEOUT;

/// Default quiet interval before a typed query is looked up.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Configuration parameters for the search engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Quiet interval after the last edit before a lookup is dispatched.
    pub debounce: Duration,

    /// Longest wait for a location fix before building a route without one.
    pub geolocation_timeout: Duration,

    /// Language active when the engine starts.
    pub language: Language,
}

impl EngineConfig {
    /// Set the quiet interval.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the geolocation wait bound.
    pub fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    /// Set the starting language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            geolocation_timeout: DEFAULT_GEOLOCATION_TIMEOUT,
            language: Language::default(),
        }
    }
}
