//! The engine's public entry points.
//!
//! [`SearchEngine`] wires the state holder, debouncer and both dispatchers
//! together and exposes the four operations a display surface needs:
//! editing the query, clearing, building a route and switching language.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::{Coordinates, Language};
use crate::geo::{GeoSensor, GeolocationResolver};

use super::config::EngineConfig;
use super::debounce::Debouncer;
use super::route::{RouteDispatcher, RouteOrigin, RouteOutcome, RouteService};
use super::search::{LookupService, SearchDispatcher, SearchOutcome};
use super::state::{DisplayState, QueryEdit, QueryStateHolder};

struct Inner<L, R, G> {
    state: Arc<QueryStateHolder>,
    debouncer: Debouncer,
    search: SearchDispatcher<L>,
    route: RouteDispatcher<R, G>,
}

/// Search and route orchestration engine.
///
/// Cheap to clone; clones drive the same state. Must be used from within a
/// tokio runtime, since edits and route builds spawn tasks.
pub struct SearchEngine<L, R, G> {
    inner: Arc<Inner<L, R, G>>,
}

impl<L, R, G> Clone for SearchEngine<L, R, G> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<L: LookupService, R: RouteService, G: GeoSensor> SearchEngine<L, R, G> {
    /// Create an engine over the given services.
    pub fn new(lookup: L, routes: R, sensor: G, config: EngineConfig) -> Self {
        let state = Arc::new(QueryStateHolder::new(config.language));
        let resolver = GeolocationResolver::new(sensor, config.geolocation_timeout);

        Self {
            inner: Arc::new(Inner {
                debouncer: Debouncer::new(config.debounce),
                search: SearchDispatcher::new(lookup, state.clone()),
                route: RouteDispatcher::new(routes, resolver, state.clone()),
                state,
            }),
        }
    }

    /// Current display state.
    pub async fn state(&self) -> DisplayState {
        self.inner.state.snapshot().await
    }

    /// Receive every display state transition.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.inner.state.subscribe()
    }

    /// Active language.
    pub async fn language(&self) -> Language {
        self.inner.state.language().await
    }

    /// Replace the query text.
    ///
    /// Non-empty text schedules a lookup after the quiet interval, replacing
    /// any lookup still waiting. Empty text clears the matches immediately
    /// and cancels the waiting lookup.
    pub async fn set_query(&self, text: impl Into<String>) {
        match self.inner.state.set_query(text.into()).await {
            QueryEdit::Unchanged => {}
            QueryEdit::Emptied => {
                self.inner.debouncer.cancel().await;
            }
            QueryEdit::Edited => {
                let engine = self.clone();
                self.inner
                    .debouncer
                    .schedule(move || async move {
                        engine.search_now().await;
                    })
                    .await;
            }
        }
    }

    /// Reset query, matches and route. Results still in flight are dropped.
    pub async fn clear(&self) {
        self.inner.debouncer.cancel().await;
        self.inner.state.clear().await;
    }

    /// Look up the current query right away, bypassing the quiet interval.
    pub async fn search_now(&self) -> SearchOutcome {
        let tag = self.inner.state.current_tag().await;
        self.inner.search.dispatch(tag.query, tag.language).await
    }

    /// React to a language switch.
    ///
    /// With a non-empty query this dispatches one lookup in the new language
    /// immediately and returns its handle. The route is left as it is.
    pub async fn on_language_change(&self, language: Language) -> Option<JoinHandle<SearchOutcome>> {
        let query = self.inner.state.switch_language(language).await?;
        if query.is_empty() {
            debug!(%language, "language changed with no query");
            return None;
        }

        debug!(%language, %query, "language changed, searching again");
        let engine = self.clone();
        Some(tokio::spawn(async move {
            engine.inner.search.dispatch(query, language).await
        }))
    }

    /// Build a route for the current query in the background.
    pub fn trigger_route_build(&self) -> JoinHandle<RouteOutcome> {
        let engine = self.clone();
        tokio::spawn(async move { engine.build_route().await })
    }

    /// Build a route for the current query, locating the user first.
    pub async fn build_route(&self) -> RouteOutcome {
        self.route_with(RouteOrigin::Sensor).await
    }

    /// Build a route for the current query from a chosen starting point.
    pub async fn build_route_from(&self, origin: Coordinates) -> RouteOutcome {
        self.route_with(RouteOrigin::Manual(origin)).await
    }

    async fn route_with(&self, origin: RouteOrigin) -> RouteOutcome {
        let tag = self.inner.state.current_tag().await;
        self.inner.route.build(tag.query, tag.language, origin).await
    }
}
