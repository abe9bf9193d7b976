//! Route dispatcher.
//!
//! Builds a route on explicit request only. The user's position is asked
//! for once, with a bounded wait; whatever the sensor says, the route call
//! goes out, with coordinates when there is a fix and without otherwise.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::ApiError;
use crate::domain::{Coordinates, Language, PlateQuery, RouteSegment};
use crate::geo::{GeoFix, GeoSensor, GeolocationResolver};

use super::state::QueryStateHolder;

/// Trait for building routes from a plate query.
pub trait RouteService: Send + Sync + 'static {
    /// Route through the most probable countries for `query`.
    ///
    /// Segments come back in travel order and must be kept that way.
    fn build_route(
        &self,
        query: &PlateQuery,
        language: Language,
        origin: Option<Coordinates>,
    ) -> impl Future<Output = Result<Vec<RouteSegment>, ApiError>> + Send;
}

/// Where a route starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteOrigin {
    /// Ask the geolocation sensor.
    Sensor,
    /// Use these coordinates and skip the sensor (e.g. a chosen departure country).
    Manual(Coordinates),
}

/// What happened to one route build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Segments were written to the display state.
    Built { segments: usize, located: bool },
    /// The build failed and the route was emptied.
    Failed,
    /// A newer build or a clear took over before this one resolved.
    Discarded,
    /// Empty query; nothing was done.
    Skipped,
}

/// Issues route builds and applies their outcomes.
pub struct RouteDispatcher<R, G> {
    routes: R,
    resolver: GeolocationResolver<G>,
    state: Arc<QueryStateHolder>,
}

impl<R: RouteService, G: GeoSensor> RouteDispatcher<R, G> {
    pub fn new(routes: R, resolver: GeolocationResolver<G>, state: Arc<QueryStateHolder>) -> Self {
        Self {
            routes,
            resolver,
            state,
        }
    }

    /// Build a route for `query` in `language` starting from `origin`.
    pub async fn build(&self, query: String, language: Language, origin: RouteOrigin) -> RouteOutcome {
        if query.is_empty() {
            return RouteOutcome::Skipped;
        }

        let epoch = self.state.begin_route().await;

        let plate = match PlateQuery::parse(&query) {
            Ok(plate) => plate,
            Err(e) => {
                debug!(%query, error = %e, "route query not sent");
                return self.finish(epoch, None, false).await;
            }
        };

        let fix = match origin {
            RouteOrigin::Sensor => self.resolver.resolve().await,
            RouteOrigin::Manual(coords) => GeoFix::Located(coords),
        };
        let coords = fix.coordinates();

        let result = match self.routes.build_route(&plate, language, coords).await {
            Ok(segments) => {
                debug!(%plate, %language, segments = segments.len(), "route built");
                Some(segments)
            }
            Err(e) => {
                warn!(%plate, %language, error = %e, "route build failed");
                None
            }
        };

        self.finish(epoch, result, coords.is_some()).await
    }

    async fn finish(
        &self,
        epoch: u64,
        result: Option<Vec<RouteSegment>>,
        located: bool,
    ) -> RouteOutcome {
        let segments = result.as_ref().map(Vec::len);
        if !self.state.finish_route(epoch, result).await {
            return RouteOutcome::Discarded;
        }

        match segments {
            Some(segments) => RouteOutcome::Built { segments, located },
            None => RouteOutcome::Failed,
        }
    }
}
