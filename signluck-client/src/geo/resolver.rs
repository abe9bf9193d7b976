//! Bounded-wait location resolution.

use std::time::Duration;

use tracing::debug;

use crate::domain::Coordinates;

use super::sensor::{GeoError, GeoSensor};

/// Default wait for a fix before building the route without one.
pub const DEFAULT_GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of one fix attempt.
///
/// Not having a position is an ordinary outcome here, not an error: route
/// building goes ahead either way.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoFix {
    Located(Coordinates),
    Unavailable(GeoError),
}

impl GeoFix {
    /// Coordinates to attach to a route request, if any.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            GeoFix::Located(c) => Some(*c),
            GeoFix::Unavailable(_) => None,
        }
    }
}

/// Asks a sensor for one fix and never waits longer than `max_wait`.
///
/// There are no retries; each call is a single attempt.
#[derive(Debug)]
pub struct GeolocationResolver<G> {
    sensor: G,
    max_wait: Duration,
}

impl<G: GeoSensor> GeolocationResolver<G> {
    pub fn new(sensor: G, max_wait: Duration) -> Self {
        Self { sensor, max_wait }
    }

    pub fn max_wait(&self) -> Duration {
        self.max_wait
    }

    /// Attempt a single fix.
    pub async fn resolve(&self) -> GeoFix {
        let attempt = self.sensor.current_position(self.max_wait);

        match tokio::time::timeout(self.max_wait, attempt).await {
            Ok(Ok(coords)) => {
                debug!(%coords, "location fix obtained");
                GeoFix::Located(coords)
            }
            Ok(Err(e)) => {
                debug!(error = %e, "location unavailable, continuing without it");
                GeoFix::Unavailable(e)
            }
            Err(_) => {
                debug!(wait_ms = self.max_wait.as_millis() as u64, "location fix timed out");
                GeoFix::Unavailable(GeoError::Timeout)
            }
        }
    }
}
