//! Geolocation sensor seam and simple sensors.

use std::future::Future;
use std::time::Duration;

use crate::domain::Coordinates;

/// Why a location fix could not be obtained.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    /// The user or platform refused access to location
    #[error("location permission denied")]
    Denied,

    /// No position source is available
    #[error("position unavailable: {0}")]
    Unavailable(String),

    /// No fix arrived within the allowed wait
    #[error("timed out waiting for a location fix")]
    Timeout,
}

/// A one-shot source of the user's position.
///
/// Implementations should honour `max_wait` themselves where the platform
/// allows it; the resolver enforces the bound regardless.
pub trait GeoSensor: Send + Sync + 'static {
    /// Request a single fix.
    fn current_position(
        &self,
        max_wait: Duration,
    ) -> impl Future<Output = Result<Coordinates, GeoError>> + Send;
}

/// A sensor that always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedSensor(pub Coordinates);

impl GeoSensor for FixedSensor {
    async fn current_position(&self, _max_wait: Duration) -> Result<Coordinates, GeoError> {
        Ok(self.0)
    }
}

/// A sensor for environments with no position source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSensor;

impl GeoSensor for NoSensor {
    async fn current_position(&self, _max_wait: Duration) -> Result<Coordinates, GeoError> {
        Err(GeoError::Unavailable("no location source configured".to_string()))
    }
}

/// Either a fixed position or none, chosen at startup.
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredSensor {
    Fixed(FixedSensor),
    Absent(NoSensor),
}

impl ConfiguredSensor {
    /// Use `position` if given, otherwise report no location.
    pub fn from_position(position: Option<Coordinates>) -> Self {
        match position {
            Some(c) => ConfiguredSensor::Fixed(FixedSensor(c)),
            None => ConfiguredSensor::Absent(NoSensor),
        }
    }
}

impl GeoSensor for ConfiguredSensor {
    async fn current_position(&self, max_wait: Duration) -> Result<Coordinates, GeoError> {
        match self {
            ConfiguredSensor::Fixed(s) => s.current_position(max_wait).await,
            ConfiguredSensor::Absent(s) => s.current_position(max_wait).await,
        }
    }
}
