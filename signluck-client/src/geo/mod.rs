//! User location for route building.
//!
//! The route planner works better with the user's position but never
//! requires it. A [`GeolocationResolver`] makes one bounded attempt through a
//! [`GeoSensor`] and reports either a fix or why there is none.

mod resolver;
mod sensor;

pub use resolver::{DEFAULT_GEOLOCATION_TIMEOUT, GeoFix, GeolocationResolver};
pub use sensor::{ConfiguredSensor, FixedSensor, GeoError, GeoSensor, NoSensor};
