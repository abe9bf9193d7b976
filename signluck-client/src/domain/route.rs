//! Route segments and coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// One leg of a proposed itinerary.
///
/// Segments arrive already ordered by the remote planner (nearest first from
/// the user's position, when known) and are kept in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub country_name: String,
    pub country_code: String,
    pub probability: f64,

    /// Ticket search link for this destination.
    pub booking_url: String,

    pub lat: f64,
    pub lng: f64,
}

impl RouteSegment {
    /// Destination coordinates of this leg.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

#[cfg(test)]
pub(crate) fn sample_segment(code: &str) -> RouteSegment {
    RouteSegment {
        country_name: format!("Country {code}"),
        country_code: code.to_string(),
        probability: 10.0,
        booking_url: format!("https://tickets.example/{code}"),
        lat: 48.0,
        lng: 2.0,
    }
}
