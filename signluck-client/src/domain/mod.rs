//! Domain types for the plate search client.
//!
//! Value types shared by the engine, the API client and the display
//! surface. Payload types mirror the backend schema and are passed through
//! without reinterpretation; [`PlateQuery`] and [`Language`] enforce their
//! invariants at construction time.

mod country;
mod language;
mod matches;
mod query;
mod route;

pub use country::{Country, find_country};
pub use language::{InvalidLanguage, Language};
pub use matches::{ExampleSymbol, MatchResult, MatchSet, PlateSymbol};
pub use query::{InvalidQuery, MAX_QUERY_CHARS, PlateQuery};
pub use route::{Coordinates, RouteSegment};

#[cfg(test)]
pub(crate) use matches::sample_match;
#[cfg(test)]
pub(crate) use route::sample_segment;
