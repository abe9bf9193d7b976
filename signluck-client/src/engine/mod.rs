//! Search and route orchestration.
//!
//! This module decides when a typed query is looked up, how the optional
//! user position is folded into route builds, and how the display state stays
//! consistent while the user keeps typing or switches language.
//!
//! Everything runs as cooperative tokio tasks. In-flight calls are never
//! aborted; instead each resolved call checks that it is still current before
//! writing, and quietly drops its result otherwise.

mod config;
mod debounce;
mod orchestrator;
mod reactor;
mod route;
mod search;
mod state;

#[cfg(test)]
pub(crate) mod mocks;

pub use config::{DEFAULT_DEBOUNCE, EngineConfig};
pub use debounce::Debouncer;
pub use orchestrator::SearchEngine;
pub use reactor::spawn_language_reactor;
pub use route::{RouteDispatcher, RouteOrigin, RouteOutcome, RouteService};
pub use search::{LookupService, SearchDispatcher, SearchOutcome};
pub use state::{DisplayState, QueryEdit, QueryStateHolder, SearchTag};
