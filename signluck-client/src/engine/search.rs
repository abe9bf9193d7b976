//! Search dispatcher.
//!
//! Turns a settled query into one lookup and folds the outcome back into the
//! state holder. Failures never propagate: they are logged and shown as "no
//! results".

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::ApiError;
use crate::domain::{Language, MatchSet, PlateQuery};

use super::state::{QueryStateHolder, SearchApplied};

/// Trait for looking up plate matches.
///
/// This abstraction allows the engine to be tested with mock services and
/// wrapped with a cache.
pub trait LookupService: Send + Sync + 'static {
    /// Countries whose plates can contain `query`, ranked by the service.
    fn lookup(
        &self,
        query: &PlateQuery,
        language: Language,
    ) -> impl Future<Output = Result<MatchSet, ApiError>> + Send;
}

/// What happened to one dispatched search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results were written to the display state.
    Applied { total: usize },
    /// The lookup failed and the match set was emptied.
    Failed,
    /// The query or language moved on before the lookup resolved.
    Discarded,
    /// Nothing to search for.
    Skipped,
}

/// Issues lookups and applies their outcomes.
pub struct SearchDispatcher<L> {
    lookup: L,
    state: Arc<QueryStateHolder>,
}

impl<L: LookupService> SearchDispatcher<L> {
    pub fn new(lookup: L, state: Arc<QueryStateHolder>) -> Self {
        Self { lookup, state }
    }

    /// Look up `query` in `language` and apply the result if still current.
    pub async fn dispatch(&self, query: String, language: Language) -> SearchOutcome {
        if query.is_empty() {
            return SearchOutcome::Skipped;
        }

        let tag = self.state.begin_search(query, language).await;

        let result = match PlateQuery::parse(&tag.query) {
            Ok(plate) => match self.lookup.lookup(&plate, language).await {
                Ok(set) => {
                    debug!(%plate, %language, total = set.total_results(), "lookup resolved");
                    Some(set)
                }
                Err(e) => {
                    warn!(%plate, %language, error = %e, "plate lookup failed");
                    None
                }
            },
            Err(e) => {
                debug!(query = %tag.query, error = %e, "query not sent");
                None
            }
        };

        let total = result.as_ref().map(MatchSet::total_results).unwrap_or(0);
        match self.state.finish_search(&tag, result).await {
            SearchApplied::Results => SearchOutcome::Applied { total },
            SearchApplied::Emptied => SearchOutcome::Failed,
            SearchApplied::Stale => SearchOutcome::Discarded,
        }
    }
}
