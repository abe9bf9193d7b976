//! Query state holder.
//!
//! Owns the one [`DisplayState`] of an engine plus the bookkeeping the
//! dispatchers need to decide whether a resolved call may still write to it.
//! Every transition runs under a single lock acquisition and is published to
//! subscribers as one snapshot, so observers never see a match set that
//! disagrees with its count or a half-cleared state.

use tokio::sync::{Mutex, watch};
use tracing::trace;

use crate::domain::{Language, MatchSet, RouteSegment};

/// What the display surface shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayState {
    /// Raw query text as typed.
    pub query: String,

    /// Matches for the query, in service ranking order.
    pub matches: MatchSet,

    /// Route legs, in planner order.
    pub route: Vec<RouteSegment>,

    /// A lookup has been dispatched and not yet resolved.
    pub matches_loading: bool,

    /// A route build is in progress.
    pub route_loading: bool,
}

/// Result of a query edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEdit {
    /// Same text as before; nothing to do.
    Unchanged,
    /// Query became empty; matches were cleared on the spot.
    Emptied,
    /// Query now holds new non-empty text.
    Edited,
}

/// The query and language a search was issued for.
///
/// A resolved search may only write its results while both still match the
/// holder's current values and no clear has happened since it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTag {
    pub query: String,
    pub language: Language,
    epoch: u64,
}

/// How a finished search was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchApplied {
    Results,
    Emptied,
    Stale,
}

#[derive(Debug)]
struct Slots {
    display: DisplayState,
    language: Language,

    /// Searches dispatched in the current search epoch and not yet finished.
    searches_in_flight: usize,

    /// Bumped whenever matches are reset; older searches can no longer write.
    search_epoch: u64,

    /// Identifies the route build allowed to write the route slice.
    route_epoch: u64,
}

impl Slots {
    /// Orphan every search issued so far.
    fn reset_searches(&mut self) {
        self.search_epoch += 1;
        self.searches_in_flight = 0;
    }

    fn refresh_matches_loading(&mut self) {
        self.display.matches_loading =
            self.searches_in_flight > 0 && !self.display.query.is_empty();
    }
}

/// Shared owner of the display state.
#[derive(Debug)]
pub struct QueryStateHolder {
    slots: Mutex<Slots>,
    published: watch::Sender<DisplayState>,
}

impl QueryStateHolder {
    /// Create an empty state with the given starting language.
    pub fn new(language: Language) -> Self {
        let (published, _) = watch::channel(DisplayState::default());
        Self {
            slots: Mutex::new(Slots {
                display: DisplayState::default(),
                language,
                searches_in_flight: 0,
                search_epoch: 0,
                route_epoch: 0,
            }),
            published,
        }
    }

    fn publish(&self, slots: &Slots) {
        self.published.send_replace(slots.display.clone());
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.published.subscribe()
    }

    /// Current display state.
    pub async fn snapshot(&self) -> DisplayState {
        self.slots.lock().await.display.clone()
    }

    /// Current query text.
    pub async fn query(&self) -> String {
        self.slots.lock().await.display.query.clone()
    }

    /// Active language.
    pub async fn language(&self) -> Language {
        self.slots.lock().await.language
    }

    /// Current query and language, read together.
    pub async fn current_tag(&self) -> SearchTag {
        let slots = self.slots.lock().await;
        SearchTag {
            query: slots.display.query.clone(),
            language: slots.language,
            epoch: slots.search_epoch,
        }
    }

    /// Replace the query text.
    ///
    /// An empty query clears matches and both loading flags immediately and
    /// orphans every search and route build still in progress. Existing
    /// route segments stay until [`clear`](Self::clear).
    pub async fn set_query(&self, text: String) -> QueryEdit {
        let mut slots = self.slots.lock().await;

        if slots.display.query == text {
            return QueryEdit::Unchanged;
        }

        let edit = if text.is_empty() {
            slots.display.matches = MatchSet::empty();
            slots.display.matches_loading = false;
            slots.display.route_loading = false;
            slots.reset_searches();
            slots.route_epoch += 1;
            QueryEdit::Emptied
        } else {
            QueryEdit::Edited
        };

        slots.display.query = text;
        slots.refresh_matches_loading();
        self.publish(&slots);
        edit
    }

    /// Reset query, matches and route to empty.
    ///
    /// Searches and route builds still in flight will find their tag or
    /// epoch outdated when they resolve and drop their results.
    pub async fn clear(&self) {
        let mut slots = self.slots.lock().await;
        slots.display = DisplayState::default();
        slots.reset_searches();
        slots.route_epoch += 1;
        self.publish(&slots);
    }

    /// Switch language. Returns the current query if this was a change.
    pub async fn switch_language(&self, language: Language) -> Option<String> {
        let mut slots = self.slots.lock().await;
        if slots.language == language {
            return None;
        }
        slots.language = language;
        Some(slots.display.query.clone())
    }

    /// Record a dispatched search for `query` in `language`.
    ///
    /// The returned tag must be handed back to [`finish_search`](Self::finish_search).
    pub(crate) async fn begin_search(&self, query: String, language: Language) -> SearchTag {
        let mut slots = self.slots.lock().await;
        slots.searches_in_flight += 1;
        slots.refresh_matches_loading();
        self.publish(&slots);
        SearchTag {
            query,
            language,
            epoch: slots.search_epoch,
        }
    }

    /// Record a finished search and apply its outcome if still current.
    ///
    /// `None` is a failed lookup and empties the match set.
    pub(crate) async fn finish_search(
        &self,
        tag: &SearchTag,
        outcome: Option<MatchSet>,
    ) -> SearchApplied {
        let mut slots = self.slots.lock().await;
        if slots.search_epoch != tag.epoch {
            trace!(query = %tag.query, epoch = tag.epoch, "dropping search issued before a reset");
            return SearchApplied::Stale;
        }
        slots.searches_in_flight = slots.searches_in_flight.saturating_sub(1);

        let current = slots.display.query == tag.query && slots.language == tag.language;
        let applied = if !current {
            trace!(query = %tag.query, language = %tag.language, "dropping stale search result");
            SearchApplied::Stale
        } else {
            match outcome {
                Some(set) => {
                    slots.display.matches = set;
                    SearchApplied::Results
                }
                None => {
                    slots.display.matches = MatchSet::empty();
                    SearchApplied::Emptied
                }
            }
        };

        slots.refresh_matches_loading();
        self.publish(&slots);
        applied
    }

    /// Start a route build and take ownership of the route slice.
    pub(crate) async fn begin_route(&self) -> u64 {
        let mut slots = self.slots.lock().await;
        slots.route_epoch += 1;
        slots.display.route_loading = true;
        self.publish(&slots);
        slots.route_epoch
    }

    /// Finish a route build. Returns false if a newer build or a clear took over.
    ///
    /// `None` is a failed build and empties the route.
    pub(crate) async fn finish_route(
        &self,
        epoch: u64,
        outcome: Option<Vec<RouteSegment>>,
    ) -> bool {
        let mut slots = self.slots.lock().await;
        if slots.route_epoch != epoch {
            trace!(epoch, current = slots.route_epoch, "dropping stale route");
            return false;
        }

        slots.display.route = outcome.unwrap_or_default();
        slots.display.route_loading = false;
        self.publish(&slots);
        true
    }
}
