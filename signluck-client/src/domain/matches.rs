//! Lookup results.
//!
//! These types mirror the backend's `/check` payload. The engine passes them
//! through untouched: probabilities and symbol breakdowns are computed
//! remotely and never recomputed or re-sorted here.

use serde::{Deserialize, Serialize};

/// One position in a country's plate pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateSymbol {
    /// Character shown at this position (a literal or a placeholder).
    pub value: String,

    /// Whether the position is fixed by the pattern rather than free.
    pub is_fixed: bool,

    /// Indices into the query that can land on this position.
    #[serde(default)]
    pub possible_query_indices: Vec<usize>,
}

/// One character of a generated example plate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleSymbol {
    pub value: String,

    /// Whether this character comes from the user's query.
    pub is_query: bool,
}

/// A candidate country for the typed combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub country_name: String,
    pub country_code: String,
    pub lat: f64,
    pub lng: f64,

    /// Service-computed probability score.
    pub probability: f64,

    /// Pattern positions and which query characters may occupy them.
    pub symbols: Vec<PlateSymbol>,

    pub allowed_letters: String,
    pub pattern: String,

    #[serde(default)]
    pub flag_emoji: Option<String>,

    /// Example plates containing the query.
    #[serde(default)]
    pub examples: Vec<Vec<ExampleSymbol>>,
}

/// An ordered set of matches with its summary scalars.
///
/// The three fields always come from the same response. There is no way to
/// change one without replacing the whole set, so the count and maximum can
/// never disagree with the results they describe.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchSet {
    results: Vec<MatchResult>,
    total_results: usize,
    max_probability: f64,
}

impl MatchSet {
    /// Build a set from a service response, as-is.
    pub fn new(results: Vec<MatchResult>, total_results: usize, max_probability: f64) -> Self {
        Self {
            results,
            total_results,
            max_probability,
        }
    }

    /// The "no results" set: no matches, count zero, maximum zero.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Matches in service ranking order.
    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn total_results(&self) -> usize {
        self.total_results
    }

    pub fn max_probability(&self) -> f64 {
        self.max_probability
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The highest-ranked match, if any.
    pub fn top(&self) -> Option<&MatchResult> {
        self.results.first()
    }
}

#[cfg(test)]
pub(crate) fn sample_match(code: &str, probability: f64) -> MatchResult {
    MatchResult {
        country_name: format!("Country {code}"),
        country_code: code.to_string(),
        lat: 50.0,
        lng: 10.0,
        probability,
        symbols: vec![PlateSymbol {
            value: "A".to_string(),
            is_fixed: false,
            possible_query_indices: vec![0],
        }],
        allowed_letters: "ABC".to_string(),
        pattern: "LLDDD".to_string(),
        flag_emoji: None,
        examples: Vec::new(),
    }
}
