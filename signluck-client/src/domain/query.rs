//! Plate query normalization.

use std::fmt;

/// Longest combination the backend accepts, in characters.
pub const MAX_QUERY_CHARS: usize = 10;

/// Error returned when a raw query cannot be sent as a lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid plate query: {reason}")]
pub struct InvalidQuery {
    reason: &'static str,
}

/// A plate combination in the form the backend expects.
///
/// The raw text the user typed is kept as-is in the display state; this is
/// the trimmed, uppercased version that goes on the wire. Construction
/// guarantees 1 to [`MAX_QUERY_CHARS`] characters.
///
/// # Examples
///
/// ```
/// use signluck_client::domain::PlateQuery;
///
/// let q = PlateQuery::parse("  ab12 ").unwrap();
/// assert_eq!(q.as_str(), "AB12");
///
/// assert!(PlateQuery::parse("   ").is_err());
/// assert!(PlateQuery::parse("ABCDEFGHIJK").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PlateQuery(String);

impl PlateQuery {
    /// Normalize raw user input into a plate query.
    pub fn parse(raw: &str) -> Result<Self, InvalidQuery> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(InvalidQuery {
                reason: "must not be blank",
            });
        }

        if trimmed.chars().count() > MAX_QUERY_CHARS {
            return Err(InvalidQuery {
                reason: "must be at most 10 characters",
            });
        }

        Ok(PlateQuery(trimmed.to_uppercase()))
    }

    /// Returns the normalized query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlateQuery({})", self.0)
    }
}

impl fmt::Display for PlateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
