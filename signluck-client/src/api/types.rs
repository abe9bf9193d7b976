//! SignLuck API request and response DTOs.
//!
//! These map directly to the backend's JSON bodies. The language is not part
//! of any body; it travels as the `lang` query parameter.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinates, MatchResult, MatchSet, PlateQuery, RouteSegment};

/// Body of `POST /check`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckRequest<'a> {
    pub query: &'a str,
}

impl<'a> CheckRequest<'a> {
    pub fn new(query: &'a PlateQuery) -> Self {
        Self {
            query: query.as_str(),
        }
    }
}

/// Response from `POST /check`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckResponse {
    pub results: Vec<MatchResult>,
    pub total_results: usize,
    pub max_probability: f64,

    /// Alternative spellings suggested by the backend (currently always empty).
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl From<CheckResponse> for MatchSet {
    fn from(resp: CheckResponse) -> Self {
        MatchSet::new(resp.results, resp.total_results, resp.max_probability)
    }
}

/// Body of `POST /route`.
///
/// Coordinates are omitted entirely when no fix is available, which makes
/// the backend fall back to a probability-ordered route.
#[derive(Debug, Clone, Serialize)]
pub struct RouteRequest<'a> {
    pub query: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_lat: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_lng: Option<f64>,
}

impl<'a> RouteRequest<'a> {
    pub fn new(query: &'a PlateQuery, origin: Option<Coordinates>) -> Self {
        Self {
            query: query.as_str(),
            user_lat: origin.map(|c| c.lat),
            user_lng: origin.map(|c| c.lng),
        }
    }
}

/// Response from `POST /route`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    pub segments: Vec<RouteSegment>,
}

/// Response from `GET /`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_request_omits_missing_coordinates() {
        let q = PlateQuery::parse("ab1").unwrap();
        let body = serde_json::to_value(RouteRequest::new(&q, None)).unwrap();
        assert_eq!(body, serde_json::json!({"query": "AB1"}));
    }

    #[test]
    fn route_request_includes_coordinates() {
        let q = PlateQuery::parse("ab1").unwrap();
        let body =
            serde_json::to_value(RouteRequest::new(&q, Some(Coordinates::new(55.7, 37.6))))
                .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"query": "AB1", "user_lat": 55.7, "user_lng": 37.6})
        );
    }

    #[test]
    fn check_response_into_match_set() {
        let resp: CheckResponse = serde_json::from_str(
            r#"{"results": [], "total_results": 0, "max_probability": 0.0}"#,
        )
        .unwrap();
        assert!(resp.suggestions.is_empty());

        let set: MatchSet = resp.into();
        assert!(set.is_empty());
    }

    #[test]
    fn check_response_keeps_reported_scalars() {
        let json = serde_json::json!({
            "results": [serde_json::to_value(crate::domain::sample_match("PL", 7.5)).unwrap()],
            "total_results": 1,
            "max_probability": 7.5,
        });
        let resp: CheckResponse = serde_json::from_value(json).unwrap();
        let set = MatchSet::from(resp);
        assert_eq!(set.total_results(), 1);
        assert_eq!(set.max_probability(), 7.5);
        assert_eq!(set.results()[0].country_code, "PL");
    }

    #[test]
    fn health_response() {
        let h: HealthResponse =
            serde_json::from_str(r#"{"status": "ok", "service": "signluck-backend"}"#).unwrap();
        assert!(h.is_ok());
    }
}
