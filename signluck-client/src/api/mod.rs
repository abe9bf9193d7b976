//! SignLuck backend client.
//!
//! This module provides an HTTP client for the SignLuck plate-probability
//! backend. Key characteristics of the backend:
//! - The display language is a `?lang=ru|en` query parameter, not a body field
//! - Queries are capped at 10 characters and rejected with 422 beyond that
//! - Route requests carry the user's position only when one is known

mod client;
mod error;
mod types;

pub use client::{ApiClient, ApiConfig};
pub use error::ApiError;
pub use types::{CheckRequest, CheckResponse, HealthResponse, RouteRequest, RouteResponse};
