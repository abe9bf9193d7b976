//! Licence plate search client.
//!
//! Answers "which countries could a car with these plate characters come
//! from?" against the SignLuck backend, and plans a route through the most
//! probable ones. The [`engine`] keeps the display state consistent while the
//! user types, switches language and asks for routes.

pub mod api;
pub mod cache;
pub mod domain;
pub mod engine;
pub mod geo;
