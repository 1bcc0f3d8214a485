//! poker-coach - HTTP coaching service for the poker trainer
//!
//! Serves a liveness probe and a placeholder coaching endpoint that turns a
//! stage/action/context request into templated advice with example ranges.

pub mod coach;
pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;

pub use error::*;
