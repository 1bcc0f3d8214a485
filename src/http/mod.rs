//! HTTP server module.
//!
//! Binds the configured address, serves the router and shuts down gracefully
//! on SIGTERM/SIGINT, draining in-flight connections first.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
