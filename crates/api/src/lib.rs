//! Watchpost API server library.
//!
//! Exposes the ingestion engine and the HTTP building blocks (config,
//! state, error handling, routes) so integration tests and the binary
//! entrypoint can both access them.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
