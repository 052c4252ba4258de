//! Domain logic for the watchpost passive monitoring server.
//!
//! This crate is free of I/O: it holds the error taxonomy, the monitored
//! entity hierarchy vocabulary, the performance-data parser, and the
//! ingestion wire types. Persistence lives in `watchpost-db`, the HTTP
//! surface and the ingestion engine in `watchpost-api`.

pub mod error;
pub mod hierarchy;
pub mod perfdata;
pub mod report;
pub mod types;
