//! HTTP server for the citizen services portal.
//!
//! Exposed as a library so integration tests can build the router
//! in-process; the binary entry point lives in `main.rs`.

pub mod api;
pub mod config;
pub mod logging;
