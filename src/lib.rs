//! Concurrent HTTP load generator for a `/user?id=` endpoint.
//!
//! A batch issues a fixed number of `GET {base_url}/user?id=<n>` requests with
//! ids drawn uniformly from an inclusive range, never exceeding a configured
//! number of in-flight requests. Every attempt becomes an
//! [`metrics::OutcomeRecord`]; the [`metrics::StatsAggregator`] folds them
//! into a [`metrics::Summary`] that the `userload` binary prints as text or
//! JSON.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod shutdown;

mod app;
mod entry;
mod logger;
mod shutdown_handlers;

pub use entry::run;
