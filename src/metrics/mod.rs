//! Per-request outcomes and their aggregation into a batch summary.
mod aggregator;
mod types;


pub use aggregator::StatsAggregator;
pub use types::{BatchReport, MAX_REPORTED_ERRORS, OutcomeRecord, Summary};
