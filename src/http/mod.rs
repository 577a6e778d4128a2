//! Request execution, concurrency limiting and batch scheduling.
mod batch;
mod client;
mod executor;
mod limiter;
mod scheduler;
mod workload;

#[cfg(test)]
pub(crate) mod test_support;

pub use batch::{BatchConfig, DEFAULT_REQUEST_TIMEOUT};
pub use client::build_client;
pub use executor::{HttpExecutor, RequestExecutor};
pub use limiter::{ConcurrencyLimiter, LimiterPermit};
pub use scheduler::{NoProgress, ProgressSink, run_batch};
pub use workload::TargetIdRange;
