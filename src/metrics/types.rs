use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Number of error messages carried into a [`Summary`].
pub const MAX_REPORTED_ERRORS: usize = 10;

/// Result of a single request attempt.
///
/// A record is either a success or carries an error message, never both;
/// the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRecord {
    target_id: i64,
    succeeded: bool,
    status_code: Option<u16>,
    latency: Duration,
    error_message: Option<String>,
}

impl OutcomeRecord {
    #[must_use]
    pub const fn success(target_id: i64, status_code: u16, latency: Duration) -> Self {
        Self {
            target_id,
            succeeded: true,
            status_code: Some(status_code),
            latency,
            error_message: None,
        }
    }

    #[must_use]
    pub const fn failure(
        target_id: i64,
        status_code: Option<u16>,
        latency: Duration,
        message: String,
    ) -> Self {
        Self {
            target_id,
            succeeded: false,
            status_code,
            latency,
            error_message: Some(message),
        }
    }

    #[must_use]
    pub const fn target_id(&self) -> i64 {
        self.target_id
    }

    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.succeeded
    }

    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    #[must_use]
    pub fn latency_seconds(&self) -> f64 {
        self.latency.as_secs_f64()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Aggregated statistics for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub success_rate: f64,
    pub avg_response_time_ms: f64,
    pub min_response_time_ms: f64,
    pub max_response_time_ms: f64,
    pub errors: Vec<String>,
}

impl Summary {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total_requests: 0,
            successful_requests: 0,
            failed_requests: 0,
            success_rate: 0.0,
            avg_response_time_ms: 0.0,
            min_response_time_ms: 0.0,
            max_response_time_ms: 0.0,
            errors: Vec::new(),
        }
    }
}

/// Summary plus the batch-level timing measured by the scheduler.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub summary: Summary,
    pub elapsed: Duration,
    /// Requests per second over the whole batch.
    pub throughput: f64,
    /// Set when the batch stopped early on a shutdown signal.
    pub interrupted: bool,
}
