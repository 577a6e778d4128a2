use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use super::types::{MAX_REPORTED_ERRORS, OutcomeRecord, Summary};

#[derive(Debug, Default)]
struct AggregatorState {
    total: u64,
    success: u64,
    failure: u64,
    latencies: Vec<Duration>,
    errors: Vec<String>,
}

/// Shared accumulator for the outcomes of one batch.
///
/// `ingest` may be called from any number of tasks at once; each record is
/// applied under a single lock acquisition so the counters never disagree.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    state: Mutex<AggregatorState>,
}

impl StatsAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest(&self, outcome: OutcomeRecord) {
        let mut state = self.lock();
        state.total = state.total.saturating_add(1);
        if outcome.succeeded() {
            state.success = state.success.saturating_add(1);
            state.latencies.push(outcome.latency());
        } else {
            state.failure = state.failure.saturating_add(1);
            // Failures that never started a timer carry no latency sample.
            if !outcome.latency().is_zero() {
                state.latencies.push(outcome.latency());
            }
            if let Some(message) = outcome.error_message() {
                state.errors.push(message.to_owned());
            }
        }
    }

    /// Returns `(total, success, failure)` as currently ingested.
    #[must_use]
    pub fn snapshot_counts(&self) -> (u64, u64, u64) {
        let state = self.lock();
        (state.total, state.success, state.failure)
    }

    #[must_use]
    pub fn summarize(&self) -> Summary {
        let state = self.lock();
        if state.total == 0 {
            return Summary::empty();
        }

        let success_rate = ratio_percent(state.success, state.total);
        let (avg, min, max) = latency_stats_ms(&state.latencies);

        Summary {
            total_requests: state.total,
            successful_requests: state.success,
            failed_requests: state.failure,
            success_rate,
            avg_response_time_ms: avg,
            min_response_time_ms: min,
            max_response_time_ms: max,
            errors: state
                .errors
                .iter()
                .take(MAX_REPORTED_ERRORS)
                .cloned()
                .collect(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AggregatorState> {
        // Counters are plain integers; a panicked holder leaves them intact.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[expect(clippy::float_arithmetic, reason = "Success rate is a percentage.")]
fn ratio_percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// Average, minimum and maximum in milliseconds rounded to two decimals.
///
/// Sums are taken over integer nanoseconds so the result does not depend on
/// the order samples arrived in.
#[expect(clippy::float_arithmetic, reason = "Average latency is fractional.")]
fn latency_stats_ms(latencies: &[Duration]) -> (f64, f64, f64) {
    let (Some(min), Some(max)) = (latencies.iter().min(), latencies.iter().max()) else {
        return (0.0, 0.0, 0.0);
    };
    let total_nanos: u128 = latencies.iter().map(Duration::as_nanos).sum();
    let count = latencies.len() as f64;
    let avg_ms = total_nanos as f64 / count / 1_000_000.0;

    (
        round_ms(avg_ms),
        round_ms(duration_ms(*min)),
        round_ms(duration_ms(*max)),
    )
}

#[expect(clippy::float_arithmetic, reason = "Milliseconds are fractional.")]
fn duration_ms(value: Duration) -> f64 {
    value.as_secs_f64() * 1000.0
}

#[expect(clippy::float_arithmetic, reason = "Rounds to two decimals.")]
fn round_ms(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
