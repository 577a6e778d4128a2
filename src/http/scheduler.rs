use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use rand::Rng;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::metrics::{BatchReport, OutcomeRecord, StatsAggregator};
use crate::shutdown::ShutdownReceiver;

use super::batch::BatchConfig;
use super::executor::RequestExecutor;
use super::limiter::ConcurrencyLimiter;

/// Receives every outcome as soon as its request completes.
pub trait ProgressSink: Send + Sync {
    fn on_outcome(&self, outcome: &OutcomeRecord);
}

/// Progress sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_outcome(&self, _outcome: &OutcomeRecord) {}
}

/// Shared state every spawned work item needs.
struct WorkContext<E: ?Sized> {
    executor: Arc<E>,
    limiter: ConcurrencyLimiter,
    aggregator: Arc<StatsAggregator>,
    progress: Arc<dyn ProgressSink>,
}

impl<E: ?Sized> Clone for WorkContext<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            limiter: self.limiter.clone(),
            aggregator: Arc::clone(&self.aggregator),
            progress: Arc::clone(&self.progress),
        }
    }
}

/// Runs one batch to completion or until shutdown is signalled.
///
/// Work items are generated up front from `rng`, outside the timed window.
/// At most `config.concurrency()` executions hold a limiter slot at once.
/// A shutdown stops new executions, abandons in-flight ones and still
/// reports whatever was ingested before it.
pub async fn run_batch<E, R>(
    config: &BatchConfig,
    executor: Arc<E>,
    rng: &mut R,
    progress: Arc<dyn ProgressSink>,
    mut shutdown_rx: ShutdownReceiver,
) -> BatchReport
where
    E: RequestExecutor + ?Sized + 'static,
    R: Rng + ?Sized,
{
    let work_items = config.id_range().sample_many(config.num_requests(), rng);
    let aggregator = Arc::new(StatsAggregator::new());
    let context = WorkContext {
        executor,
        limiter: ConcurrencyLimiter::new(config.concurrency()),
        aggregator: Arc::clone(&aggregator),
        progress,
    };

    info!(
        "Starting {} requests with concurrency {} against {}",
        config.num_requests(),
        config.concurrency(),
        config.target_pattern()
    );

    let started = Instant::now();
    let mut tasks = JoinSet::new();
    for target_id in work_items {
        tasks.spawn(run_work_item(context.clone(), target_id));
    }

    let shutdown = wait_for_shutdown(&mut shutdown_rx);
    tokio::pin!(shutdown);

    let mut interrupted = false;
    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => {
                interrupted = true;
                break;
            }
            joined = tasks.join_next() => match joined {
                Some(Ok(())) => {}
                Some(Err(err)) => warn!("Work item task failed: {}", err),
                None => break,
            }
        }
    }

    if interrupted {
        warn!("Shutdown requested; abandoning in-flight requests.");
        context.limiter.close();
        tasks.abort_all();
        // Aborted tasks may still be mid-ingest; wait until none are running.
        while tasks.join_next().await.is_some() {}
    }

    let elapsed = started.elapsed();
    let summary = aggregator.summarize();
    let throughput = throughput(summary.total_requests, elapsed);

    info!(
        "Batch finished: {} requests in {:.2}s ({:.2} req/s){}",
        summary.total_requests,
        elapsed.as_secs_f64(),
        throughput,
        if interrupted { ", interrupted" } else { "" }
    );

    BatchReport {
        summary,
        elapsed,
        throughput,
        interrupted,
    }
}

async fn run_work_item<E>(context: WorkContext<E>, target_id: i64)
where
    E: RequestExecutor + ?Sized,
{
    let Some(permit) = context.limiter.acquire().await else {
        return;
    };
    let started = Instant::now();
    let outcome = match AssertUnwindSafe(context.executor.execute(target_id))
        .catch_unwind()
        .await
    {
        Ok(outcome) => outcome,
        Err(payload) => OutcomeRecord::failure(
            target_id,
            None,
            started.elapsed(),
            format!("Exception: {}", panic_message(payload.as_ref())),
        ),
    };
    drop(permit);

    debug!(
        target_id = outcome.target_id(),
        succeeded = outcome.succeeded(),
        latency_ms = outcome.latency().as_millis(),
        "Request completed"
    );
    context.progress.on_outcome(&outcome);
    context.aggregator.ingest(outcome);
}

async fn wait_for_shutdown(shutdown_rx: &mut ShutdownReceiver) {
    match shutdown_rx.recv().await {
        Ok(()) | Err(RecvError::Lagged(_)) => {}
        // Every sender is gone, so no shutdown can ever arrive.
        Err(RecvError::Closed) => std::future::pending::<()>().await,
    }
}

#[expect(clippy::float_arithmetic, reason = "Requests per second is a rate.")]
fn throughput(completed: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        completed as f64 / secs
    } else {
        0.0
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_owned();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "request executor panicked".to_owned()
}
