use std::path::Path;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info};

use crate::args::LoadArgs;
use crate::error::{AppError, AppResult};
use crate::http::{
    BatchConfig, HttpExecutor, NoProgress, ProgressSink, build_client, run_batch,
};
use crate::shutdown::shutdown_channel;
use crate::shutdown_handlers::setup_signal_shutdown_handler;

use super::export::{summary_json, write_summary_json};
use super::progress::ConsoleProgress;
use super::summary::{batch_header_lines, batch_timing_lines, report_lines, write_lines};

/// Validates the arguments, runs one batch and prints its report.
///
/// # Errors
///
/// Returns an error for invalid arguments (before any request is sent),
/// client construction failures, or when the report cannot be written.
pub(crate) async fn run_local(args: LoadArgs) -> AppResult<()> {
    let config = BatchConfig::new(
        &args.url,
        args.requests,
        args.concurrency,
        args.min_id,
        args.max_id,
    )
    .map_err(|err| {
        error!("{}", err);
        AppError::validation(err)
    })?;

    let client = build_client(&config)?;
    let executor = Arc::new(HttpExecutor::new(client, &config));
    let progress: Arc<dyn ProgressSink> = if args.no_progress {
        Arc::new(NoProgress)
    } else {
        Arc::new(ConsoleProgress::new(args.no_color))
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    write_lines(&mut std::io::stderr(), &batch_header_lines(&config))?;
    let report = run_batch(&config, executor, &mut rng, progress, shutdown_rx).await;

    // Release the signal task; nobody else is listening anymore.
    drop(shutdown_tx.send(()));
    signal_handle.await?;

    write_lines(&mut std::io::stderr(), &batch_timing_lines(&report))?;
    if report.interrupted {
        info!("Run interrupted; partial results follow.");
    }

    if let Some(path) = args.output.as_deref() {
        write_summary_json(Path::new(path), &report.summary)?;
        info!("Summary written to {}", path);
    }

    let mut stdout = std::io::stdout().lock();
    if args.json_output {
        write_lines(&mut stdout, &[summary_json(&report.summary)?])
    } else {
        write_lines(&mut stdout, &report_lines(&report.summary))
    }
}
