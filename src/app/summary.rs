use std::io::Write;

use crate::error::{AppError, AppResult, SinkError};
use crate::http::BatchConfig;
use crate::metrics::{BatchReport, Summary};

const RULE_WIDTH: usize = 80;
const REPORT_WIDTH: usize = 60;

pub(crate) fn batch_header_lines(config: &BatchConfig) -> Vec<String> {
    vec![
        format!(
            "Sending {} requests (concurrency: {})...",
            config.num_requests(),
            config.concurrency()
        ),
        format!("Target URL: {}", config.target_pattern()),
        "-".repeat(RULE_WIDTH),
    ]
}

pub(crate) fn batch_timing_lines(report: &BatchReport) -> Vec<String> {
    let mut lines = vec![
        "-".repeat(RULE_WIDTH),
        format!(
            "All requests finished in {:.2}s",
            report.elapsed.as_secs_f64()
        ),
        format!("QPS (requests per second): {:.2}", report.throughput),
    ];
    if report.interrupted {
        lines.push(format!(
            "Interrupted: reporting {} completed requests.",
            report.summary.total_requests
        ));
    }
    lines
}

pub(crate) fn report_lines(summary: &Summary) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "=".repeat(REPORT_WIDTH),
        "Request statistics".to_owned(),
        "=".repeat(REPORT_WIDTH),
        format!("Total requests:     {}", summary.total_requests),
        format!("Successful:         {}", summary.successful_requests),
        format!("Failed:             {}", summary.failed_requests),
        format!("Success rate:       {:.2}%", summary.success_rate),
        format!("Avg response time:  {:.2}ms", summary.avg_response_time_ms),
        format!("Min response time:  {:.2}ms", summary.min_response_time_ms),
        format!("Max response time:  {:.2}ms", summary.max_response_time_ms),
    ];

    if !summary.errors.is_empty() {
        lines.push(String::new());
        lines.push(format!("Errors (first {}):", summary.errors.len()));
        lines.extend(
            summary
                .errors
                .iter()
                .enumerate()
                .map(|(index, error)| format!("  {}. {}", index.saturating_add(1), error)),
        );
    }

    lines.push("=".repeat(REPORT_WIDTH));
    lines
}

pub(crate) fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> AppResult<()> {
    for line in lines {
        writeln!(out, "{}", line)
            .map_err(|err| AppError::sink(SinkError::WriteReport { source: err }))?;
    }
    out.flush()
        .map_err(|err| AppError::sink(SinkError::WriteReport { source: err }))
}
