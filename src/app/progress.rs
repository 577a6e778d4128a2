use std::io::Write;

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::http::ProgressSink;
use crate::metrics::OutcomeRecord;

/// Characters of a non-200 body shown on a progress line.
const PROGRESS_BODY_PREVIEW_CHARS: usize = 50;

/// Writes one line per completed request to stderr.
pub(crate) struct ConsoleProgress {
    no_color: bool,
}

impl ConsoleProgress {
    pub(crate) const fn new(no_color: bool) -> Self {
        Self { no_color }
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_outcome(&self, outcome: &OutcomeRecord) {
        let line = progress_line(outcome);
        let color = if outcome.succeeded() {
            Color::Green
        } else {
            Color::Red
        };
        if let Err(err) = write_progress_line(&line, color, self.no_color) {
            tracing::debug!("Failed to write progress line: {}", err);
        }
    }
}

fn write_progress_line(line: &str, color: Color, no_color: bool) -> Result<(), std::io::Error> {
    let mut out = std::io::stderr().lock();
    if no_color {
        queue!(out, Print(line), Print("\n"))?;
    } else {
        queue!(
            out,
            SetForegroundColor(color),
            Print(line),
            ResetColor,
            Print("\n")
        )?;
    }
    out.flush()
}

#[expect(
    clippy::float_arithmetic,
    reason = "Latency is shown in fractional milliseconds."
)]
pub(crate) fn progress_line(outcome: &OutcomeRecord) -> String {
    let time_ms = outcome.latency_seconds() * 1000.0;
    match (outcome.succeeded(), outcome.status_code()) {
        (true, Some(status)) => format!(
            "✓ ID:{} Status:{} Time:{:.2}ms",
            outcome.target_id(),
            status,
            time_ms
        ),
        (_, Some(status)) => format!(
            "✗ ID:{} Status:{} Time:{:.2}ms Error:{}",
            outcome.target_id(),
            status,
            time_ms,
            failure_detail(status, outcome.error_message().unwrap_or_default())
        ),
        (_, None) => format!(
            "✗ ID:{} {}",
            outcome.target_id(),
            outcome.error_message().unwrap_or_default()
        ),
    }
}

/// Body preview for `HTTP {status}: ..` messages, the full message otherwise.
fn failure_detail(status: u16, message: &str) -> String {
    let prefix = format!("HTTP {}: ", status);
    message.strip_prefix(prefix.as_str()).map_or_else(
        || message.to_owned(),
        |body| body.chars().take(PROGRESS_BODY_PREVIEW_CHARS).collect(),
    )
}
