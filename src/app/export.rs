use std::path::Path;

use crate::error::{AppError, AppResult, SinkError};
use crate::metrics::Summary;

pub(crate) fn summary_json(summary: &Summary) -> AppResult<String> {
    serde_json::to_string_pretty(summary)
        .map_err(|err| AppError::sink(SinkError::SerializeSummary { source: err }))
}

pub(crate) fn write_summary_json(path: &Path, summary: &Summary) -> AppResult<()> {
    let mut json = summary_json(summary)?;
    json.push('\n');
    std::fs::write(path, json).map_err(|err| {
        AppError::sink(SinkError::WriteSummary {
            path: path.to_path_buf(),
            source: err,
        })
    })
}
