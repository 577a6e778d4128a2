use serde::Deserialize;

/// File-based counterpart of the CLI flags; every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    #[serde(alias = "num_requests")]
    pub requests: Option<u64>,
    pub concurrency: Option<usize>,
    pub min_id: Option<i64>,
    pub max_id: Option<i64>,
    pub json_output: Option<bool>,
    pub output: Option<String>,
    pub seed: Option<u64>,
    pub no_progress: Option<bool>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}
