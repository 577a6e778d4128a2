use clap::Parser;

use super::defaults::{
    DEFAULT_CONCURRENCY, DEFAULT_MAX_ID, DEFAULT_MIN_ID, DEFAULT_REQUESTS, DEFAULT_URL,
};
use super::parsers::parse_bool_env;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fire a fixed batch of concurrent GET requests at {url}/user?id=<random id> and report latency and success statistics."
)]
pub struct LoadArgs {
    /// Base URL of the target service
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Total number of requests to send
    #[arg(long = "requests", short = 'n', default_value_t = DEFAULT_REQUESTS)]
    pub requests: u64,

    /// Maximum number of requests in flight at once
    #[arg(long = "concurrency", short = 'c', default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Smallest user id to request (inclusive)
    #[arg(long = "min-id", default_value_t = DEFAULT_MIN_ID, allow_negative_numbers = true)]
    pub min_id: i64,

    /// Largest user id to request (inclusive)
    #[arg(long = "max-id", default_value_t = DEFAULT_MAX_ID, allow_negative_numbers = true)]
    pub max_id: i64,

    /// Print the summary as JSON instead of the text report
    #[arg(long = "json-output")]
    pub json_output: bool,

    /// Also write the JSON summary to this file
    #[arg(long = "output", short = 'o')]
    pub output: Option<String>,

    /// Seed for the id generator (random when omitted)
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Do not print a line per completed request
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by USERLOAD_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,

    /// Path to config file (TOML/JSON). Defaults to ./userload.toml or ./userload.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
