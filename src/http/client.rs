use reqwest::Client;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::HttpError;

use super::batch::BatchConfig;

/// Builds the connection pool shared by every request of a batch.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialized.
pub fn build_client(config: &BatchConfig) -> Result<Client, HttpError> {
    Client::builder()
        .timeout(config.request_timeout())
        .pool_max_idle_per_host(config.concurrency())
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| HttpError::BuildClientFailed { source: err })
}
