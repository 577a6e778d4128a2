use std::time::Duration;

use url::Url;

use crate::args::{PositiveU64, PositiveUsize};
use crate::error::ValidationError;

use super::workload::TargetIdRange;

/// Total timeout applied to every request, connect through body read.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Path segment appended to the base URL for every request.
const USER_PATH_SEGMENT: &str = "user";
/// Query parameter carrying the target id.
const ID_QUERY_PARAM: &str = "id";

/// Validated parameters for one batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    endpoint: Url,
    num_requests: PositiveU64,
    concurrency: PositiveUsize,
    id_range: TargetIdRange,
    request_timeout: Duration,
}

impl BatchConfig {
    /// Validates every batch precondition before any work exists.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when a count is zero, the id range is
    /// empty, or the base URL is not an absolute http(s) URL.
    pub fn new(
        base_url: &str,
        num_requests: u64,
        concurrency: usize,
        min_id: i64,
        max_id: i64,
    ) -> Result<Self, ValidationError> {
        let num_requests = PositiveU64::try_from(num_requests)
            .map_err(|_err| ValidationError::RequestsNotPositive)?;
        let concurrency = PositiveUsize::try_from(concurrency)
            .map_err(|_err| ValidationError::ConcurrencyNotPositive)?;
        let id_range = TargetIdRange::new(min_id, max_id)?;
        let endpoint = user_endpoint(&parse_base_url(base_url)?)?;

        Ok(Self {
            endpoint,
            num_requests,
            concurrency,
            id_range,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn num_requests(&self) -> u64 {
        self.num_requests.get()
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency.get()
    }

    #[must_use]
    pub const fn id_range(&self) -> TargetIdRange {
        self.id_range
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// `{base_url}/user?id={target_id}`
    #[must_use]
    pub fn target_url(&self, target_id: i64) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair(ID_QUERY_PARAM, &target_id.to_string());
        url
    }

    /// Human-readable target pattern, e.g. `http://host/user?id=<1-10>`.
    #[must_use]
    pub fn target_pattern(&self) -> String {
        format!(
            "{}?{}=<{}-{}>",
            self.endpoint,
            ID_QUERY_PARAM,
            self.id_range.min_id(),
            self.id_range.max_id()
        )
    }
}

fn parse_base_url(value: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(value).map_err(|err| ValidationError::InvalidUrl {
        url: value.to_owned(),
        source: err,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ValidationError::UnsupportedScheme {
            scheme: other.to_owned(),
        }),
    }
}

fn user_endpoint(base_url: &Url) -> Result<Url, ValidationError> {
    let mut endpoint = base_url.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    endpoint
        .path_segments_mut()
        .map_err(|()| ValidationError::UrlCannotBeBase {
            url: base_url.to_string(),
        })?
        .pop_if_empty()
        .push(USER_PATH_SEGMENT);
    Ok(endpoint)
}
