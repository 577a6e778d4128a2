use std::error::Error as _;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::time::Instant;
use url::Url;

use crate::metrics::OutcomeRecord;

use super::batch::BatchConfig;

/// Only this status counts as a successful request.
const SUCCESS_STATUS: u16 = 200;
/// Characters of a non-200 body kept in the error message.
pub(crate) const ERROR_BODY_PREVIEW_CHARS: usize = 100;
/// Upper bound of UTF-8 bytes needed for the preview characters.
const ERROR_BODY_PREVIEW_BYTES: usize = ERROR_BODY_PREVIEW_CHARS * 4;

/// Performs one attempt against a target id.
///
/// Implementations never fail: every outcome, including transport errors,
/// is returned as an [`OutcomeRecord`].
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, target_id: i64) -> OutcomeRecord;
}

/// Executes `GET {base_url}/user?id=..` over a shared client.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    config: BatchConfig,
}

impl HttpExecutor {
    #[must_use]
    pub fn new(client: Client, config: &BatchConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    fn target_url(&self, target_id: i64) -> Url {
        self.config.target_url(target_id)
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, target_id: i64) -> OutcomeRecord {
        let url = self.target_url(target_id);

        let start = Instant::now();
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                return OutcomeRecord::failure(target_id, None, start.elapsed(), classify(&err));
            }
        };

        let status = response.status().as_u16();
        if status == SUCCESS_STATUS {
            return match drain_response_body(response).await {
                Ok(()) => OutcomeRecord::success(target_id, status, start.elapsed()),
                Err(err) => {
                    OutcomeRecord::failure(target_id, Some(status), start.elapsed(), classify(&err))
                }
            };
        }

        // Read the body even on failure so the connection goes back to the pool.
        let (latency, message) = match read_body_preview(response).await {
            Ok(preview) => (start.elapsed(), format!("HTTP {}: {}", status, preview)),
            Err(err) => (start.elapsed(), classify(&err)),
        };
        OutcomeRecord::failure(target_id, Some(status), latency, message)
    }
}

/// Maps a reqwest error onto the network / unexpected split.
pub(crate) fn classify(err: &reqwest::Error) -> String {
    let transport = err.is_timeout()
        || err.is_connect()
        || err.is_request()
        || err.is_redirect()
        || err.is_status()
        || err.is_body()
        || err.is_decode();
    if transport {
        format!("ClientError: {}", describe(err))
    } else {
        format!("Exception: {}", describe(err))
    }
}

fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

async fn drain_response_body(response: reqwest::Response) -> Result<(), reqwest::Error> {
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        chunk?;
    }
    Ok(())
}

async fn read_body_preview(response: reqwest::Response) -> Result<String, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut kept: Vec<u8> = Vec::with_capacity(ERROR_BODY_PREVIEW_BYTES);
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        let room = ERROR_BODY_PREVIEW_BYTES.saturating_sub(kept.len());
        if room > 0 {
            let take = room.min(bytes.len());
            if let Some(head) = bytes.get(..take) {
                kept.extend_from_slice(head);
            }
        }
    }
    Ok(String::from_utf8_lossy(&kept)
        .chars()
        .take(ERROR_BODY_PREVIEW_CHARS)
        .collect())
}
