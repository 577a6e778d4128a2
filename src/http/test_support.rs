use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::{JoinHandle, JoinSet};

use crate::error::{AppError, AppResult};

const MAX_REQUEST_HEAD: usize = 8 * 1024;
const HANG_DURATION: Duration = Duration::from_secs(300);

/// How the mock server answers one request.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Status(u16, String),
    /// `302 Found` pointing at the given location.
    Redirect(String),
    Hang,
}

type ReplyFn = dyn Fn(Option<i64>) -> Reply + Send + Sync;

/// Minimal HTTP/1.1 server answering `GET /user?id=..` per id.
pub(crate) struct MockServer {
    base_url: String,
    requests: Arc<AtomicUsize>,
    ids: Arc<Mutex<Vec<i64>>>,
    task: JoinHandle<()>,
}

impl MockServer {
    pub(crate) async fn spawn<F>(reply: F) -> AppResult<Self>
    where
        F: Fn(Option<i64>) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let requests = Arc::new(AtomicUsize::new(0));
        let ids = Arc::new(Mutex::new(Vec::new()));
        let reply: Arc<ReplyFn> = Arc::new(reply);

        let task = {
            let requests = Arc::clone(&requests);
            let ids = Arc::clone(&ids);
            tokio::spawn(async move {
                let mut connections = JoinSet::new();
                while let Ok((stream, _)) = listener.accept().await {
                    connections.spawn(handle_connection(
                        stream,
                        Arc::clone(&reply),
                        Arc::clone(&requests),
                        Arc::clone(&ids),
                    ));
                }
            })
        };

        Ok(Self {
            base_url: format!("http://{}", addr),
            requests,
            ids,
            task,
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub(crate) fn observed_ids(&self) -> AppResult<Vec<i64>> {
        self.ids
            .lock()
            .map(|ids| ids.clone())
            .map_err(|_err| AppError::validation("Mock server id log poisoned"))
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Returns a local URL that refuses connections.
pub(crate) async fn refused_url() -> AppResult<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

async fn handle_connection(
    mut stream: TcpStream,
    reply: Arc<ReplyFn>,
    requests: Arc<AtomicUsize>,
    ids: Arc<Mutex<Vec<i64>>>,
) {
    let Some(head) = read_request_head(&mut stream).await else {
        return;
    };
    requests.fetch_add(1, Ordering::SeqCst);

    let id = request_id(&head);
    if let (Some(id), Ok(mut log)) = (id, ids.lock()) {
        log.push(id);
    }

    let response = match reply(id) {
        Reply::Status(code, body) => format!(
            "HTTP/1.1 {} Mock\r\nContent-Length: {}\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\n{}",
            code,
            body.len(),
            body
        ),
        Reply::Redirect(location) => format!(
            "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            location
        ),
        Reply::Hang => {
            tokio::time::sleep(HANG_DURATION).await;
            return;
        }
    };
    if stream.write_all(response.as_bytes()).await.is_err() {
        return;
    }
    drop(stream.flush().await);
    drop(stream.shutdown().await);
}

async fn read_request_head(stream: &mut TcpStream) -> Option<String> {
    let mut head = Vec::new();
    let mut buffer = [0_u8; 1024];
    while !head.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut buffer).await.ok()?;
        if read == 0 || head.len() > MAX_REQUEST_HEAD {
            return None;
        }
        head.extend_from_slice(buffer.get(..read)?);
    }
    Some(String::from_utf8_lossy(&head).into_owned())
}

fn request_id(head: &str) -> Option<i64> {
    let target = head.lines().next()?.split_whitespace().nth(1)?;
    let url = url::Url::parse(&format!("http://mock{}", target)).ok()?;
    if url.path() != "/user" {
        return None;
    }
    url.query_pairs()
        .find(|(key, _)| key == "id")
        .and_then(|(_, value)| value.parse().ok())
}
