pub(crate) const DEFAULT_USER_AGENT: &str = concat!("userload/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_URL: &str = "http://localhost:8080";
pub(crate) const DEFAULT_REQUESTS: u64 = 200;
pub(crate) const DEFAULT_CONCURRENCY: usize = 100;
pub(crate) const DEFAULT_MIN_ID: i64 = 1;
pub(crate) const DEFAULT_MAX_ID: i64 = 10_000;
