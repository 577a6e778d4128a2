use thiserror::Error;

/// Configuration problems detected before any request is issued.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Request count must be greater than 0.")]
    RequestsNotPositive,
    #[error("Concurrency must be greater than 0.")]
    ConcurrencyNotPositive,
    #[error("Minimum id ({min_id}) must be less than maximum id ({max_id}).")]
    InvalidIdRange { min_id: i64, max_id: i64 },
    #[error("Invalid base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Base URL '{url}' cannot carry a path.")]
    UrlCannotBeBase { url: String },
    #[error("Unsupported URL scheme '{scheme}'. Use http or https.")]
    UnsupportedScheme { scheme: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
