use thiserror::Error;

pub type Result<T> = std::result::Result<T, RankerError>;

#[derive(Debug, Error)]
pub enum RankerError {
    /// The candidate table lacks one or more required columns. Carries
    /// every missing column name, not just the first.
    #[error("candidate table is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("candidate table row {line}: required field '{field}' is empty")]
    InvalidRow { line: u64, field: &'static str },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Transport-level failure talking to the remote scoring service
    /// (connection error or non-2xx status).
    #[error("remote service error: {0}")]
    Http(String),

    #[error("remote call timed out after {0}s")]
    Timeout(u64),

    /// The remote service answered 2xx but the body did not follow the
    /// expected response grammar. Kept distinct from `Http` so tests can
    /// tell a bad response apart from a dead network.
    #[error("malformed remote response: {0}")]
    MalformedResponse(String),

    #[error("configuration error: {0}")]
    Config(String),
}
