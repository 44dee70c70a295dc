use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("session error: {0}")]
    Session(String),

    #[error("failed to encode request: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("failed to decode response: {0}")]
    Decoding(#[source] serde_json::Error),

    /// The remote reported something other than `success`, or the response
    /// broke an operation invariant. Carries the literal reason.
    #[error("transmission: result: {0}")]
    Operation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether issuing the same operation again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Session(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
