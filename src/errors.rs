use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures of the release/install pipeline and of supervised processes.
///
/// Every variant names the stage that failed; no stage recovers on its own.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport, DNS or HTTP-level failure while talking to a server.
    #[error("network error: {0}")]
    Network(String),
    /// The API answered but the expected data was absent.
    #[error("release not found: {0}")]
    NotFound(String),
    #[error("asset '{expected}' not found in release {tag}")]
    AssetNotFound { tag: String, expected: String },
    #[error("download failed: {0}")]
    Download(String),
    #[error("extraction failed: {0}")]
    Extract(String),
    #[error("invalid archive contents: {0}")]
    Validation(String),
    /// Non-zero exit of a child process, only raised in strict mode.
    #[error("process exited with code {exit_code}")]
    Process { exit_code: i32 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn network(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}
