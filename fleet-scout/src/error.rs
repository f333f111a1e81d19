//! Error types for fleet-scout.

/// Failures of individual discovery, inventory or benchmark operations.
///
/// These are contained at the smallest scope (one host, one model, one run)
/// and folded into outcomes by the stages; none of them aborts sibling work.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Membership tool unavailable: {0}")]
    ToolUnavailable(String),

    #[error("Host unreachable: {0}")]
    Unreachable(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Classify a reqwest failure into the taxonomy.
    pub fn from_http(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout(e.to_string())
        } else if e.is_decode() || e.is_body() {
            Error::MalformedResponse(e.to_string())
        } else {
            Error::Unreachable(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Conditions that end a run with a non-zero exit code.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    #[error("No active Ollama hosts found on the mesh")]
    NoHosts,

    #[error("Hosts found, but no models detected")]
    NoModels,

    #[error(transparent)]
    Other(#[from] Error),
}

impl ScoutError {
    pub fn exit_code(&self) -> u8 {
        1
    }
}
