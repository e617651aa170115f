use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("No chart selected")]
    NoFileSelected,

    #[error("Unsupported chart format: {0} (allowed: png, jpg, jpeg)")]
    UnsupportedFormat(String),

    #[error("Chart too large: {name} is {size} bytes (limit {limit} bytes)")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("Could not read chart {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Backend not running")]
    Unreachable(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Backend returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// Classify a transport error: a refused or failed connection means the
    /// backend is down, everything else is a generic request failure.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ClientError::Unreachable(err)
        } else {
            ClientError::RequestFailed(err)
        }
    }

    /// True for errors raised before any request was sent.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            ClientError::NoFileSelected
                | ClientError::UnsupportedFormat(_)
                | ClientError::FileTooLarge { .. }
                | ClientError::Io { .. }
        )
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::MalformedResponse(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
