//! Error types for Evolution API operations.

use thiserror::Error;

/// Errors that can occur during Evolution API operations.
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Configuration is missing or blank.
    #[error("Evolution configuration required: {0}")]
    ConfigMissing(String),

    /// A required argument was blank. Raised before any request is sent.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// The API rejected the credentials (401 or 403).
    #[error("Evolution authentication error: {message}")]
    Authentication { status: u16, message: String },

    /// The endpoint or instance does not exist (404).
    #[error("Evolution resource not found: {message}")]
    NotFound { status: u16, message: String },

    /// API request failed with any other non-success status.
    #[error("Evolution API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// A success response body could not be decoded into the expected type.
    ///
    /// This is the data-format case of a generic API error: `status` is the
    /// 2xx status the body arrived with and is reported by
    /// [`EvolutionError::status_code`].
    #[error("Failed to parse response ({status}): {source}. Response body: {body}")]
    ParseError {
        status: u16,
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// Request payload could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Reading an attachment from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EvolutionError {
    /// HTTP status code carried by the error, if it came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::NotFound { status, .. }
            | Self::ParseError { status, .. } => Some(*status),
            Self::ApiError { status_code, .. } => *status_code,
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true for 404 responses.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for 401 and 403 responses.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    pub(crate) fn blank_argument(name: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            reason: "must not be empty".to_string(),
        }
    }
}

/// Result type alias for Evolution operations.
pub type Result<T> = core::result::Result<T, EvolutionError>;
