//! Error types for the suggestion crate.

use thiserror::Error;

/// Result type for suggestion operations.
pub type Result<T> = std::result::Result<T, SuggestError>;

/// Ways a suggestion request can fail.
#[derive(Error, Debug)]
pub enum SuggestError {
    /// Nothing usable to ask about: empty graph, unknown target or empty context.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Transport failure (`status` is `None`) or a non-2xx response.
    #[error("suggestion request failed: {detail}")]
    RequestFailed { status: Option<u16>, detail: String },

    /// The response had no `choices[0].message.content`.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    /// The completion was blank after trimming.
    #[error("service returned an empty suggestion")]
    EmptySuggestion,

    /// Configuration error.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SuggestError {
    /// Create an invalid input error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a request failed error for a transport failure.
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::RequestFailed {
            status: None,
            detail: detail.into(),
        }
    }

    /// Create a request failed error for an HTTP status.
    pub fn status(status: u16, detail: impl Into<String>) -> Self {
        Self::RequestFailed {
            status: Some(status),
            detail: detail.into(),
        }
    }

    /// Create a malformed response error.
    pub fn malformed_response(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Create a config error.
    pub fn config_error(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }

    /// HTTP status of a rejected request, if any.
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// True when no request was sent.
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

impl From<reqwest::Error> for SuggestError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::status(status.as_u16(), err.to_string()),
            None => Self::transport(err.to_string()),
        }
    }
}
