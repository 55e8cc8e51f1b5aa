//! Error types for Neutron operations.
//!
//! Every failure a Neutron call can produce maps onto one variant of [`Error`]:
//! bad configuration, a rejected call-time argument, a transport failure, an
//! unexpected HTTP status, or a response body that does not decode.

use thiserror::Error;

/// Main error type for Neutron operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Client configuration is missing or invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A call-time argument was rejected before any request was sent
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The server could not be reached or the exchange broke off
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The transport gave up waiting for the server
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The server answered with a status other than the expected one
    #[error("Neutron API error {status}: {body}")]
    ApiError {
        /// Numeric HTTP status code
        code: u16,
        /// HTTP status line, e.g. `500 Internal Server Error`
        status: String,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// A JSON payload could not be encoded or decoded
    #[error("Failed to parse Neutron payload: {0}")]
    ParseError(String),
}

/// Specialized result type for Neutron operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::ApiError { .. } => "API_ERROR",
            Self::ParseError(_) => "PARSE_ERROR",
        }
    }

    /// Returns true for transport-level failures where no HTTP status was received.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::HttpError(_) | Self::Timeout(_))
    }

    /// HTTP status code carried by an [`Error::ApiError`].
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_builder() {
            Self::ConfigError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::ConfigError(format!("invalid URL: {err}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}
