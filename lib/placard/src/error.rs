//! Error types for placard.

use derive_more::{Display, Error, From};

/// Classification of a fetch failure.
///
/// Every terminal failure of a fetch falls into exactly one of these
/// categories; none are retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport-level failure; no response was obtained.
    Network,
    /// A response was obtained with a non-2xx status code.
    Status,
    /// The response body was malformed or incomplete JSON.
    Decode,
}

/// Main error type for fetch operations.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum FetchError {
    /// Non-2xx response status. The body is discarded without being parsed.
    #[display("status {status}")]
    #[from(skip)]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Network/connection errors (DNS, connection refused, broken transfer).
    #[display("network error: {_0}")]
    #[from(skip)]
    Network(#[error(not(source))] String),

    /// Request deadline expired before a response arrived.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// JSON decode error with path context.
    #[display("decode error at '{path}': {message}")]
    #[from(skip)]
    Decode {
        /// JSON path to the failing field (e.g. "title"; "." for syntax errors).
        path: String,
        /// Error message.
        message: String,
    },

    /// Endpoint URL parsing error.
    #[display("invalid endpoint: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// Invalid request construction; no transport was attempted.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),
}

/// Result type alias using [`FetchError`].
pub type Result<T> = std::result::Result<T, FetchError>;

impl FetchError {
    /// Create a status error from a non-2xx status code.
    #[must_use]
    pub const fn status(status: u16) -> Self {
        Self::Status { status }
    }

    /// Create a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a decode error with path context.
    #[must_use]
    pub fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Classify this error.
    ///
    /// Timeouts count as [`ErrorKind::Network`]: the deadline expired without
    /// a response being obtained. Configuration and request-construction
    /// errors carry no class; they are not fetch outcomes.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Status { .. } => Some(ErrorKind::Status),
            Self::Network(_) | Self::Timeout => Some(ErrorKind::Network),
            Self::Decode { .. } => Some(ErrorKind::Decode),
            Self::InvalidUrl(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// Returns the HTTP status code if this is a status error.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
