//! Error types for MCP tool invocation.
//!
//! Every failure is classified exactly once, at the layer where it happens,
//! and then travels to the caller unchanged.

use std::time::Duration;

use thiserror::Error;

/// Result type for MCP operations.
pub type Result<T> = std::result::Result<T, McpError>;

/// Coarse classification of an [`McpError`], suitable for user-facing rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Timeout or connection failure before a response arrived.
    Transport,
    /// The server answered with a non-2xx HTTP status.
    HttpStatus,
    /// The JSON-RPC response carried an `error` member.
    Protocol,
    /// Anything else, including undecodable response bodies.
    Unexpected,
}

impl ErrorKind {
    /// Short lowercase label for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::HttpStatus => "http_status",
            Self::Protocol => "protocol",
            Self::Unexpected => "unexpected",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for MCP operations.
#[derive(Debug, Error)]
pub enum McpError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The HTTP exchange failed before a response was received.
    #[error("connection error: {0}")]
    Connection(String),

    /// Server returned a non-success HTTP status.
    #[error("HTTP error {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// JSON-RPC error returned by the server.
    #[error("protocol error: {message}")]
    Protocol {
        /// Error code, when the server provided an integral one.
        code: Option<i64>,
        /// Error message from the server.
        message: String,
        /// Optional additional data.
        data: Option<serde_json::Value>,
    },

    /// The response body could not be decoded as JSON-RPC.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Client could not be constructed from its configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Any other failure.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl McpError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a protocol error from a server-provided message.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            code: None,
            message: message.into(),
            data: None,
        }
    }

    /// Create a malformed response error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an unexpected error.
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Classify this error into one of the four reportable categories.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout(_) | Self::Connection(_) => ErrorKind::Transport,
            Self::HttpStatus { .. } => ErrorKind::HttpStatus,
            Self::Protocol { .. } => ErrorKind::Protocol,
            Self::MalformedResponse(_) | Self::InvalidConfig(_) | Self::Unexpected(_) => {
                ErrorKind::Unexpected
            }
        }
    }

    /// Check if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Classify a reqwest failure.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_connect() || err.is_request() || err.is_redirect() {
            Self::Connection(err.to_string())
        } else {
            Self::Unexpected(err.to_string())
        }
    }
}

impl From<serde_json::Error> for McpError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
