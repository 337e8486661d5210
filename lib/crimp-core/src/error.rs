//! Error types for crimp.

use derive_more::{Display, Error, From};

use crate::Format;

/// Maximum number of characters of offending text kept in an error snippet.
const SNIPPET_MAX: usize = 80;

/// Main error type for crimp operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A response body could not be parsed as the resolved format.
    #[display("malformed {format} payload near: {snippet}")]
    #[from(skip)]
    MalformedPayload {
        /// Format the parser was attempting.
        format: Format,
        /// Pointer into the offending text, truncated.
        snippet: String,
    },

    /// A quoted field in a delimited body was never closed.
    #[display("unterminated quoted field on line {line}")]
    #[from(skip)]
    UnterminatedQuotedField {
        /// One-based line number within the body.
        line: usize,
    },

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// Response body was not valid UTF-8 text.
    #[display("invalid response body: {_0}")]
    #[from(skip)]
    InvalidBody(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a malformed-payload error, truncating the offending text.
    #[must_use]
    pub fn malformed(format: Format, offending: &str) -> Self {
        Self::MalformedPayload {
            format,
            snippet: snippet_of(offending),
        }
    }

    /// Create an unterminated-quoted-field error for a one-based line number.
    #[must_use]
    pub const fn unterminated_quote(line: usize) -> Self {
        Self::UnterminatedQuotedField { line }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an invalid body error.
    #[must_use]
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the attempted format if this is a parse failure.
    #[must_use]
    pub const fn format(&self) -> Option<Format> {
        match self {
            Self::MalformedPayload { format, .. } => Some(*format),
            _ => None,
        }
    }
}

/// Truncate offending text to a bounded snippet on a character boundary.
fn snippet_of(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= SNIPPET_MAX {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(SNIPPET_MAX).collect();
        format!("{cut}…")
    }
}
