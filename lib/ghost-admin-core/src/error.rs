//! Error types for ghost-admin.
//!
//! Every failure is returned to the immediate caller. The variants group into
//! the broad kinds callers usually branch on:
//!
//! | Kind | Variants |
//! |------|----------|
//! | configuration | [`Error::Config`] |
//! | caller contract | [`Error::InvalidArgument`] |
//! | serialization | [`Error::JsonSerialization`] |
//! | transport | [`Error::InvalidRequest`], [`Error::Connection`], [`Error::Tls`], [`Error::Timeout`] |
//! | API | [`Error::Api`] |
//! | decoding | [`Error::JsonDeserialization`], [`Error::Sink`] |
//! | context | [`Error::Cancelled`], [`Error::DeadlineExceeded`] |

use derive_more::{Display, Error, From};

/// Main error type for ghost-admin operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Malformed base address or inconsistent client setup.
    #[display("configuration error: {_0}")]
    #[from(skip)]
    Config(#[error(not(source))] String),

    /// A required argument was missing or unusable.
    #[display("invalid argument: {_0}")]
    #[from(skip)]
    InvalidArgument(#[error(not(source))] String),

    /// The request body could not be encoded as JSON.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// The outbound request could not be constructed.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// The executor gave up waiting for the server.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The API answered with a status outside `200..300`.
    #[display("received non-2xx status {status} from API")]
    #[from(skip)]
    Api {
        /// HTTP status code.
        status: u16,
    },

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "posts.0.title").
        path: String,
        /// Error message.
        message: String,
    },

    /// The raw byte sink refused the response body.
    #[display("failed to write response body: {_0}")]
    #[from]
    Sink(std::io::Error),

    /// The request context was cancelled.
    #[display("context canceled")]
    #[from(skip)]
    Cancelled,

    /// The request context deadline passed.
    #[display("context deadline exceeded")]
    #[from(skip)]
    DeadlineExceeded,
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
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

    /// Create an API error for a non-2xx status.
    #[must_use]
    pub const fn api(status: u16) -> Self {
        Self::Api { status }
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for configuration errors.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` for invalid argument errors.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns `true` if the request body could not be serialized.
    #[must_use]
    pub const fn is_serialization(&self) -> bool {
        matches!(self, Self::JsonSerialization(_))
    }

    /// Returns `true` if the request could not be built or the round trip failed.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_) | Self::Connection(_) | Self::Tls(_) | Self::Timeout
        )
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

    /// Returns `true` if the API answered outside the success range.
    #[must_use]
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Returns `true` if a successful response could not be decoded or written out.
    #[must_use]
    pub const fn is_decoding(&self) -> bool {
        matches!(self, Self::JsonDeserialization { .. } | Self::Sink(_))
    }

    /// Returns `true` if the request context was cancelled or expired.
    #[must_use]
    pub const fn is_context(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }

    /// Returns the HTTP status code if this is an API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            Error::api(404).to_string(),
            "received non-2xx status 404 from API"
        );
        assert_eq!(Error::Cancelled.to_string(), "context canceled");
        assert_eq!(
            Error::DeadlineExceeded.to_string(),
            "context deadline exceeded"
        );
        assert_eq!(
            Error::config("base url must use https").to_string(),
            "configuration error: base url must use https"
        );
        assert_eq!(
            Error::json_deserialization("posts[0].title", "invalid type").to_string(),
            "JSON deserialization error at 'posts[0].title': invalid type"
        );
    }

    #[test]
    fn error_kinds() {
        assert!(Error::config("x").is_config());
        assert!(Error::invalid_argument("x").is_invalid_argument());
        assert!(Error::invalid_request("x").is_transport());
        assert!(Error::connection("x").is_transport());
        assert!(Error::tls("x").is_transport());
        assert!(Error::Timeout.is_transport());
        assert!(Error::api(500).is_api());
        assert!(Error::json_deserialization("", "x").is_decoding());
        assert!(Error::Cancelled.is_context());
        assert!(Error::DeadlineExceeded.is_context());

        assert!(!Error::Cancelled.is_transport());
        assert!(!Error::api(500).is_transport());
        assert!(!Error::Timeout.is_context());
    }

    #[test]
    fn error_status() {
        let err = Error::api(404);
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());

        assert!(!Error::api(500).is_not_found());
        assert_eq!(Error::Timeout.status(), None);
    }

    #[test]
    fn io_error_converts_to_sink() {
        let err: Error = std::io::Error::other("disk full").into();
        assert!(matches!(err, Error::Sink(_)));
        assert!(err.is_decoding());
    }
}
