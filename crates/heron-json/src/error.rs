//! JSON read/write error types.
//!
//! Every failure of [`read_json`](crate::read_json) and
//! [`write_json`](crate::write_json) is reported as a [`JsonError`]. Parse and
//! encode failures from `serde_json` are carried verbatim so callers can still
//! inspect [`serde_json::Error::classify`].

use http::StatusCode;
use serde_json::error::Category;
use thiserror::Error;

/// Boxed error produced by a request body stream.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias using [`JsonError`].
pub type JsonResult<T> = Result<T, JsonError>;

/// Error returned by the JSON body helpers.
///
/// # Example
///
/// ```rust
/// use heron_json::JsonError;
/// use http::StatusCode;
///
/// let err = JsonError::unsupported_content_type(Some("text/json"));
/// assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
/// assert!(err.to_string().contains("'text/json'"));
/// ```
#[derive(Error, Debug)]
pub enum JsonError {
    /// The request declares a content type that is not JSON.
    #[error(
        "Unable to read the request as JSON because the request content type '{content_type}' is not a known JSON content type."
    )]
    UnsupportedContentType {
        /// The declared content type, empty when the header is absent.
        content_type: String,
    },

    /// The request payload could not be parsed into the target type.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The response value could not be encoded.
    #[error("failed to serialize response body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The request body stream failed.
    #[error("failed to read request body: {0}")]
    Body(#[source] BoxError),

    /// The response body stream failed.
    #[error("failed to write response body: {0}")]
    Io(#[from] std::io::Error),

    /// A content type override is not a valid header value.
    #[error("invalid content type '{value}'")]
    InvalidContentType {
        /// The rejected value.
        value: String,
    },

    /// The operation was cancelled before it completed.
    #[error("the operation was cancelled")]
    Cancelled,
}

impl JsonError {
    /// Creates an unsupported content type error for the declared value.
    #[must_use]
    pub fn unsupported_content_type(content_type: Option<&str>) -> Self {
        Self::UnsupportedContentType {
            content_type: content_type.unwrap_or_default().to_string(),
        }
    }

    /// Creates a body stream error.
    pub fn body(source: impl Into<BoxError>) -> Self {
        Self::Body(source.into())
    }

    /// Returns `true` if the operation was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if the payload was not valid JSON for the target type.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        match self {
            Self::Json(e) => matches!(
                e.classify(),
                Category::Syntax | Category::Eof | Category::Data
            ),
            _ => false,
        }
    }

    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedContentType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Json(e) if e.is_io() => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Json(_) | Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::Serialize(_) | Self::Io(_) | Self::InvalidContentType { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Cancelled => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Returns the error code suitable for error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedContentType { .. } => "UNSUPPORTED_MEDIA_TYPE",
            Self::Json(_) => "MALFORMED_JSON",
            Self::Serialize(_) => "SERIALIZATION_ERROR",
            Self::Body(_) => "BODY_READ_ERROR",
            Self::Io(_) => "BODY_WRITE_ERROR",
            Self::InvalidContentType { .. } => "INVALID_CONTENT_TYPE",
            Self::Cancelled => "CANCELLED",
        }
    }
}
