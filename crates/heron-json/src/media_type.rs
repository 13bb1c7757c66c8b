//! Content-Type classification.
//!
//! Decides whether a declared content type should be read as JSON. Only an
//! exact `application/json` essence or a `+json` structured syntax suffix
//! qualifies; `text/json` is rejected.

use std::borrow::Cow;

use http::{header, Request};

/// JSON media type without parameters.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// JSON media type with an explicit UTF-8 charset parameter.
pub const JSON_CONTENT_TYPE_WITH_CHARSET: &str = "application/json; charset=utf-8";

/// A parsed `Content-Type` value.
///
/// # Example
///
/// ```rust
/// use heron_json::MediaType;
///
/// let mt = MediaType::parse("application/vnd.api+json; charset=utf-8").unwrap();
/// assert_eq!(mt.essence(), "application/vnd.api+json");
/// assert_eq!(mt.suffix(), Some("json"));
/// assert_eq!(mt.charset(), Some("utf-8"));
/// assert!(mt.is_json());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    essence: String,
    suffix: Option<String>,
    charset: Option<String>,
}

impl MediaType {
    /// Parses a media type expression, returning `None` if it is invalid.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let mime: mime::Mime = value.trim().parse().ok()?;
        let essence = mime.essence_str().to_ascii_lowercase();

        // Suffix is whatever follows the last '+' of the subtype.
        let suffix = essence
            .split_once('/')
            .and_then(|(_, subtype)| subtype.rsplit_once('+'))
            .map(|(_, suffix)| suffix.to_string());

        let charset = mime
            .get_param(mime::CHARSET)
            .map(|name| name.as_str().to_string());

        Some(Self {
            essence,
            suffix,
            charset,
        })
    }

    /// Returns the lowercased `type/subtype` without parameters.
    #[must_use]
    pub fn essence(&self) -> &str {
        &self.essence
    }

    /// Returns the structured syntax suffix (text after the last `+`).
    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Returns the `charset` parameter if present.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    /// Checks if this media type is JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.essence.eq_ignore_ascii_case(JSON_CONTENT_TYPE)
            || self
                .suffix
                .as_deref()
                .is_some_and(|suffix| suffix.eq_ignore_ascii_case("json"))
    }
}

/// Checks whether a declared content type is a known JSON content type.
///
/// # Example
///
/// ```rust
/// use heron_json::is_json_content_type;
///
/// assert!(is_json_content_type(Some("application/json; charset=utf-8")));
/// assert!(is_json_content_type(Some("application/ld+json")));
/// assert!(!is_json_content_type(Some("text/json")));
/// assert!(!is_json_content_type(None));
/// ```
#[must_use]
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(MediaType::parse)
        .is_some_and(|mt| mt.is_json())
}

/// Returns the request's `Content-Type` header as a string.
///
/// Values that are not visible ASCII are treated as absent.
pub(crate) fn content_type<B>(request: &Request<B>) -> Option<&str> {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
}

/// Returns the request's `Content-Type` header for display, replacing bytes
/// that are not UTF-8.
pub(crate) fn content_type_lossy<B>(request: &Request<B>) -> Option<Cow<'_, str>> {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
}

/// Checks whether the request declares a JSON content type.
///
/// # Example
///
/// ```rust
/// use heron_json::has_json_content_type;
/// use http::Request;
///
/// let request = Request::builder()
///     .header("content-type", "application/json")
///     .body(())
///     .unwrap();
///
/// assert!(has_json_content_type(&request));
/// ```
#[must_use]
pub fn has_json_content_type<B>(request: &Request<B>) -> bool {
    is_json_content_type(content_type(request))
}
