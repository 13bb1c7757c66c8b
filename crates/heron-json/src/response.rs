//! Writing JSON response bodies.
//!
//! | Function | Default `Content-Type` |
//! |----------|------------------------|
//! | [`write_json`] | `application/json; charset=utf-8` |
//! | [`write_json_with_options`] | `application/json; charset=utf-8` |
//! | [`write_json_plain`] | `application/json` |
//! | [`write_json_with`] | caller's choice, `None` leaves the header alone |
//!
//! Every writer sets the status to `200 OK`. For a response assembled in
//! memory with another status, use [`JsonResponse`].

use bytes::Bytes;
use http::{header, Extensions, HeaderValue, Response, StatusCode};
use serde::Serialize;
use tokio::io::AsyncWrite;
use tokio_util::sync::CancellationToken;

use crate::body::write_body;
use crate::codec;
use crate::error::{JsonError, JsonResult};
use crate::media_type::{JSON_CONTENT_TYPE, JSON_CONTENT_TYPE_WITH_CHARSET};
use crate::options::{resolve_options, JsonSerializerOptions};

/// Writes `value` as JSON with `application/json; charset=utf-8`.
///
/// # Example
///
/// ```rust
/// use heron_json::write_json;
/// use http::Response;
/// use tokio_util::sync::CancellationToken;
///
/// # tokio_test::block_on(async {
/// let mut response = Response::new(Vec::new());
/// write_json(&mut response, &[1, 2, 3], &CancellationToken::new()).await.unwrap();
///
/// assert_eq!(response.body(), b"[1,2,3]");
/// assert_eq!(
///     response.headers()["content-type"],
///     "application/json; charset=utf-8"
/// );
/// # });
/// ```
///
/// # Errors
///
/// See [`write_json_with`].
pub async fn write_json<T, W>(
    response: &mut Response<W>,
    value: &T,
    cancel: &CancellationToken,
) -> JsonResult<()>
where
    T: ?Sized + Serialize,
    W: AsyncWrite + Unpin,
{
    write_json_with(
        response,
        value,
        None,
        Some(JSON_CONTENT_TYPE_WITH_CHARSET),
        cancel,
    )
    .await
}

/// Writes `value` as JSON with explicit options and
/// `application/json; charset=utf-8`.
///
/// # Errors
///
/// See [`write_json_with`].
pub async fn write_json_with_options<T, W>(
    response: &mut Response<W>,
    value: &T,
    options: Option<&JsonSerializerOptions>,
    cancel: &CancellationToken,
) -> JsonResult<()>
where
    T: ?Sized + Serialize,
    W: AsyncWrite + Unpin,
{
    write_json_with(
        response,
        value,
        options,
        Some(JSON_CONTENT_TYPE_WITH_CHARSET),
        cancel,
    )
    .await
}

/// Writes `value` as JSON with `application/json` and no charset parameter.
///
/// # Errors
///
/// See [`write_json_with`].
pub async fn write_json_plain<T, W>(
    response: &mut Response<W>,
    value: &T,
    cancel: &CancellationToken,
) -> JsonResult<()>
where
    T: ?Sized + Serialize,
    W: AsyncWrite + Unpin,
{
    write_json_with(response, value, None, Some(JSON_CONTENT_TYPE), cancel).await
}

/// Writes `value` as JSON to the response body.
///
/// Options are taken from `options` when given, otherwise from a
/// [`JsonOptions`](crate::JsonOptions) in the response extensions, otherwise
/// from the web defaults. When `content_type` is `Some` it replaces the
/// response's `Content-Type`; `None` leaves any existing header in place.
/// The status is always set to `200 OK` before the body is written.
///
/// # Errors
///
/// - [`JsonError::InvalidContentType`] if `content_type` is not a valid header
///   value; the response is left untouched
/// - [`JsonError::Serialize`] if the value cannot be encoded
/// - [`JsonError::Io`] if the body stream fails
/// - [`JsonError::Cancelled`] if `cancel` fires before the write completes
pub async fn write_json_with<T, W>(
    response: &mut Response<W>,
    value: &T,
    options: Option<&JsonSerializerOptions>,
    content_type: Option<&str>,
    cancel: &CancellationToken,
) -> JsonResult<()>
where
    T: ?Sized + Serialize,
    W: AsyncWrite + Unpin,
{
    let options = resolve_options(options, response.extensions());
    let content_type = content_type.map(header_value).transpose()?;

    if let Some(content_type) = content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    *response.status_mut() = StatusCode::OK;

    let payload = codec::encode(value, &options).map_err(JsonError::Serialize)?;
    tracing::trace!(len = payload.len(), "writing JSON response body");

    write_body(response.body_mut(), &payload, cancel).await
}

fn header_value(value: &str) -> JsonResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| JsonError::InvalidContentType {
        value: value.to_string(),
    })
}

/// Buffered JSON response builder.
///
/// Encodes the value up front and produces a complete
/// `http::Response<Bytes>`, for handlers that return responses rather than
/// writing to a stream.
///
/// # Example
///
/// ```rust
/// use heron_json::JsonResponse;
/// use http::{Extensions, StatusCode};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct ApiResponse {
///     is_success: bool,
/// }
///
/// let response = JsonResponse::created(ApiResponse { is_success: true })
///     .into_response(&Extensions::new())
///     .unwrap();
///
/// assert_eq!(response.status(), StatusCode::CREATED);
/// assert_eq!(&response.body()[..], br#"{"isSuccess":true}"#);
/// ```
#[derive(Debug)]
pub struct JsonResponse<T> {
    data: T,
    status: StatusCode,
    options: Option<JsonSerializerOptions>,
    content_type: Option<String>,
}

impl<T: Serialize> JsonResponse<T> {
    /// Creates a new JSON response with status 200 OK.
    #[must_use]
    pub fn new(data: T) -> Self {
        Self {
            data,
            status: StatusCode::OK,
            options: None,
            content_type: None,
        }
    }

    /// Creates a JSON response with status 201 Created.
    #[must_use]
    pub fn created(data: T) -> Self {
        Self::new(data).with_status(StatusCode::CREATED)
    }

    /// Sets a custom status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Uses explicit serializer options instead of the resolved ones.
    #[must_use]
    pub fn with_options(mut self, options: JsonSerializerOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Overrides the `Content-Type` header.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns a reference to the data.
    #[must_use]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Builds the HTTP response.
    ///
    /// `extensions` is where request-scoped [`JsonOptions`](crate::JsonOptions)
    /// are looked up, usually the extensions of the request being answered.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError::InvalidContentType`] for an invalid content type
    /// override and [`JsonError::Serialize`] if the value cannot be encoded.
    pub fn into_response(self, extensions: &Extensions) -> JsonResult<Response<Bytes>> {
        let options = resolve_options(self.options.as_ref(), extensions);
        let content_type = header_value(
            self.content_type
                .as_deref()
                .unwrap_or(JSON_CONTENT_TYPE_WITH_CHARSET),
        )?;
        let body = codec::encode(&self.data, &options).map_err(JsonError::Serialize)?;

        let mut response = Response::new(Bytes::from(body));
        *response.status_mut() = self.status;
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);

        Ok(response)
    }
}
