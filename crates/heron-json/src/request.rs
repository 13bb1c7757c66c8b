//! Reading JSON request bodies.

use http::Request;
use http_body::Body;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::body::collect_body;
use crate::codec;
use crate::error::{BoxError, JsonError, JsonResult};
use crate::media_type::{self, is_json_content_type};
use crate::options::{resolve_options, JsonSerializerOptions};

/// Reads the request body as JSON using the resolved options.
///
/// Equivalent to [`read_json_with`] without explicit options.
///
/// # Example
///
/// ```rust
/// use heron_json::read_json;
/// use http::Request;
/// use http_body_util::Full;
/// use bytes::Bytes;
/// use serde::Deserialize;
/// use tokio_util::sync::CancellationToken;
///
/// #[derive(Deserialize)]
/// struct CreateUser {
///     user_name: String,
/// }
///
/// # tokio_test::block_on(async {
/// let mut request = Request::builder()
///     .header("content-type", "application/json")
///     .body(Full::new(Bytes::from_static(br#"{"userName":"ada"}"#)))
///     .unwrap();
///
/// let user: CreateUser = read_json(&mut request, &CancellationToken::new()).await.unwrap();
/// assert_eq!(user.user_name, "ada");
/// # });
/// ```
///
/// # Errors
///
/// See [`read_json_with`].
pub async fn read_json<T, B>(request: &mut Request<B>, cancel: &CancellationToken) -> JsonResult<T>
where
    T: DeserializeOwned,
    B: Body + Unpin,
    B::Error: Into<BoxError>,
{
    read_json_with(request, None, cancel).await
}

/// Reads the request body as JSON.
///
/// The content type is checked before anything else: a request that does not
/// declare a JSON content type fails without its body being read. Options are
/// taken from `options` when given, otherwise from a [`JsonOptions`] in the
/// request extensions, otherwise from the web defaults.
///
/// [`JsonOptions`]: crate::JsonOptions
///
/// # Errors
///
/// - [`JsonError::UnsupportedContentType`] if the content type is missing or
///   not JSON
/// - [`JsonError::Body`] if the body stream fails
/// - [`JsonError::Json`] if the body is empty, malformed, or does not match `T`
/// - [`JsonError::Cancelled`] if `cancel` fires before the read completes
pub async fn read_json_with<T, B>(
    request: &mut Request<B>,
    options: Option<&JsonSerializerOptions>,
    cancel: &CancellationToken,
) -> JsonResult<T>
where
    T: DeserializeOwned,
    B: Body + Unpin,
    B::Error: Into<BoxError>,
{
    if !is_json_content_type(media_type::content_type(request)) {
        let declared = media_type::content_type_lossy(request);
        tracing::debug!(
            content_type = declared.as_deref().unwrap_or_default(),
            "rejecting request body with non-JSON content type"
        );
        return Err(JsonError::unsupported_content_type(declared.as_deref()));
    }

    let options = resolve_options(options, request.extensions());
    let bytes = collect_body(request.body_mut(), cancel).await?;

    tracing::trace!(len = bytes.len(), "decoding JSON request body");

    codec::decode(&bytes, &options).map_err(|err| {
        tracing::debug!(error = %err, "failed to decode JSON request body");
        JsonError::Json(err)
    })
}
