//! # Heron JSON
//!
//! JSON request body reading and response body writing over the `http` crate
//! types.
//!
//! ## Operations
//!
//! | Operation | Description |
//! |-----------|-------------|
//! | [`has_json_content_type`] | Does the request declare a JSON content type? |
//! | [`resolve_options`] | Pick explicit, request-scoped or default options |
//! | [`read_json`] / [`read_json_with`] | Decode the request body |
//! | [`write_json`] and friends | Encode a value into the response body |
//! | [`JsonResponse`] | Build a complete buffered JSON response |
//!
//! ## Example
//!
//! ```rust
//! use heron_json::{read_json, write_json, JsonOptions, JsonSerializerOptions};
//! use bytes::Bytes;
//! use http::{Request, Response};
//! use http_body_util::Full;
//! use serde::{Deserialize, Serialize};
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Deserialize, Serialize)]
//! struct Greeting {
//!     target_name: String,
//! }
//!
//! # tokio_test::block_on(async {
//! let cancel = CancellationToken::new();
//!
//! let mut request = Request::builder()
//!     .header("content-type", "application/json")
//!     .body(Full::new(Bytes::from_static(br#"{"targetName":"world"}"#)))
//!     .unwrap();
//! let greeting: Greeting = read_json(&mut request, &cancel).await.unwrap();
//!
//! let mut response = Response::new(Vec::new());
//! response.extensions_mut().insert(JsonOptions::new(
//!     JsonSerializerOptions::web().with_write_indented(true),
//! ));
//! write_json(&mut response, &greeting, &cancel).await.unwrap();
//!
//! assert_eq!(response.body(), b"{\n  \"targetName\": \"world\"\n}");
//! # });
//! ```
//!
//! ## Options
//!
//! Behavior is governed by [`JsonSerializerOptions`]. Each call resolves them
//! in order: explicit options, then a [`JsonOptions`] in the request or
//! response extensions, then [`DEFAULT_SERIALIZER_OPTIONS`] (camelCase
//! property names, case-insensitive matching, relaxed escaping).
//!
//! ## Error Handling
//!
//! Every failure is a [`JsonError`]. It carries an HTTP status code and a
//! stable error code, and distinguishes cancellation from malformed input.

#![doc(html_root_url = "https://docs.rs/heron-json/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod codec;
mod error;
mod media_type;
mod naming;
mod options;
mod request;
mod response;

pub use codec::{decode, encode};
pub use error::{BoxError, JsonError, JsonResult};
pub use media_type::{
    has_json_content_type, is_json_content_type, MediaType, JSON_CONTENT_TYPE,
    JSON_CONTENT_TYPE_WITH_CHARSET,
};
pub use naming::NamingPolicy;
pub use options::{
    resolve_options, resolve_options_with, Escaping, JsonOptions, JsonSerializerOptions,
    DEFAULT_SERIALIZER_OPTIONS,
};
pub use request::{read_json, read_json_with};
pub use response::{
    write_json, write_json_plain, write_json_with, write_json_with_options, JsonResponse,
};
