//! Integration tests for reading JSON request bodies.

mod common;

use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::stream;
use heron_json::{
    has_json_content_type, read_json, read_json_with, JsonError, JsonOptions,
    JsonSerializerOptions,
};
use http::{header, Request, StatusCode};
use http_body::{Body, Frame};
use http_body_util::{Full, StreamBody};
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Body that fails the test if it is ever polled.
struct UntouchedBody;

impl Body for UntouchedBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Bytes>, Infallible>>> {
        panic!("body must not be read");
    }
}

fn request_with<B>(content_type: &str, body: B) -> Request<B> {
    Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, content_type)
        .body(body)
        .unwrap()
}

fn json_request(body: &'static str) -> Request<Full<Bytes>> {
    request_with("application/json", Full::new(Bytes::from_static(body.as_bytes())))
}

#[derive(Debug, PartialEq, Deserialize)]
struct CreateUser {
    user_name: String,
    is_admin: bool,
    #[serde(default)]
    nick_names: Vec<String>,
}

#[tokio::test]
async fn reads_number_body() {
    common::init_tracing();
    let mut request = json_request("1");

    let value: i32 = read_json(&mut request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(value, 1);
}

#[tokio::test]
async fn text_json_is_rejected_without_reading_body() {
    common::init_tracing();
    let mut request = request_with("text/json", UntouchedBody);

    assert!(!has_json_content_type(&request));

    let err = read_json::<i32, _>(&mut request, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Unable to read the request as JSON because the request content type 'text/json' is not a known JSON content type."
    );
    assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn structured_suffix_is_accepted() {
    common::init_tracing();
    let mut request = request_with(
        "application/vnd.api+json; charset=utf-8",
        Full::new(Bytes::from_static(br#"{"data":null}"#)),
    );

    let value: Value = read_json(&mut request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(value, serde_json::json!({ "data": null }));
}

#[tokio::test]
async fn empty_body_is_a_json_error() {
    common::init_tracing();
    let mut request = json_request("");

    let err = read_json::<i32, _>(&mut request, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(&err, JsonError::Json(e) if e.is_eof()));
    assert!(err.is_malformed());
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_body_is_a_json_error() {
    common::init_tracing();
    let mut request = json_request(r#"{"userName": "ada""#);

    let err = read_json::<CreateUser, _>(&mut request, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_malformed());
    assert_eq!(err.error_code(), "MALFORMED_JSON");
}

#[tokio::test]
async fn default_options_match_camel_case_and_ignore_case() {
    common::init_tracing();
    let mut request = json_request(r#"{"USERNAME":"ada","isAdmin":true,"NickNames":["a"]}"#);

    let user: CreateUser = read_json(&mut request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        user,
        CreateUser {
            user_name: "ada".into(),
            is_admin: true,
            nick_names: vec!["a".into()],
        }
    );
}

#[tokio::test]
async fn trailing_commas_follow_explicit_options() {
    common::init_tracing();
    let lenient = JsonSerializerOptions::default().with_trailing_commas(true);

    let mut request = json_request("[1,2,]");
    let value: Vec<i32> = read_json_with(&mut request, Some(&lenient), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(value, vec![1, 2]);

    let mut request = json_request("[1,2,]");
    let err = read_json::<Vec<i32>, _>(&mut request, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.is_malformed());
}

#[tokio::test]
async fn request_scoped_options_are_used() {
    common::init_tracing();
    let mut request = json_request(r#"{"user_name":"ada","is_admin":false,}"#);
    request.extensions_mut().insert(JsonOptions::new(
        JsonSerializerOptions::default().with_trailing_commas(true),
    ));

    let user: CreateUser = read_json(&mut request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(user.user_name, "ada");
    assert!(!user.is_admin);
}

#[tokio::test]
async fn chunked_body_is_collected() {
    common::init_tracing();
    let frames: Vec<Result<Frame<Bytes>, Infallible>> = vec![
        Ok(Frame::data(Bytes::from_static(b"[1,"))),
        Ok(Frame::data(Bytes::from_static(b"2,"))),
        Ok(Frame::data(Bytes::from_static(b"3]"))),
    ];
    let mut request = request_with(
        "application/json",
        StreamBody::new(stream::iter(frames)),
    );

    let value: Vec<u8> = read_json(&mut request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(value, vec![1, 2, 3]);
}

#[tokio::test]
async fn cancelling_an_in_flight_read() {
    common::init_tracing();
    let body = StreamBody::new(stream::pending::<Result<Frame<Bytes>, Infallible>>());
    let mut request = request_with("application/json", body);
    let cancel = CancellationToken::new();

    let read = read_json::<Vec<i32>, _>(&mut request, &cancel);
    tokio::pin!(read);

    assert!(futures_util::poll!(read.as_mut()).is_pending());

    cancel.cancel();
    let err = read.await.unwrap_err();

    assert!(err.is_cancelled());
    assert!(!err.is_malformed());
    assert_eq!(err.status_code(), StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn cancelled_token_wins_over_ready_body() {
    common::init_tracing();
    let mut request = json_request("1");
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = read_json::<i32, _>(&mut request, &cancel).await.unwrap_err();

    assert!(err.is_cancelled());
}
