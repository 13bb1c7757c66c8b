//! Integration tests for writing JSON response bodies.

mod common;

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use heron_json::{
    write_json, write_json_plain, write_json_with, write_json_with_options, Escaping, JsonOptions,
    JsonSerializerOptions, JSON_CONTENT_TYPE, JSON_CONTENT_TYPE_WITH_CHARSET,
};
use http::{header, HeaderValue, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tokio::io::AsyncWrite;
use tokio_util::sync::CancellationToken;

/// Writer that never accepts any bytes.
struct PendingWriter;

impl AsyncWrite for PendingWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Pending
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Pending
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Pending
    }
}

#[derive(Serialize)]
struct UserView {
    user_name: String,
    bio: String,
}

fn user() -> UserView {
    UserView {
        user_name: "ada".into(),
        bio: "<b>café</b>".into(),
    }
}

fn body_text(response: &Response<Vec<u8>>) -> &str {
    std::str::from_utf8(response.body()).unwrap()
}

#[tokio::test]
async fn writes_number_with_charset_and_ok_status() {
    common::init_tracing();
    let mut response = Response::new(Vec::new());
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;

    write_json(&mut response, &1, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(body_text(&response), "1");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        JSON_CONTENT_TYPE_WITH_CHARSET
    );
}

#[tokio::test]
async fn writes_null_for_absent_value() {
    common::init_tracing();
    let mut response = Response::new(Vec::new());

    write_json(&mut response, &Option::<UserView>::None, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(body_text(&response), "null");

    let mut response = Response::new(Vec::new());
    write_json(&mut response, &Value::Null, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(body_text(&response), "null");
}

#[tokio::test]
async fn plain_family_omits_charset() {
    common::init_tracing();
    let mut response = Response::new(Vec::new());

    write_json_plain(&mut response, &[1, 2], &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(body_text(&response), "[1,2]");
    assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
}

#[tokio::test]
async fn explicit_content_type_overrides_default() {
    common::init_tracing();
    let mut response = Response::new(Vec::new());
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain"),
    );

    write_json_with(
        &mut response,
        &1,
        None,
        Some("application/custom-type"),
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/custom-type"
    );
    assert_eq!(response.headers().get_all(header::CONTENT_TYPE).iter().count(), 1);
}

#[tokio::test]
async fn indented_output_uses_two_spaces() {
    common::init_tracing();
    let options = JsonSerializerOptions::web().with_write_indented(true);
    let mut response = Response::new(Vec::new());

    write_json_with_options(&mut response, &[1], Some(&options), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(body_text(&response), "[\n  1\n]");
}

#[tokio::test]
async fn default_options_are_camel_case_and_relaxed() {
    common::init_tracing();
    let mut response = Response::new(Vec::new());

    write_json(&mut response, &user(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        body_text(&response),
        r#"{"userName":"ada","bio":"<b>café</b>"}"#
    );
}

#[tokio::test]
async fn strict_escaping_encodes_sensitive_characters() {
    common::init_tracing();
    let options = JsonSerializerOptions::web().with_escaping(Escaping::Default);
    let mut response = Response::new(Vec::new());

    write_json_with_options(&mut response, &user(), Some(&options), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        body_text(&response),
        r#"{"userName":"ada","bio":"\u003Cb\u003Ecaf\u00E9\u003C/b\u003E"}"#
    );
}

#[tokio::test]
async fn explicit_options_win_over_scoped_options() {
    common::init_tracing();
    let mut response = Response::new(Vec::new());
    response
        .extensions_mut()
        .insert(JsonOptions::new(JsonSerializerOptions::default()));

    write_json(&mut response, &user(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(
        body_text(&response),
        r#"{"user_name":"ada","bio":"\u003Cb\u003Ecaf\u00E9\u003C/b\u003E"}"#
    );

    let mut response = Response::new(Vec::new());
    response
        .extensions_mut()
        .insert(JsonOptions::new(JsonSerializerOptions::default()));
    let explicit = JsonSerializerOptions::web().with_write_indented(true);

    write_json_with_options(&mut response, &[1], Some(&explicit), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(body_text(&response), "[\n  1\n]");
}

#[tokio::test]
async fn cancelling_an_in_flight_write() {
    common::init_tracing();
    let mut response = Response::new(PendingWriter);
    let cancel = CancellationToken::new();

    let write = write_json(&mut response, &[1, 2, 3], &cancel);
    tokio::pin!(write);

    assert!(futures_util::poll!(write.as_mut()).is_pending());

    cancel.cancel();
    let err = write.await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(err.error_code(), "CANCELLED");
}

#[tokio::test]
async fn cancelled_token_writes_nothing() {
    common::init_tracing();
    let mut response = Response::new(Vec::new());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = write_json(&mut response, &1, &cancel).await.unwrap_err();

    assert!(err.is_cancelled());
    assert!(response.body().is_empty());
}
