//! Cancellable body I/O.
//!
//! Both helpers race the I/O against a [`CancellationToken`]. Cancellation is
//! checked first, so an already-cancelled token never touches the body.

use bytes::{BufMut, Bytes, BytesMut};
use http_body::Body;
use http_body_util::BodyExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use crate::error::{BoxError, JsonError, JsonResult};

/// Collects a request body into contiguous bytes.
pub(crate) async fn collect_body<B>(body: &mut B, cancel: &CancellationToken) -> JsonResult<Bytes>
where
    B: Body + Unpin,
    B::Error: Into<BoxError>,
{
    let collect = async {
        let mut buf = BytesMut::new();

        while let Some(frame) = body.frame().await {
            let frame = frame.map_err(JsonError::body)?;
            // Trailers carry no payload.
            if let Ok(data) = frame.into_data() {
                buf.put(data);
            }
        }

        Ok::<_, JsonError>(buf.freeze())
    };

    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            tracing::debug!("request body read cancelled");
            Err(JsonError::Cancelled)
        }
        result = collect => result,
    }
}

/// Writes a payload to a response body and flushes it.
pub(crate) async fn write_body<W>(
    body: &mut W,
    payload: &[u8],
    cancel: &CancellationToken,
) -> JsonResult<()>
where
    W: AsyncWrite + Unpin,
{
    let write = async {
        body.write_all(payload).await?;
        body.flush().await?;
        Ok::<_, JsonError>(())
    };

    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            tracing::debug!("response body write cancelled");
            Err(JsonError::Cancelled)
        }
        result = write => result,
    }
}
