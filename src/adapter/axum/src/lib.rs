/* src/adapter/axum/src/lib.rs */

mod error;
mod sink;

use std::future::Future;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gatefold_frame::PageFrame;
use gatefold_output::{OutputError, ResponseBuffer};
use tokio_stream::wrappers::ReceiverStream;

pub use error::AxumError;
pub use sink::{BodyReceiver, ChannelSink, ResponseHead};

/// Re-export of the gateway core for convenience
pub use gatefold_output;

/// Run one wizard step against a fresh buffer/envelope pair and stream the
/// result as an axum response.
///
/// The step runs on its own task; the response is returned as soon as the
/// head is available, so eager-flushed fragments reach the client while the
/// step is still working. The step receives the buffer by value and hands it
/// back; the adapter finalizes it.
///
/// A step that fails before the response starts maps to a JSON error body.
/// After the head is on the wire nothing can be un-sent, so a later failure
/// just ends the body stream and is reported on stderr.
pub async fn respond<F, Fut>(frame: PageFrame, step: F) -> Response
where
  F: FnOnce(ResponseBuffer<ChannelSink>) -> Fut + Send + 'static,
  Fut: Future<Output = Result<ResponseBuffer<ChannelSink>, OutputError>> + Send + 'static,
{
  let (sink, head_rx, body_rx) = ChannelSink::new(16);
  let buffer = ResponseBuffer::new(sink, frame);

  let task = tokio::spawn(async move {
    let result = match step(buffer).await {
      Ok(buffer) => buffer.finalize().await.map(|_| ()),
      Err(e) => Err(e),
    };
    if let Err(ref e) = result {
      eprintln!("gatefold: request aborted: {e}");
    }
    result
  });

  match head_rx.await {
    Ok(head) => streaming_response(&head, body_rx),
    Err(_) => {
      // The head never went out; join the task to recover the real error.
      let err = match task.await {
        Ok(Err(e)) => e,
        Ok(Ok(())) => OutputError::transport("response closed before start"),
        Err(e) => OutputError::transport(e.to_string()), // JoinError (task panic)
      };
      AxumError(err).into_response()
    }
  }
}

fn streaming_response(head: &ResponseHead, body_rx: BodyReceiver) -> Response {
  let status = StatusCode::from_u16(head.status).unwrap_or(StatusCode::OK);
  let mut builder = Response::builder().status(status);
  for (name, value) in &head.headers {
    builder = builder.header(name.as_str(), value.as_str());
  }
  builder
    .body(Body::from_stream(ReceiverStream::new(body_rx)))
    .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
