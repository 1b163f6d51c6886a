/* src/adapter/axum/src/sink.rs */

use std::convert::Infallible;

use axum::body::Bytes;
use gatefold_output::OutputError;
use gatefold_output::sink::{BoxFuture, TransportSink};
use tokio::sync::{mpsc, oneshot};

/// Status and headers captured at the moment the response starts (first body
/// write or first network flush, whichever comes first).
#[derive(Debug)]
pub struct ResponseHead {
  pub status: u16,
  pub headers: Vec<(String, String)>,
}

/// Channel-backed sink bridging the gateway to an axum streaming body.
///
/// Headers buffer locally until the response starts; from then on body
/// bytes go straight to the receiver half held by the HTTP handler, so
/// eager-flushed fragments reach the client while the wizard step is still
/// running. The sink interface carries no status operation, so the status
/// is inferred here: 302 when a Location header was recorded, 200 otherwise.
pub struct ChannelSink {
  headers: Vec<(String, String)>,
  head_tx: Option<oneshot::Sender<ResponseHead>>,
  body_tx: mpsc::Sender<Result<Bytes, Infallible>>,
}

pub type BodyReceiver = mpsc::Receiver<Result<Bytes, Infallible>>;

impl ChannelSink {
  /// Create a sink plus the receiving halves for the HTTP handler.
  pub fn new(capacity: usize) -> (Self, oneshot::Receiver<ResponseHead>, BodyReceiver) {
    let (head_tx, head_rx) = oneshot::channel();
    let (body_tx, body_rx) = mpsc::channel(capacity);
    (Self { headers: Vec::new(), head_tx: Some(head_tx), body_tx }, head_rx, body_rx)
  }

  fn start_response(&mut self) {
    if let Some(tx) = self.head_tx.take() {
      let status = if self.headers.iter().any(|(n, _)| n.eq_ignore_ascii_case("location")) {
        302
      } else {
        200
      };
      let head = ResponseHead { status, headers: std::mem::take(&mut self.headers) };
      // The handler may have given up waiting; delivery is best-effort and
      // the body writes below will surface the disconnect.
      let _ = tx.send(head);
    }
  }
}

impl TransportSink for ChannelSink {
  fn write_header(&mut self, name: &str, value: &str) -> Result<(), OutputError> {
    if self.head_tx.is_none() {
      return Err(OutputError::transport("header written after response start"));
    }
    self.headers.push((name.to_string(), value.to_string()));
    Ok(())
  }

  fn write_body<'a>(&'a mut self, bytes: &'a [u8]) -> BoxFuture<'a, Result<(), OutputError>> {
    Box::pin(async move {
      self.start_response();
      self
        .body_tx
        .send(Ok(Bytes::copy_from_slice(bytes)))
        .await
        .map_err(|_| OutputError::transport("client disconnected"))
    })
  }

  fn flush_network(&mut self) -> BoxFuture<'_, Result<(), OutputError>> {
    Box::pin(async move {
      // Channel delivery is immediate; just make sure the head is out so
      // even a body-less response (redirect) starts.
      self.start_response();
      Ok(())
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn head_sent_once_on_first_body_write() {
    let (mut sink, head_rx, mut body_rx) = ChannelSink::new(4);
    sink.write_header("Content-Type", "text/html; charset=utf-8").unwrap();
    sink.write_body(b"<p>hi</p>").await.unwrap();
    sink.write_body(b"<p>more</p>").await.unwrap();

    let head = head_rx.await.unwrap();
    assert_eq!(head.status, 200);
    assert_eq!(head.headers, vec![("Content-Type".to_string(), "text/html; charset=utf-8".to_string())]);

    let first = body_rx.recv().await.unwrap().unwrap();
    assert_eq!(&first[..], b"<p>hi</p>");
  }

  #[tokio::test]
  async fn location_header_infers_redirect_status() {
    let (mut sink, head_rx, _body_rx) = ChannelSink::new(4);
    sink.write_header("Content-Type", "text/html; charset=utf-8").unwrap();
    sink.write_header("Location", "/next").unwrap();
    sink.flush_network().await.unwrap();

    let head = head_rx.await.unwrap();
    assert_eq!(head.status, 302);
    assert!(head.headers.iter().any(|(n, v)| n == "Location" && v == "/next"));
  }

  #[tokio::test]
  async fn flush_alone_starts_a_bodyless_response() {
    let (mut sink, head_rx, _body_rx) = ChannelSink::new(4);
    sink.flush_network().await.unwrap();
    let head = head_rx.await.unwrap();
    assert_eq!(head.status, 200);
    assert!(head.headers.is_empty());
  }

  #[tokio::test]
  async fn header_after_start_is_rejected() {
    let (mut sink, _head_rx, _body_rx) = ChannelSink::new(4);
    sink.write_body(b"x").await.unwrap();
    let err = sink.write_header("X-Late", "1").unwrap_err();
    assert_eq!(err.code(), "TRANSPORT_WRITE");
  }

  #[tokio::test]
  async fn dropped_receiver_is_a_write_error() {
    let (mut sink, head_rx, body_rx) = ChannelSink::new(1);
    drop(head_rx);
    drop(body_rx);
    let err = sink.write_body(b"x").await.unwrap_err();
    assert_eq!(err.code(), "TRANSPORT_WRITE");
  }
}
