/* src/core/src/sink.rs */

use std::future::Future;
use std::pin::Pin;

use crate::errors::OutputError;

/// Boxed future that may borrow from the sink for the duration of the write.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Abstract response sink consumed by the gateway.
///
/// The gateway drives it in three phases: named headers, body bytes, network
/// flushes. Implementations own delivery only; socket lifecycle stays with
/// the host. Writes are awaited one at a time, which preserves fragment
/// ordering even over an incremental transport.
pub trait TransportSink: Send {
  /// Record a response header. Called only during the header phase, before
  /// the first body write.
  fn write_header(&mut self, name: &str, value: &str) -> Result<(), OutputError>;

  /// Queue body bytes for delivery, in call order.
  fn write_body<'a>(&'a mut self, bytes: &'a [u8]) -> BoxFuture<'a, Result<(), OutputError>>;

  /// Push everything written so far towards the client.
  fn flush_network(&mut self) -> BoxFuture<'_, Result<(), OutputError>>;
}

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
  Header(String, String),
  Body(Vec<u8>),
  Flush,
}

/// In-memory sink recording every call in order.
///
/// Backs the unit tests and offline rendering of a complete response.
#[derive(Default)]
pub struct MemorySink {
  events: Vec<SinkEvent>,
  fail_writes: bool,
}

impl MemorySink {
  pub fn new() -> Self {
    Self::default()
  }

  /// Make every subsequent body write fail, imitating a client that
  /// disconnected mid-flush.
  pub fn fail_writes(&mut self) {
    self.fail_writes = true;
  }

  pub fn events(&self) -> &[SinkEvent] {
    &self.events
  }

  /// Recorded headers, in write order.
  pub fn headers(&self) -> Vec<(&str, &str)> {
    self
      .events
      .iter()
      .filter_map(|e| match e {
        SinkEvent::Header(name, value) => Some((name.as_str(), value.as_str())),
        _ => None,
      })
      .collect()
  }

  pub fn header(&self, name: &str) -> Option<&str> {
    self.headers().iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| *v)
  }

  /// All body bytes, concatenated in write order.
  pub fn body(&self) -> Vec<u8> {
    let mut out = Vec::new();
    for event in &self.events {
      if let SinkEvent::Body(bytes) = event {
        out.extend_from_slice(bytes);
      }
    }
    out
  }

  pub fn body_utf8(&self) -> String {
    String::from_utf8_lossy(&self.body()).into_owned()
  }
}

impl TransportSink for MemorySink {
  fn write_header(&mut self, name: &str, value: &str) -> Result<(), OutputError> {
    self.events.push(SinkEvent::Header(name.to_string(), value.to_string()));
    Ok(())
  }

  fn write_body<'a>(&'a mut self, bytes: &'a [u8]) -> BoxFuture<'a, Result<(), OutputError>> {
    Box::pin(async move {
      if self.fail_writes {
        return Err(OutputError::transport("client disconnected"));
      }
      self.events.push(SinkEvent::Body(bytes.to_vec()));
      Ok(())
    })
  }

  fn flush_network(&mut self) -> BoxFuture<'_, Result<(), OutputError>> {
    Box::pin(async move {
      if self.fail_writes {
        return Err(OutputError::transport("client disconnected"));
      }
      self.events.push(SinkEvent::Flush);
      Ok(())
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn records_calls_in_order() {
    let mut sink = MemorySink::new();
    sink.write_header("Content-Type", "text/html; charset=utf-8").unwrap();
    sink.write_body(b"<p>hi</p>").await.unwrap();
    sink.flush_network().await.unwrap();

    assert_eq!(
      sink.events(),
      &[
        SinkEvent::Header("Content-Type".into(), "text/html; charset=utf-8".into()),
        SinkEvent::Body(b"<p>hi</p>".to_vec()),
        SinkEvent::Flush,
      ]
    );
  }

  #[tokio::test]
  async fn body_concatenates_writes() {
    let mut sink = MemorySink::new();
    sink.write_body(b"a").await.unwrap();
    sink.write_body(b"b").await.unwrap();
    assert_eq!(sink.body(), b"ab");
    assert_eq!(sink.body_utf8(), "ab");
  }

  #[test]
  fn header_lookup_is_case_insensitive() {
    let mut sink = MemorySink::new();
    sink.write_header("X-Frame-Options", "DENY").unwrap();
    assert_eq!(sink.header("x-frame-options"), Some("DENY"));
    assert_eq!(sink.header("Location"), None);
  }

  #[tokio::test]
  async fn failing_sink_reports_transport_error() {
    let mut sink = MemorySink::new();
    sink.fail_writes();
    let err = sink.write_body(b"x").await.unwrap_err();
    assert_eq!(err.code(), "TRANSPORT_WRITE");
  }
}
