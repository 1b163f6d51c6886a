/* src/core/src/buffer.rs */

use gatefold_frame::PageFrame;

use crate::envelope::{EnvelopeController, Mode};
use crate::errors::OutputError;
use crate::sink::TransportSink;

/// Accumulates wizard-step markup and owns the flush points of one
/// request/response cycle.
///
/// Created together with its envelope at the start of the cycle, never
/// reused across requests; [`ResponseBuffer::finalize`] consumes the buffer
/// so a finished response cannot be written to again.
pub struct ResponseBuffer<S: TransportSink> {
  pending: Vec<String>,
  envelope: EnvelopeController,
  frame: PageFrame,
  sink: S,
}

impl<S: TransportSink> ResponseBuffer<S> {
  pub fn new(sink: S, frame: PageFrame) -> Self {
    Self { pending: Vec::new(), envelope: EnvelopeController::new(), frame, sink }
  }

  pub fn envelope(&self) -> &EnvelopeController {
    &self.envelope
  }

  pub fn frame(&self) -> &PageFrame {
    &self.frame
  }

  /// Append markup and push it to the client right away. Used for progress
  /// feedback during long-running steps.
  pub async fn append(&mut self, fragment: impl Into<String>) -> Result<(), OutputError> {
    self.pending.push(fragment.into());
    self.flush().await
  }

  /// Append without flushing, to batch several fragments into one flush.
  pub fn append_no_flush(&mut self, fragment: impl Into<String>) {
    self.pending.push(fragment.into());
  }

  /// Commit the envelope if needed, then send pending fragments in append
  /// order and push them to the network. A committed redirect drops the
  /// pending content instead: a redirect response carries no body.
  pub async fn flush(&mut self) -> Result<(), OutputError> {
    self.envelope.commit(&self.frame, &mut self.sink).await?;
    if self.envelope.mode() == Mode::Redirect {
      self.pending.clear();
    } else {
      for fragment in self.pending.drain(..) {
        self.sink.write_body(fragment.as_bytes()).await?;
      }
    }
    self.sink.flush_network().await
  }

  /// Record a redirect. Fails once headers are out: a redirect is a
  /// header-phase decision and cannot replace content already sent.
  pub fn request_redirect(&mut self, url: impl Into<String>) -> Result<(), OutputError> {
    let url = url.into();
    if self.envelope.is_committed() {
      return Err(OutputError::LateRedirect { url });
    }
    self.envelope.set_redirect(url)
  }

  pub fn set_short_header(&mut self, short: bool) -> Result<(), OutputError> {
    self.envelope.set_short_header(short)
  }

  pub fn set_allow_frames(&mut self, allow: bool) -> Result<(), OutputError> {
    self.envelope.set_allow_frames(allow)
  }

  /// Final flush plus the matching closing frame. A committed redirect gets
  /// no closing frame. Consumes the buffer and hands the sink back for
  /// inspection or teardown.
  pub async fn finalize(mut self) -> Result<S, OutputError> {
    self.flush().await?;
    match self.envelope.mode() {
      Mode::RenderFull => {
        self.sink.write_body(self.frame.closing_full().as_bytes()).await?;
        self.sink.flush_network().await?;
      }
      Mode::RenderShort => {
        self.sink.write_body(self.frame.closing_short().as_bytes()).await?;
        self.sink.flush_network().await?;
      }
      Mode::Redirect | Mode::Undecided => {}
    }
    Ok(self.sink)
  }
}
