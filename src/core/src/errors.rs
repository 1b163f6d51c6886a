/* src/core/src/errors.rs */

use std::fmt;

/// Error raised by the response gateway.
///
/// None of these are recoverable mid-response: headers and body bytes cannot
/// be un-sent, so callers abort the request instead of emitting malformed
/// output.
#[derive(Debug)]
pub enum OutputError {
  /// Redirect requested after the envelope was committed.
  LateRedirect { url: String },
  /// Envelope-affecting setter called after commit.
  EnvelopeFrozen { field: &'static str },
  /// Network write failed during a flush.
  TransportWrite { message: String },
}

impl OutputError {
  pub fn transport(message: impl Into<String>) -> Self {
    Self::TransportWrite { message: message.into() }
  }

  pub fn code(&self) -> &'static str {
    match self {
      Self::LateRedirect { .. } => "LATE_REDIRECT",
      Self::EnvelopeFrozen { .. } => "ENVELOPE_FROZEN",
      Self::TransportWrite { .. } => "TRANSPORT_WRITE",
    }
  }

  pub fn message(&self) -> String {
    match self {
      Self::LateRedirect { url } => {
        format!("redirect to '{url}' requested after headers were sent")
      }
      Self::EnvelopeFrozen { field } => {
        format!("'{field}' changed after the envelope was committed")
      }
      Self::TransportWrite { message } => message.clone(),
    }
  }

  pub fn status(&self) -> u16 {
    500
  }
}

impl fmt::Display for OutputError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code(), self.message())
  }
}

impl std::error::Error for OutputError {}
