/* src/core/src/envelope.rs */

use gatefold_frame::PageFrame;

use crate::errors::OutputError;
use crate::sink::TransportSink;

/// How the response begins. Settable until [`EnvelopeController::commit`],
/// frozen afterwards. There are no transitions back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  Undecided,
  Redirect,
  RenderFull,
  RenderShort,
}

/// Owns the one-shot decision of redirect-vs-render, the frame-permission
/// header, and the committed flag. All pre/post-commit validation lives
/// here; once committed, every setter is a hard error.
pub struct EnvelopeController {
  mode: Mode,
  redirect_target: Option<String>,
  allow_frames: bool,
  committed: bool,
}

impl EnvelopeController {
  pub fn new() -> Self {
    Self { mode: Mode::Undecided, redirect_target: None, allow_frames: false, committed: false }
  }

  pub fn mode(&self) -> Mode {
    self.mode
  }

  pub fn is_committed(&self) -> bool {
    self.committed
  }

  pub fn redirect_target(&self) -> Option<&str> {
    self.redirect_target.as_deref()
  }

  fn ensure_mutable(&self, field: &'static str) -> Result<(), OutputError> {
    if self.committed {
      return Err(OutputError::EnvelopeFrozen { field });
    }
    Ok(())
  }

  /// Switch to redirect mode. A redirect always wins over any render
  /// variant chosen earlier or later; no frame is ever emitted once a
  /// target is recorded.
  pub fn set_redirect(&mut self, url: impl Into<String>) -> Result<(), OutputError> {
    self.ensure_mutable("redirect")?;
    self.redirect_target = Some(url.into());
    self.mode = Mode::Redirect;
    Ok(())
  }

  /// Choose the short or full header chrome. A recorded redirect keeps
  /// precedence either way.
  pub fn set_short_header(&mut self, short: bool) -> Result<(), OutputError> {
    self.ensure_mutable("short_header")?;
    if self.mode != Mode::Redirect {
      self.mode = if short { Mode::RenderShort } else { Mode::RenderFull };
    }
    Ok(())
  }

  /// Allow embedding in frames, suppressing the frame-deny header.
  pub fn set_allow_frames(&mut self, allow: bool) -> Result<(), OutputError> {
    self.ensure_mutable("allow_frames")?;
    self.allow_frames = allow;
    Ok(())
  }

  /// Commit the envelope: emit the content-type and frame headers and, when
  /// rendering, the opening frame. The first call performs the emission;
  /// later calls return without side effects.
  pub async fn commit(
    &mut self,
    frame: &PageFrame,
    sink: &mut dyn TransportSink,
  ) -> Result<(), OutputError> {
    if self.committed {
      return Ok(());
    }
    self.committed = true;
    // A step that never chose gets the standard page chrome.
    if self.mode == Mode::Undecided {
      self.mode = Mode::RenderFull;
    }

    sink.write_header("Content-Type", "text/html; charset=utf-8")?;
    if !self.allow_frames {
      sink.write_header("X-Frame-Options", "DENY")?;
    }

    match self.mode {
      Mode::Redirect => {
        let target = self.redirect_target.as_deref().unwrap_or("");
        sink.write_header("Location", target)?;
      }
      Mode::RenderShort => {
        sink.write_body(frame.opening_short().as_bytes()).await?;
      }
      Mode::RenderFull | Mode::Undecided => {
        sink.write_body(frame.opening_full().as_bytes()).await?;
      }
    }
    Ok(())
  }
}

impl Default for EnvelopeController {
  fn default() -> Self {
    Self::new()
  }
}
