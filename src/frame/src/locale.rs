/* src/frame/src/locale.rs */

use serde::{Deserialize, Serialize};

/// Script direction of a UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Ltr,
  Rtl,
}

impl Direction {
  /// Value for the `dir` attribute on `<html>`.
  pub fn attr(self) -> &'static str {
    match self {
      Direction::Ltr => "ltr",
      Direction::Rtl => "rtl",
    }
  }

  /// Body class the stylesheet keys on to mirror the layout.
  pub fn body_class(self) -> &'static str {
    match self {
      Direction::Ltr => "lang-ltr",
      Direction::Rtl => "lang-rtl",
    }
  }
}

// Languages written right-to-left, by primary subtag.
const RTL_LANGS: &[&str] =
  &["ar", "arc", "ckb", "dv", "fa", "he", "ks", "ps", "sd", "ug", "ur", "yi"];

/// Look up the script direction for a language tag.
/// Prefix match on the primary subtag, so "ar-EG" resolves like "ar".
pub fn direction_for(lang: &str) -> Direction {
  let primary = lang.split(['-', '_']).next().unwrap_or(lang);
  let primary = primary.to_ascii_lowercase();
  if RTL_LANGS.contains(&primary.as_str()) { Direction::Rtl } else { Direction::Ltr }
}
