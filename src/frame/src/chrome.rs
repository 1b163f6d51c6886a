/* src/frame/src/chrome.rs */

use serde::{Deserialize, Serialize};

use crate::escape::escape_html;
use crate::locale::Direction;

/// Marker separating sidebar link sections: `----` on a line of its own.
pub const SECTION_BREAK: &str = "----";

/// One entry in the fixed documentation list at the bottom of the side panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocLink {
  pub href: String,
  pub label: String,
}

/// Everything the chrome needs, resolved ahead of time.
/// Asset URLs and translated strings come from the host application;
/// nothing here looks them up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameContext {
  pub lang: String,
  pub dir: Direction,
  pub title: String,
  /// Stylesheet URL, already resolved and versioned by the host.
  pub style_href: String,
  #[serde(default)]
  pub script_srcs: Vec<String>,
  /// Sidebar link sections, pre-rendered markup separated by
  /// [`SECTION_BREAK`] lines.
  #[serde(default)]
  pub sidebar: String,
  #[serde(default)]
  pub doc_links: Vec<DocLink>,
}

impl FrameContext {
  /// Parse a context from JSON, as handed over by non-Rust hosts.
  pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(json)
  }
}

/// Stateless renderer for the opening and closing page chrome.
///
/// A full opening is always matched by a full closing, a short opening by a
/// short closing; the envelope machinery upstream guarantees each runs at
/// most once per response.
pub struct PageFrame {
  ctx: FrameContext,
}

impl PageFrame {
  pub fn new(ctx: FrameContext) -> Self {
    Self { ctx }
  }

  pub fn context(&self) -> &FrameContext {
    &self.ctx
  }

  /// Document head shared by both opening variants: charset, robots lockout,
  /// title, stylesheet, scripts.
  fn head(&self) -> String {
    let ctx = &self.ctx;
    let mut out = String::from("<!DOCTYPE html>\n");
    out.push_str(&format!(
      "<html lang=\"{}\" dir=\"{}\">\n",
      escape_html(&ctx.lang),
      ctx.dir.attr()
    ));
    out.push_str("<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"robots\" content=\"noindex, nofollow\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(&ctx.title)));
    out.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">\n", escape_html(&ctx.style_href)));
    for src in &ctx.script_srcs {
      out.push_str(&format!("<script src=\"{}\"></script>\n", escape_html(src)));
    }
    out.push_str("</head>\n");
    out
  }

  /// Full opening: head, body with a direction class, structural wrappers
  /// and an `<h1>` restating the title.
  pub fn opening_full(&self) -> String {
    let mut out = self.head();
    out.push_str(&format!("<body class=\"{}\">\n", self.ctx.dir.body_class()));
    out.push_str("<div id=\"page-wrapper\">\n<div id=\"content\">\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(&self.ctx.title)));
    out
  }

  /// Short opening for embedded callback contexts: same head, no wrappers,
  /// background image suppressed inline.
  pub fn opening_short(&self) -> String {
    let mut out = self.head();
    out.push_str("<body style=\"background-image: none\">\n");
    out
  }

  /// Full closing: close the wrappers, render the side panel, close the
  /// document.
  pub fn closing_full(&self) -> String {
    let mut out = String::from("</div>\n");
    out.push_str(&self.side_panel());
    out.push_str("</div>\n</body>\n</html>\n");
    out
  }

  /// Short closing: no side panel.
  pub fn closing_short(&self) -> String {
    String::from("</body>\n</html>\n")
  }

  fn side_panel(&self) -> String {
    let mut out = String::from("<div id=\"side-panel\">\n");
    for section in split_sections(&self.ctx.sidebar) {
      out.push_str("<div class=\"portal\">\n");
      out.push_str(&section);
      out.push_str("\n</div>\n");
    }
    if !self.ctx.doc_links.is_empty() {
      out.push_str("<div class=\"portal\">\n<ul>\n");
      for link in &self.ctx.doc_links {
        out.push_str(&format!(
          "<li><a href=\"{}\">{}</a></li>\n",
          escape_html(&link.href),
          escape_html(&link.label)
        ));
      }
      out.push_str("</ul>\n</div>\n");
    }
    out.push_str("</div>\n");
    out
  }
}

/// Split sidebar markup on [`SECTION_BREAK`] marker lines.
/// Blank sections are dropped.
pub fn split_sections(sidebar: &str) -> Vec<String> {
  let mut sections = Vec::new();
  let mut current = String::new();
  for line in sidebar.lines() {
    if line.trim() == SECTION_BREAK {
      if !current.trim().is_empty() {
        sections.push(current.trim().to_string());
      }
      current.clear();
    } else {
      current.push_str(line);
      current.push('\n');
    }
  }
  if !current.trim().is_empty() {
    sections.push(current.trim().to_string());
  }
  sections
}

/// Window title template: "<page> - <application>".
pub fn window_title(page: &str, app: &str) -> String {
  format!("{page} - {app}")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ctx() -> FrameContext {
    FrameContext {
      lang: "en".into(),
      dir: Direction::Ltr,
      title: "Install".into(),
      style_href: "/assets/setup.css".into(),
      script_srcs: vec!["/assets/setup.js".into()],
      sidebar: String::new(),
      doc_links: Vec::new(),
    }
  }

  // -- Head --

  #[test]
  fn head_has_charset_robots_title_assets() {
    let frame = PageFrame::new(ctx());
    let out = frame.opening_full();
    assert!(out.starts_with("<!DOCTYPE html>\n"));
    assert!(out.contains("<html lang=\"en\" dir=\"ltr\">"));
    assert!(out.contains("<meta charset=\"utf-8\">"));
    assert!(out.contains("<meta name=\"robots\" content=\"noindex, nofollow\">"));
    assert!(out.contains("<title>Install</title>"));
    assert!(out.contains("<link rel=\"stylesheet\" href=\"/assets/setup.css\">"));
    assert!(out.contains("<script src=\"/assets/setup.js\"></script>"));
  }

  #[test]
  fn title_is_escaped() {
    let mut c = ctx();
    c.title = "<b>Install & go</b>".into();
    let out = PageFrame::new(c).opening_full();
    assert!(out.contains("<title>&lt;b&gt;Install &amp; go&lt;/b&gt;</title>"));
    assert!(out.contains("<h1>&lt;b&gt;Install &amp; go&lt;/b&gt;</h1>"));
  }

  // -- Full variant --

  #[test]
  fn opening_full_wrappers_and_heading() {
    let out = PageFrame::new(ctx()).opening_full();
    assert!(out.contains("<body class=\"lang-ltr\">"));
    assert!(out.contains("<div id=\"page-wrapper\">"));
    assert!(out.contains("<div id=\"content\">"));
    assert!(out.contains("<h1>Install</h1>"));
  }

  #[test]
  fn rtl_direction_reaches_body_class() {
    let mut c = ctx();
    c.lang = "ar".into();
    c.dir = Direction::Rtl;
    let out = PageFrame::new(c).opening_full();
    assert!(out.contains("<html lang=\"ar\" dir=\"rtl\">"));
    assert!(out.contains("<body class=\"lang-rtl\">"));
  }

  #[test]
  fn full_frame_divs_balance() {
    let frame = PageFrame::new(ctx());
    let whole = format!("{}{}", frame.opening_full(), frame.closing_full());
    let opens = whole.matches("<div").count();
    let closes = whole.matches("</div>").count();
    assert_eq!(opens, closes);
  }

  #[test]
  fn closing_full_ends_document() {
    let out = PageFrame::new(ctx()).closing_full();
    assert!(out.ends_with("</body>\n</html>\n"));
    assert!(out.contains("<div id=\"side-panel\">"));
  }

  // -- Short variant --

  #[test]
  fn opening_short_suppresses_background_and_wrappers() {
    let out = PageFrame::new(ctx()).opening_short();
    assert!(out.contains("<body style=\"background-image: none\">"));
    assert!(!out.contains("page-wrapper"));
    assert!(!out.contains("<h1>"));
  }

  #[test]
  fn closing_short_has_no_side_panel() {
    let mut c = ctx();
    c.sidebar = "<a href=\"/\">Home</a>".into();
    let frame = PageFrame::new(c);
    let out = frame.closing_short();
    assert_eq!(out, "</body>\n</html>\n");
    assert!(!out.contains("portal"));
  }

  // -- Side panel --

  #[test]
  fn sidebar_sections_wrapped_in_portals() {
    let mut c = ctx();
    c.sidebar = "<a href=\"/a\">A</a>\n----\n<a href=\"/b\">B</a>".into();
    let out = PageFrame::new(c).closing_full();
    assert_eq!(out.matches("<div class=\"portal\">").count(), 2);
    // Section markup is passed through verbatim
    assert!(out.contains("<a href=\"/a\">A</a>"));
    assert!(out.contains("<a href=\"/b\">B</a>"));
  }

  #[test]
  fn doc_links_rendered_as_list() {
    let mut c = ctx();
    c.doc_links = vec![
      DocLink { href: "/docs/readme".into(), label: "Readme".into() },
      DocLink { href: "/docs/release-notes".into(), label: "Release notes".into() },
      DocLink { href: "/docs/license".into(), label: "License".into() },
      DocLink { href: "/docs/upgrade".into(), label: "Upgrade guide".into() },
    ];
    let out = PageFrame::new(c).closing_full();
    assert!(out.contains("<li><a href=\"/docs/readme\">Readme</a></li>"));
    assert!(out.contains("<li><a href=\"/docs/upgrade\">Upgrade guide</a></li>"));
    assert_eq!(out.matches("<li>").count(), 4);
  }

  #[test]
  fn doc_link_labels_escaped() {
    let mut c = ctx();
    c.doc_links = vec![DocLink { href: "/x?a=1&b=2".into(), label: "A & B".into() }];
    let out = PageFrame::new(c).closing_full();
    assert!(out.contains("href=\"/x?a=1&amp;b=2\""));
    assert!(out.contains(">A &amp; B</a>"));
  }

  #[test]
  fn empty_sidebar_and_docs_still_render_panel() {
    let out = PageFrame::new(ctx()).closing_full();
    assert!(out.contains("<div id=\"side-panel\">\n</div>"));
    assert!(!out.contains("portal"));
  }

  // -- split_sections --

  #[test]
  fn split_sections_basic() {
    let sections = split_sections("one\n----\ntwo");
    assert_eq!(sections, vec!["one".to_string(), "two".to_string()]);
  }

  #[test]
  fn split_sections_drops_blank() {
    let sections = split_sections("one\n----\n----\n\n----\ntwo");
    assert_eq!(sections, vec!["one".to_string(), "two".to_string()]);
  }

  #[test]
  fn split_sections_empty_input() {
    assert!(split_sections("").is_empty());
  }

  #[test]
  fn split_sections_multiline_section() {
    let sections = split_sections("<ul>\n<li>a</li>\n</ul>\n----\nnext");
    assert_eq!(sections[0], "<ul>\n<li>a</li>\n</ul>");
    assert_eq!(sections[1], "next");
  }

  // -- Misc --

  #[test]
  fn window_title_template() {
    assert_eq!(window_title("Options", "ExampleWiki"), "Options - ExampleWiki");
  }

  #[test]
  fn context_from_json() {
    let json = r#"{
      "lang": "he",
      "dir": "rtl",
      "title": "Setup",
      "style_href": "/s.css"
    }"#;
    let ctx = FrameContext::from_json(json).unwrap();
    assert_eq!(ctx.dir, Direction::Rtl);
    assert!(ctx.script_srcs.is_empty());
    assert!(ctx.doc_links.is_empty());
  }
}
