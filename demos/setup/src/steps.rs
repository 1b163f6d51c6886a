/* demos/setup/src/steps.rs */

use std::time::Duration;

use axum::response::Response;
use gatefold_axum::respond;
use gatefold_frame::{DocLink, FrameContext, PageFrame, direction_for, window_title};

const APP_NAME: &str = "ExampleWiki";

/// Resolved chrome inputs for one wizard page. In a real host these come
/// from the asset pipeline and the message catalog.
fn frame(page_title: &str) -> PageFrame {
  let lang = "en";
  PageFrame::new(FrameContext {
    lang: lang.into(),
    dir: direction_for(lang),
    title: window_title(page_title, APP_NAME),
    style_href: "/assets/setup.css".into(),
    script_srcs: vec!["/assets/setup.js".into()],
    sidebar: concat!(
      "<a href=\"https://example.org\">Project home</a>\n",
      "----\n",
      "<a href=\"/help\">Help</a>\n<a href=\"/about\">About</a>",
    )
    .into(),
    doc_links: vec![
      doc_link("/docs/readme", "Readme"),
      doc_link("/docs/release-notes", "Release notes"),
      doc_link("/docs/license", "License"),
      doc_link("/docs/upgrade", "Upgrade guide"),
    ],
  })
}

fn doc_link(href: &str, label: &str) -> DocLink {
  DocLink { href: href.into(), label: label.into() }
}

/// First step: static page, single batched flush.
pub async fn welcome() -> Response {
  respond(frame("Welcome"), |mut buffer| async move {
    buffer.append_no_flush("<p>This wizard will set up your new installation.</p>");
    buffer.append_no_flush("<p><a href=\"/install\">Begin</a></p>");
    Ok(buffer)
  })
  .await
}

/// Long-running step: progress lines are eager-flushed so the client sees
/// them while the work is still going.
pub async fn install() -> Response {
  respond(frame("Installing"), |mut buffer| async move {
    for task in ["Creating database", "Writing tables", "Populating defaults"] {
      buffer.append(format!("<p>{task}...</p>")).await?;
      tokio::time::sleep(Duration::from_millis(300)).await;
      buffer.append("<p>done.</p>").await?;
    }
    buffer.append("<p><a href=\"/finish\">Continue</a></p>").await?;
    Ok(buffer)
  })
  .await
}

/// Embedded callback context: short chrome, frame embedding allowed.
pub async fn callback() -> Response {
  respond(frame("Callback"), |mut buffer| async move {
    buffer.set_short_header(true)?;
    buffer.set_allow_frames(true)?;
    buffer.append("<p>Authorization received.</p>").await?;
    Ok(buffer)
  })
  .await
}

/// Last step hands control back to the front page.
pub async fn finish() -> Response {
  respond(frame("Finished"), |mut buffer| async move {
    buffer.request_redirect("/")?;
    Ok(buffer)
  })
  .await
}
