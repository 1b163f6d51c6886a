/* src/frame/src/lib.rs */

pub mod chrome;
pub mod escape;
pub mod locale;

// Re-exports for ergonomic use
pub use chrome::{DocLink, FrameContext, PageFrame, SECTION_BREAK, split_sections, window_title};
pub use escape::escape_html;
pub use locale::{Direction, direction_for};
