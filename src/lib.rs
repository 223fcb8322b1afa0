//! Scroll-aware table of contents for HTML content.
//!
//! [`TocWidget`] scans a content root for headings, renders a flat list of
//! links into a container, keeps exactly one link marked active as the
//! viewport moves, and turns link clicks into centering scrolls. The tree
//! and window it works against are the headless [`dom::Document`] and
//! [`viewport::Viewport`], driven by [`page::Page`].

pub mod config;
pub mod dom;
pub mod page;
pub mod toc;
pub mod utils;
pub mod viewport;

pub use config::TocConfig;
pub use page::{Page, PageEvent};
pub use toc::{TocWidget, WidgetState};
pub use utils::error::{BoxResult, TocError};
