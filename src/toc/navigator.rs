use log::debug;

use crate::dom::Document;
use crate::toc::heading::heading_center;
use crate::viewport::{ScrollBehavior, Viewport};

/// Smooth-scroll so the heading with `id` sits at the vertical middle of the
/// viewport, the same point the active entry is measured against.
///
/// `_offset` is the configured scroll offset; centering does not use it.
/// Returns the requested scroll target, or `None` when no element carries
/// the identifier (the heading may have been removed).
pub fn scroll_to_heading<V: Viewport + ?Sized>(
    doc: &Document,
    viewport: &mut V,
    id: &str,
    _offset: f64,
) -> Option<f64> {
    if id.is_empty() {
        return None;
    }
    let heading = match doc.get_element_by_id(id) {
        Some(node) => node,
        None => {
            debug!("No element with id {:?}; skipping scroll", id);
            return None;
        }
    };

    let target = heading_center(doc, heading, viewport) - viewport.height() / 2.0;
    viewport.scroll_to(target, ScrollBehavior::Smooth);
    Some(target)
}
