use crate::dom::{Document, NodeId};
use crate::viewport::Viewport;

/// Rank parsed from an `h1`..`h6` tag
pub fn heading_level(doc: &Document, node: NodeId) -> Option<u8> {
    let tag = doc.tag_name(node)?;
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Vertical midpoint of the element's rendered box in document coordinates.
///
/// Read from live layout on every call; positions move with reflow.
pub fn heading_center<V: Viewport + ?Sized>(doc: &Document, node: NodeId, viewport: &V) -> f64 {
    let scroll_y = viewport.scroll_y();
    let rect = doc.bounding_client_rect(node, scroll_y);
    rect.top + scroll_y + rect.height / 2.0
}

/// Shallowest rank present, the baseline for indentation
pub fn top_level<I: IntoIterator<Item = u8>>(levels: I) -> Option<u8> {
    levels.into_iter().min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_html, LayoutBox};
    use crate::viewport::HeadlessViewport;

    #[test]
    fn test_heading_level_from_tag() {
        let doc = parse_html("<h3>a</h3><p>b</p><h7>c</h7><header>d</header><h01>e</h01><h-2>f</h-2>");
        let nodes = doc.children(doc.root()).to_vec();
        assert_eq!(heading_level(&doc, nodes[0]), Some(3));
        assert_eq!(heading_level(&doc, nodes[1]), None);
        assert_eq!(heading_level(&doc, nodes[2]), None);
        assert_eq!(heading_level(&doc, nodes[3]), None);
        assert_eq!(heading_level(&doc, nodes[4]), None);
        assert_eq!(heading_level(&doc, nodes[5]), None);
    }

    #[test]
    fn test_center_is_independent_of_scroll() {
        let mut doc = parse_html("<h2>a</h2>");
        let h2 = doc.children(doc.root())[0];
        doc.set_layout(h2, LayoutBox { top: 1000.0, height: 40.0 });

        let mut viewport = HeadlessViewport::new(500.0, 5000.0);
        assert_eq!(heading_center(&doc, h2, &viewport), 1020.0);
        viewport.user_scroll(700.0);
        assert_eq!(heading_center(&doc, h2, &viewport), 1020.0);
    }

    #[test]
    fn test_center_tracks_layout_changes() {
        let mut doc = parse_html("<h2>a</h2>");
        let h2 = doc.children(doc.root())[0];
        let viewport = HeadlessViewport::new(500.0, 5000.0);

        doc.set_layout(h2, LayoutBox { top: 100.0, height: 20.0 });
        assert_eq!(heading_center(&doc, h2, &viewport), 110.0);
        doc.set_layout(h2, LayoutBox { top: 300.0, height: 20.0 });
        assert_eq!(heading_center(&doc, h2, &viewport), 310.0);
    }

    #[test]
    fn test_top_level() {
        assert_eq!(top_level(vec![3, 4, 3, 5]), Some(3));
        assert_eq!(top_level(Vec::<u8>::new()), None);
    }
}
