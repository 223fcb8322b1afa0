use log::debug;

use crate::dom::node::{Document, LayoutBox, NodeId, NodeKind};

/// Elements that never produce a box
const HIDDEN_ELEMENTS: [&str; 9] = [
    "head", "script", "style", "template", "meta", "link", "title", "noscript", "base",
];

/// Elements laid out inline with their parent's text
const INLINE_ELEMENTS: [&str; 22] = [
    "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "data", "dfn", "em", "i", "kbd", "mark",
    "q", "s", "samp", "small", "span", "strong", "sub", "sup",
];

/// Parameters of the headless block-flow estimator
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub line_height: f64,
    pub chars_per_line: usize,
    pub block_gap: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            line_height: 24.0,
            chars_per_line: 80,
            block_gap: 16.0,
        }
    }
}

/// Font scale applied to a block's line height
fn scale_for(tag: &str) -> f64 {
    match tag {
        "h1" => 2.0,
        "h2" => 1.6,
        "h3" => 1.3,
        "h4" => 1.1,
        _ => 1.0,
    }
}

fn is_hidden(tag: &str) -> bool {
    HIDDEN_ELEMENTS.contains(&tag)
}

fn is_inline(tag: &str) -> bool {
    INLINE_ELEMENTS.contains(&tag)
}

/// Assign a document-coordinate box to every rendered element.
///
/// Blocks stack vertically. A block's own inline text comes first and takes
/// `ceil(chars / chars_per_line)` lines; block children follow. Inline
/// elements share the box of the block that contains them. Returns the
/// document height.
pub fn layout_document(doc: &mut Document, options: &LayoutOptions) -> f64 {
    layout_document_excluding(doc, options, &[])
}

/// [`layout_document`] with `out_of_flow` subtrees taken out of the block
/// flow. They get no box and take no vertical space, so content around them
/// keeps its position whatever they contain.
pub fn layout_document_excluding(doc: &mut Document, options: &LayoutOptions, out_of_flow: &[NodeId]) -> f64 {
    doc.clear_layout();
    let root = doc.root();
    let height = layout_block(doc, root, 0.0, options, out_of_flow);
    debug!("Laid out document, height {:.0}px", height);
    height
}

fn layout_block(
    doc: &mut Document,
    id: NodeId,
    top: f64,
    options: &LayoutOptions,
    out_of_flow: &[NodeId],
) -> f64 {
    let tag = doc.tag_name(id).unwrap_or("").to_string();

    let mut inline_chars = 0;
    let mut inline_nodes = Vec::new();
    let mut blocks = Vec::new();
    collect_flow(doc, id, out_of_flow, &mut inline_chars, &mut inline_nodes, &mut blocks);

    let mut cursor = top;
    if inline_chars > 0 {
        let lines = inline_chars.div_ceil(options.chars_per_line.max(1));
        cursor += lines as f64 * options.line_height * scale_for(&tag);
    }

    let mut placed_child = false;
    for child in blocks {
        if placed_child {
            cursor += options.block_gap;
        }
        let end = layout_block(doc, child, cursor, options, out_of_flow);
        placed_child = end > cursor;
        cursor = end;
    }

    let layout = LayoutBox {
        top,
        height: cursor - top,
    };
    doc.set_layout(id, layout);
    for node in inline_nodes {
        doc.set_layout(node, layout);
    }
    cursor
}

/// Split the children of a block into inline content and child blocks
fn collect_flow(
    doc: &Document,
    id: NodeId,
    out_of_flow: &[NodeId],
    inline_chars: &mut usize,
    inline_nodes: &mut Vec<NodeId>,
    blocks: &mut Vec<NodeId>,
) {
    for &child in doc.children(id) {
        if out_of_flow.contains(&child) {
            continue;
        }
        match &doc.node(child).kind {
            NodeKind::Text(text) => {
                *inline_chars += collapse_len(text);
            }
            NodeKind::Element(element) if is_hidden(&element.tag) => {}
            NodeKind::Element(element) if is_inline(&element.tag) => {
                inline_nodes.push(child);
                collect_flow(doc, child, out_of_flow, inline_chars, inline_nodes, blocks);
            }
            NodeKind::Element(_) => blocks.push(child),
            _ => {}
        }
    }
}

/// Character count after collapsing whitespace runs
fn collapse_len(text: &str) -> usize {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0;
    }
    words.iter().map(|w| w.chars().count()).sum::<usize>() + words.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parser::parse_html;

    #[test]
    fn test_blocks_stack_vertically() {
        let mut doc = parse_html("<h1>Title</h1><p>short</p><h2>Next</h2>");
        let options = LayoutOptions::default();
        let height = layout_document(&mut doc, &options);

        let nodes: Vec<NodeId> = doc.children(doc.root()).to_vec();
        let h1 = doc.layout(nodes[0]).unwrap();
        let p = doc.layout(nodes[1]).unwrap();
        let h2 = doc.layout(nodes[2]).unwrap();

        assert_eq!(h1, LayoutBox { top: 0.0, height: 48.0 });
        assert_eq!(p, LayoutBox { top: 64.0, height: 24.0 });
        assert_eq!(h2.top, 104.0);
        assert_eq!(height, 104.0 + 24.0 * 1.6);
    }

    #[test]
    fn test_long_text_wraps() {
        let mut doc = parse_html(&format!("<p>{}</p>", "word ".repeat(40)));
        let options = LayoutOptions {
            chars_per_line: 50,
            ..LayoutOptions::default()
        };
        layout_document(&mut doc, &options);
        let p = doc.children(doc.root())[0];
        // 40 four-letter words with single spaces = 199 chars = 4 lines
        assert_eq!(doc.layout(p).unwrap().height, 96.0);
    }

    #[test]
    fn test_hidden_elements_have_no_box() {
        let mut doc = parse_html("<head><title>t</title></head><body><p>x</p></body>");
        layout_document(&mut doc, &LayoutOptions::default());
        let head = doc.children(doc.root())[0];
        assert!(doc.layout(head).is_none());
    }

    #[test]
    fn test_out_of_flow_subtree_takes_no_space() {
        let mut doc = parse_html("<nav><ul><li>One</li><li>Two</li></ul></nav><h2>After</h2>");
        let nodes: Vec<NodeId> = doc.children(doc.root()).to_vec();
        let options = LayoutOptions::default();

        layout_document(&mut doc, &options);
        assert!(doc.layout(nodes[1]).unwrap().top > 0.0);

        let height = layout_document_excluding(&mut doc, &options, &[nodes[0]]);
        assert!(doc.layout(nodes[0]).is_none());
        assert_eq!(doc.layout(nodes[1]).unwrap().top, 0.0);
        assert_eq!(height, 24.0 * 1.6);
    }

    #[test]
    fn test_inline_elements_share_block_box() {
        let mut doc = parse_html("<h2>Hello <em>world</em></h2>");
        layout_document(&mut doc, &LayoutOptions::default());
        let h2 = doc.children(doc.root())[0];
        let em = doc.children(h2)[1];
        assert_eq!(doc.layout(em), doc.layout(h2));
    }
}
