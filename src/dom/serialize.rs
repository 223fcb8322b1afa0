use crate::dom::node::{Document, NodeId, NodeKind};
use crate::dom::parser::{is_raw_text_element, is_void_element};

/// Serialize the whole document back to HTML
pub fn to_html(doc: &Document) -> String {
    let mut html = String::new();
    for &child in doc.children(doc.root()) {
        write_node(doc, child, false, &mut html);
    }
    html
}

/// Serialize a single node and its subtree
pub fn outer_html(doc: &Document, id: NodeId) -> String {
    let mut html = String::new();
    write_node(doc, id, false, &mut html);
    html
}

fn write_node(doc: &Document, id: NodeId, raw: bool, out: &mut String) {
    match &doc.node(id).kind {
        NodeKind::Document => {
            for &child in doc.children(id) {
                write_node(doc, child, false, out);
            }
        }
        NodeKind::Doctype(decl) => {
            out.push_str("<!");
            out.push_str(decl);
            out.push('>');
        }
        NodeKind::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeKind::Text(text) if raw => out.push_str(text),
        NodeKind::Text(text) => out.push_str(&html_escape::encode_text(text)),
        NodeKind::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (name, value) in &element.attrs {
                out.push(' ');
                out.push_str(name);
                if !value.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(value));
                    out.push('"');
                }
            }
            out.push('>');

            if is_void_element(&element.tag) {
                return;
            }

            let raw_children = is_raw_text_element(&element.tag);
            for &child in doc.children(id) {
                write_node(doc, child, raw_children, out);
            }

            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }
    }
}
