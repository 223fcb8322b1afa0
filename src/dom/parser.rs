use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::dom::node::{Document, NodeId};

lazy_static! {
    static ref TOKEN_REGEX: Regex = Regex::new(
        r#"(?s)<!--(.*?)-->|<!([^>]*)>|</\s*([A-Za-z][A-Za-z0-9-]*)\s*>|<([A-Za-z][A-Za-z0-9-]*)((?:\s+[^\s"'>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'=<>`]+))?)*)\s*(/?)>"#
    ).unwrap();

    static ref ATTR_REGEX: Regex = Regex::new(
        r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#
    ).unwrap();
}

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Elements whose start tag implicitly closes an open `<p>`
const CLOSES_PARAGRAPH: [&str; 20] = [
    "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "footer", "form", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "nav", "ol", "ul",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

pub fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

/// Parse HTML into a [`Document`].
///
/// Lenient by construction: malformed markup never fails, stray end tags are
/// dropped, and elements left open at the end are closed implicitly.
pub fn parse_html(html: &str) -> Document {
    let mut doc = Document::new();
    let mut stack: Vec<NodeId> = vec![doc.root()];
    let mut pos = 0;

    while let Some(cap) = TOKEN_REGEX.captures_at(html, pos) {
        let whole = match cap.get(0) {
            Some(m) => m,
            None => break,
        };
        push_text(&mut doc, &stack, &html[pos..whole.start()]);
        pos = whole.end();

        if let Some(comment) = cap.get(1) {
            let node = doc.create_comment(comment.as_str());
            append(&mut doc, &stack, node);
        } else if let Some(decl) = cap.get(2) {
            let node = doc.create_doctype(decl.as_str());
            append(&mut doc, &stack, node);
        } else if let Some(end) = cap.get(3) {
            close_element(&doc, &mut stack, &end.as_str().to_ascii_lowercase());
        } else if let Some(start) = cap.get(4) {
            let tag = start.as_str().to_ascii_lowercase();
            let self_closing = cap.get(6).map_or(false, |m| !m.as_str().is_empty());

            implicit_close(&doc, &mut stack, &tag);

            let node = doc.create_element(&tag);
            if let Some(attrs) = cap.get(5) {
                for attr in ATTR_REGEX.captures_iter(attrs.as_str()) {
                    let value = attr
                        .get(2)
                        .or_else(|| attr.get(3))
                        .or_else(|| attr.get(4))
                        .map_or("", |m| m.as_str());
                    doc.set_attr(node, &attr[1], &html_escape::decode_html_entities(value));
                }
            }
            append(&mut doc, &stack, node);

            if self_closing || is_void_element(&tag) {
                continue;
            }

            if is_raw_text_element(&tag) {
                let (raw, next) = read_raw_text(html, pos, &tag);
                if !raw.is_empty() {
                    let text = doc.create_text(raw);
                    doc.append_child(node, text);
                }
                pos = next;
                continue;
            }

            stack.push(node);
        }
    }

    push_text(&mut doc, &stack, &html[pos..]);
    trace!("Parsed document with {} nodes", doc.descendants(doc.root()).len());
    doc
}

fn append(doc: &mut Document, stack: &[NodeId], node: NodeId) {
    let parent = *stack.last().unwrap_or(&0);
    doc.append_child(parent, node);
}

fn push_text(doc: &mut Document, stack: &[NodeId], raw: &str) {
    if raw.is_empty() {
        return;
    }
    let decoded = html_escape::decode_html_entities(raw);
    let node = doc.create_text(&decoded);
    append(doc, stack, node);
}

fn close_element(doc: &Document, stack: &mut Vec<NodeId>, tag: &str) {
    // Never pop the document root at index 0
    if let Some(index) = stack
        .iter()
        .rposition(|&n| doc.tag_name(n) == Some(tag))
        .filter(|&i| i > 0)
    {
        stack.truncate(index);
    } else {
        trace!("Ignoring unmatched end tag </{}>", tag);
    }
}

fn implicit_close(doc: &Document, stack: &mut Vec<NodeId>, tag: &str) {
    let top = stack.last().and_then(|&n| doc.tag_name(n));
    let should_close = match (top, tag) {
        (Some("p"), t) if CLOSES_PARAGRAPH.contains(&t) || t == "p" => true,
        (Some("li"), "li") => true,
        (Some("dt"), "dt" | "dd") | (Some("dd"), "dt" | "dd") => true,
        _ => false,
    };
    if should_close && stack.len() > 1 {
        stack.pop();
    }
}

/// Raw text of a `script`/`style`-like element up to its end tag; returns the
/// text and the position after the end tag
fn read_raw_text<'a>(html: &'a str, start: usize, tag: &str) -> (&'a str, usize) {
    let rest = &html[start..];
    let needle = format!("</{}", tag);
    // ASCII lowercasing keeps byte offsets aligned with the original
    match rest.to_ascii_lowercase().find(&needle) {
        Some(offset) => {
            let after = &rest[offset..];
            let close = after.find('>').map_or(after.len(), |i| i + 1);
            (&rest[..offset], start + offset + close)
        }
        None => (rest, html.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let doc = parse_html(
            r#"<main data-toc-content><h2 id="intro" class="title">Intro &amp; setup</h2><p>Text</p></main>"#,
        );
        let main = doc.children(doc.root())[0];
        assert_eq!(doc.tag_name(main), Some("main"));
        assert_eq!(doc.attr(main, "data-toc-content"), Some(""));

        let heading = doc.children(main)[0];
        assert_eq!(doc.attr(heading, "id"), Some("intro"));
        assert_eq!(doc.text_content(heading), "Intro & setup");
        assert_eq!(doc.children(main).len(), 2);
    }

    #[test]
    fn test_void_and_self_closing_elements() {
        let doc = parse_html("<div><img src=a.png><br/><span>x</span></div>");
        let div = doc.children(doc.root())[0];
        let tags: Vec<_> = doc
            .children(div)
            .iter()
            .map(|&c| doc.tag_name(c).unwrap())
            .collect();
        assert_eq!(tags, vec!["img", "br", "span"]);
    }

    #[test]
    fn test_script_content_is_raw() {
        let doc = parse_html("<script>if (a < b) { x = '<h1>'; }</script><h1>Real</h1>");
        let script = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(script), "if (a < b) { x = '<h1>'; }");
        let h1 = doc.children(doc.root())[1];
        assert_eq!(doc.tag_name(h1), Some("h1"));
    }

    #[test]
    fn test_implicit_paragraph_and_list_closing() {
        let doc = parse_html("<ul><li>one<li>two</ul><p>a<h2>b</h2>");
        let ul = doc.children(doc.root())[0];
        assert_eq!(doc.children(ul).len(), 2);
        // The heading is a sibling of the paragraph, not its child
        assert_eq!(doc.children(doc.root()).len(), 3);
    }

    #[test]
    fn test_stray_end_tags_are_ignored() {
        let doc = parse_html("</div><section>ok</span></section>");
        let section = doc.children(doc.root())[0];
        assert_eq!(doc.tag_name(section), Some("section"));
        assert_eq!(doc.text_content(section), "ok");
    }
}
