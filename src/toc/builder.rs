use std::collections::HashSet;

use log::{debug, warn};

use crate::config::{MarkupConfig, TocConfig};
use crate::dom::{Document, NodeId, Selector};
use crate::toc::heading::{heading_level, top_level};
use crate::toc::id::generate_id;
use crate::toc::model::{relative_level, HeadingRecord, Toc, TocEntry};
use crate::utils::error::TocError;

/// Builds the flat entry list for one content root
#[derive(Debug, Clone)]
pub struct TocBuilder {
    heading_selector: Selector,
    min_level: u8,
    max_level: u8,
    no_toc_class: String,
    markup: MarkupConfig,
}

impl TocBuilder {
    pub fn from_config(config: &TocConfig) -> Result<Self, TocError> {
        Ok(TocBuilder {
            heading_selector: Selector::parse(&config.heading_selector)?,
            min_level: config.min_level,
            max_level: config.max_level,
            no_toc_class: config.no_toc_class.clone(),
            markup: config.markup.clone(),
        })
    }

    pub fn markup(&self) -> &MarkupConfig {
        &self.markup
    }

    /// Headings under `content` in document order, after the level window and
    /// the exclusion class are applied
    pub fn discover(&self, doc: &Document, content: NodeId) -> Vec<(NodeId, u8)> {
        self.heading_selector
            .query_all(doc, content)
            .into_iter()
            .filter_map(|node| heading_level(doc, node).map(|level| (node, level)))
            .filter(|&(_, level)| level >= self.min_level && level <= self.max_level)
            .filter(|&(node, _)| self.no_toc_class.is_empty() || !doc.has_class(node, &self.no_toc_class))
            .collect()
    }

    /// Rebuild the list inside `container` from the headings under `content`.
    ///
    /// Existing container content is replaced, so repeated calls on the same
    /// document produce the same list. Headings without an `id` get one
    /// derived from their text.
    pub fn generate(&self, doc: &mut Document, content: NodeId, container: NodeId) -> Toc {
        let found = self.discover(doc, content);

        doc.clear_children(container);
        if found.is_empty() {
            debug!("No headings found, table of contents left empty");
            return Toc::default();
        }

        let baseline = top_level(found.iter().map(|&(_, level)| level)).unwrap_or(1);
        let headings = self.assign_identifiers(doc, &found);

        let list = doc.create_element("ul");
        doc.set_attr(list, "class", &self.markup.list_class);

        let entries: Vec<TocEntry> = headings
            .iter()
            .map(|heading| {
                let entry = self.build_item(doc, heading, relative_level(heading.level, baseline));
                doc.append_child(list, entry.item);
                entry
            })
            .collect();

        doc.append_child(container, list);
        debug!(
            "Generated {} entries (baseline h{})",
            entries.len(),
            baseline
        );

        Toc { headings, entries }
    }

    fn assign_identifiers(&self, doc: &mut Document, found: &[(NodeId, u8)]) -> Vec<HeadingRecord> {
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(found.len());

        for &(node, level) in found {
            let label = doc
                .text_content(node)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");

            let id = match doc.attr(node, "id").filter(|id| !id.is_empty()) {
                Some(existing) => existing.to_string(),
                None => {
                    let generated = generate_id(&label);
                    if !generated.is_empty() {
                        doc.set_attr(node, "id", &generated);
                    }
                    generated
                }
            };

            // Lookups by identifier resolve to the first match; surface it
            if id.is_empty() {
                warn!("Heading {:?} has no usable identifier; its entry cannot navigate", label);
            } else if !seen.insert(id.clone()) {
                warn!("Duplicate heading identifier {:?}; links resolve to its first occurrence", id);
            }

            records.push(HeadingRecord { node, id, label, level });
        }

        records
    }

    fn build_item(&self, doc: &mut Document, heading: &HeadingRecord, level: u8) -> TocEntry {
        let markup = &self.markup;

        let item = doc.create_element("li");
        doc.set_attr(
            item,
            "class",
            &format!("{} {}{}", markup.item_class, markup.level_class_prefix, level),
        );

        if level >= 2 {
            let marker = doc.create_element("span");
            doc.set_attr(marker, "class", &markup.marker_class);
            doc.set_attr(marker, "aria-hidden", "true");
            doc.append_child(item, marker);
        }

        let link = doc.create_element("a");
        doc.set_attr(link, "class", &markup.link_class);
        doc.set_attr(link, "href", &format!("#{}", heading.id));
        doc.set_attr(link, &markup.target_attribute, &heading.id);
        let text = doc.create_text(&heading.label);
        doc.append_child(link, text);
        doc.append_child(item, link);

        TocEntry {
            id: heading.id.clone(),
            label: heading.label.clone(),
            level,
            item,
            link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{outer_html, parse_html};

    fn setup(html: &str) -> (Document, NodeId, NodeId) {
        let doc = parse_html(html);
        let content = Selector::parse("[data-toc-content]").unwrap().query_first(&doc, doc.root()).unwrap();
        let container = Selector::parse("[data-toc-container]").unwrap().query_first(&doc, doc.root()).unwrap();
        (doc, content, container)
    }

    fn builder() -> TocBuilder {
        TocBuilder::from_config(&TocConfig::default()).unwrap()
    }

    #[test]
    fn test_levels_are_normalized_to_shallowest() {
        let (mut doc, content, container) = setup(
            "<nav data-toc-container></nav><main data-toc-content>\
             <h3>A</h3><h4>B</h4><h3>C</h3><h5>D</h5></main>",
        );
        let toc = builder().generate(&mut doc, content, container);
        let levels: Vec<u8> = toc.entries.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![1, 2, 1, 3]);
        assert_eq!(toc.headings.len(), toc.entries.len());
    }

    #[test]
    fn test_generated_markup() {
        let (mut doc, content, container) = setup(
            "<nav data-toc-container></nav><main data-toc-content>\
             <h2 id=\"intro\">Intro</h2><h3>Section One: Overview!</h3></main>",
        );
        builder().generate(&mut doc, content, container);

        assert_eq!(
            outer_html(&doc, container),
            "<nav data-toc-container><ul class=\"toc-list\">\
             <li class=\"toc-item toc-level-1\"><a class=\"toc-link\" href=\"#intro\" data-toc-target=\"intro\">Intro</a></li>\
             <li class=\"toc-item toc-level-2\"><span class=\"toc-marker\" aria-hidden=\"true\"></span>\
             <a class=\"toc-link\" href=\"#section-one-overview\" data-toc-target=\"section-one-overview\">Section One: Overview!</a></li>\
             </ul></nav>"
        );
    }

    #[test]
    fn test_missing_ids_are_written_back() {
        let (mut doc, content, container) = setup(
            "<div data-toc-container></div><div data-toc-content><h2>Getting  Started</h2></div>",
        );
        let toc = builder().generate(&mut doc, content, container);
        let heading = toc.headings[0].node;
        assert_eq!(doc.attr(heading, "id"), Some("getting-started"));
        assert_eq!(toc.entries[0].label, "Getting Started");
        assert_eq!(doc.get_element_by_id("getting-started"), Some(heading));
    }

    #[test]
    fn test_regeneration_replaces_entries() {
        let (mut doc, content, container) = setup(
            "<div data-toc-container><p>placeholder</p></div>\
             <div data-toc-content><h1>One</h1><h2>Two</h2></div>",
        );
        let b = builder();
        let first = b.generate(&mut doc, content, container);
        let first_html = outer_html(&doc, container);
        let second = b.generate(&mut doc, content, container);

        assert_eq!(doc.children(container).len(), 1);
        assert_eq!(outer_html(&doc, container), first_html);
        let ids = |t: &Toc| t.entries.iter().map(|e| e.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        assert!(!first_html.contains("placeholder"));
    }

    #[test]
    fn test_empty_content_clears_container() {
        let (mut doc, content, container) = setup(
            "<div data-toc-container><ul><li>stale</li></ul></div><div data-toc-content><p>No headings</p></div>",
        );
        let toc = builder().generate(&mut doc, content, container);
        assert!(toc.is_empty());
        assert!(doc.children(container).is_empty());
    }

    #[test]
    fn test_level_window_and_no_toc_class() {
        let (mut doc, content, container) = setup(
            "<div data-toc-container></div><div data-toc-content>\
             <h1>Title</h1><h2 class=\"no_toc\">Skip</h2><h2>Keep</h2><h4>Deep</h4></div>",
        );
        let config = TocConfig {
            min_level: 2,
            max_level: 3,
            ..TocConfig::default()
        };
        let toc = TocBuilder::from_config(&config).unwrap().generate(&mut doc, content, container);
        let labels: Vec<&str> = toc.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Keep"]);
        assert_eq!(toc.entries[0].level, 1);
    }

    #[test]
    fn test_duplicate_and_empty_identifiers_still_get_entries() {
        let (mut doc, content, container) = setup(
            "<div data-toc-container></div><div data-toc-content>\
             <h2>Notes</h2><h2>Notes</h2><h2>!!!</h2></div>",
        );
        let toc = builder().generate(&mut doc, content, container);
        let ids: Vec<&str> = toc.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["notes", "notes", ""]);
        assert_eq!(doc.attr(toc.headings[2].node, "id"), None);
    }
}
