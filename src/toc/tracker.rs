use log::debug;

use crate::dom::Document;
use crate::toc::heading::heading_center;
use crate::toc::model::{HeadingRecord, TocEntry};
use crate::viewport::Viewport;

/// Index of the heading closest above (or at) `viewport_center`.
///
/// Only centers `<= viewport_center` qualify; the smallest distance wins and
/// ties go to the earliest heading. `None` when the viewport is above every
/// heading.
pub fn select_active(centers: &[f64], viewport_center: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &center) in centers.iter().enumerate() {
        if center > viewport_center {
            continue;
        }
        let distance = viewport_center - center;
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// Owns the single active marker over a set of entries
#[derive(Debug, Clone)]
pub struct ActiveTracker {
    entries: Vec<TocEntry>,
    active_class: String,
    active: Option<usize>,
    trace_changes: bool,
}

impl ActiveTracker {
    pub fn new(entries: Vec<TocEntry>, active_class: &str) -> Self {
        ActiveTracker {
            entries,
            active_class: active_class.to_string(),
            active: None,
            trace_changes: false,
        }
    }

    /// Log every change of the active entry at debug level
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.trace_changes = enabled;
        self
    }

    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    pub fn active(&self) -> Option<&TocEntry> {
        self.active.and_then(|i| self.entries.get(i))
    }

    /// Recompute the active entry from live heading positions.
    ///
    /// Full recomputation on every call: every entry loses the active class,
    /// then at most one entry (the first bound to the selected heading's
    /// identifier) gets it back.
    pub fn update<V: Viewport + ?Sized>(
        &mut self,
        doc: &mut Document,
        headings: &[HeadingRecord],
        viewport: &V,
    ) -> Option<&TocEntry> {
        let centers: Vec<f64> = headings
            .iter()
            .map(|h| heading_center(doc, h.node, viewport))
            .collect();
        let selected = select_active(&centers, viewport.center()).map(|i| &headings[i]);
        self.apply(doc, selected.map(|h| h.id.as_str()))
    }

    /// Mark the first entry bound to `id` active and clear all others
    pub fn apply(&mut self, doc: &mut Document, id: Option<&str>) -> Option<&TocEntry> {
        for entry in &self.entries {
            doc.remove_class(entry.link, &self.active_class);
        }

        let next = id.and_then(|id| self.entries.iter().position(|e| e.id == id));
        if let Some(index) = next {
            doc.add_class(self.entries[index].link, &self.active_class);
        }

        if next != self.active && self.trace_changes {
            debug!(
                "Active entry: {}",
                next.map_or("<none>", |i| self.entries[i].id.as_str())
            );
        }
        self.active = next;
        self.active()
    }

    /// Drop the active marker entirely
    pub fn clear(&mut self, doc: &mut Document) {
        self.apply(doc, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TocConfig;
    use crate::dom::{parse_html, LayoutBox, Selector};
    use crate::toc::builder::TocBuilder;
    use crate::toc::model::Toc;
    use crate::viewport::HeadlessViewport;

    #[test]
    fn test_closest_above_selection() {
        let centers = [100.0, 300.0, 500.0];
        assert_eq!(select_active(&centers, 320.0), Some(1));
        assert_eq!(select_active(&centers, 50.0), None);
        assert_eq!(select_active(&centers, 500.0), Some(2));
        assert_eq!(select_active(&centers, 10_000.0), Some(2));
        assert_eq!(select_active(&[], 320.0), None);
    }

    #[test]
    fn test_ties_prefer_document_order() {
        assert_eq!(select_active(&[200.0, 200.0, 100.0], 250.0), Some(0));
    }

    #[test]
    fn test_unsorted_centers() {
        // A later heading may sit higher after reflow; distance decides
        assert_eq!(select_active(&[300.0, 100.0, 280.0], 290.0), Some(2));
    }

    fn page() -> (Document, Toc) {
        let mut doc = parse_html(
            "<nav data-toc-container></nav><main data-toc-content>\
             <h2>Alpha</h2><h2>Beta</h2><h2>Gamma</h2></main>",
        );
        let content = Selector::parse("[data-toc-content]").unwrap().query_first(&doc, doc.root()).unwrap();
        let container = Selector::parse("[data-toc-container]").unwrap().query_first(&doc, doc.root()).unwrap();
        let toc = TocBuilder::from_config(&TocConfig::default())
            .unwrap()
            .generate(&mut doc, content, container);
        for (heading, top) in toc.headings.iter().zip([90.0, 290.0, 490.0]) {
            doc.set_layout(heading.node, LayoutBox { top, height: 20.0 });
        }
        (doc, toc)
    }

    fn active_count(doc: &Document, toc: &Toc) -> usize {
        toc.entries.iter().filter(|e| doc.has_class(e.link, "active")).count()
    }

    #[test]
    fn test_update_marks_single_entry() {
        let (mut doc, toc) = page();
        let mut tracker = ActiveTracker::new(toc.entries.clone(), "active");
        let mut viewport = HeadlessViewport::new(200.0, 2000.0);

        // Center 100: Alpha (center 100) qualifies
        let active = tracker.update(&mut doc, &toc.headings, &viewport).map(|e| e.id.clone());
        assert_eq!(active.as_deref(), Some("alpha"));
        assert_eq!(active_count(&doc, &toc), 1);

        viewport.user_scroll(220.0); // center 320
        tracker.update(&mut doc, &toc.headings, &viewport);
        assert_eq!(tracker.active().map(|e| e.id.as_str()), Some("beta"));
        assert!(!doc.has_class(toc.entries[0].link, "active"));
        assert_eq!(active_count(&doc, &toc), 1);
    }

    #[test]
    fn test_no_heading_above_viewport_center() {
        let (mut doc, toc) = page();
        for heading in &toc.headings {
            doc.set_layout(heading.node, LayoutBox { top: 1000.0, height: 20.0 });
        }
        let mut tracker = ActiveTracker::new(toc.entries.clone(), "active");
        let viewport = HeadlessViewport::new(100.0, 2000.0);
        tracker.apply(&mut doc, Some("gamma"));

        assert!(tracker.update(&mut doc, &toc.headings, &viewport).is_none());
        assert_eq!(active_count(&doc, &toc), 0);
    }

    #[test]
    fn test_at_most_one_active_after_any_update() {
        let (mut doc, toc) = page();
        let mut tracker = ActiveTracker::new(toc.entries.clone(), "active");
        let mut viewport = HeadlessViewport::new(200.0, 2000.0);
        for y in [0.0, 15.0, 150.0, 333.0, 700.0, 1800.0, 40.0] {
            viewport.user_scroll(y);
            tracker.update(&mut doc, &toc.headings, &viewport);
            assert!(active_count(&doc, &toc) <= 1);
        }
    }

    #[test]
    fn test_empty_tracker_is_a_no_op() {
        let mut doc = Document::new();
        let mut tracker = ActiveTracker::new(Vec::new(), "active");
        let viewport = HeadlessViewport::new(800.0, 0.0);
        assert!(tracker.update(&mut doc, &[], &viewport).is_none());
        assert!(tracker.apply(&mut doc, Some("missing")).is_none());
    }
}
