use std::collections::VecDeque;

use log::{debug, trace};
use serde::Serialize;

use crate::config::ViewportConfig;
use crate::dom::{layout_document, layout_document_excluding, parse_html, Document, NodeId};
use crate::toc::TocWidget;
use crate::viewport::{HeadlessViewport, ScrollBehavior, Viewport};

/// Events the page raises towards the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// The scroll position changed
    Scroll,
    /// The user clicked on a node
    Click(NodeId),
}

/// Summary of one [`Page::settle`] pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SettleReport {
    pub scroll_events: usize,
    pub clicks: usize,
    /// Clicks whose default anchor navigation ran
    pub default_navigations: usize,
    /// Whether the frame callback recomputed the active entry
    pub recomputed: bool,
}

/// A headless browser tab: document, window and a single-threaded event
/// queue. Events are dispatched in order; one animation frame follows once
/// the queue is drained.
#[derive(Debug)]
pub struct Page {
    pub document: Document,
    pub viewport: HeadlessViewport,
    queue: VecDeque<PageEvent>,
}

impl Page {
    pub fn new(document: Document, viewport: HeadlessViewport) -> Self {
        Page {
            document,
            viewport,
            queue: VecDeque::new(),
        }
    }

    /// Parse and lay out `html` in a window of the configured size
    pub fn from_html(html: &str, config: &ViewportConfig) -> Self {
        let mut document = parse_html(html);
        let height = layout_document(&mut document, &config.layout_options());
        let viewport = HeadlessViewport::new(config.height, height);
        Page::new(document, viewport)
    }

    /// Recompute layout, e.g. after content changed. The widget's container
    /// is an out-of-flow sidebar, so its entries never move the headings.
    pub fn relayout(&mut self, config: &ViewportConfig, widget: &TocWidget) {
        let out_of_flow: Vec<NodeId> = widget.container().into_iter().collect();
        let height = layout_document_excluding(&mut self.document, &config.layout_options(), &out_of_flow);
        self.viewport.set_document_height(height);
        self.collect_scroll_events();
    }

    /// Scroll as the user would
    pub fn scroll(&mut self, y: f64) {
        self.viewport.user_scroll(y);
        self.collect_scroll_events();
    }

    pub fn click(&mut self, node: NodeId) {
        self.queue.push_back(PageEvent::Click(node));
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Dispatch queued events to the widget, then deliver one frame
    pub fn settle(&mut self, widget: &mut TocWidget) -> SettleReport {
        let mut report = SettleReport::default();

        while let Some(event) = self.queue.pop_front() {
            trace!("Dispatching {:?}", event);
            match event {
                PageEvent::Scroll => {
                    report.scroll_events += 1;
                    widget.on_scroll();
                }
                PageEvent::Click(node) => {
                    report.clicks += 1;
                    let outcome = widget.on_click(&mut self.document, &mut self.viewport, node);
                    if !outcome.default_prevented && self.follow_anchor(node) {
                        report.default_navigations += 1;
                    }
                }
            }
            self.collect_scroll_events();
        }

        report.recomputed = widget.on_animation_frame(&mut self.document, &self.viewport);
        report
    }

    /// Default action of a click inside an `href="#id"` anchor: jump so the
    /// target's top edge meets the viewport's top edge
    fn follow_anchor(&mut self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.document.tag_name(candidate) == Some("a") {
                break;
            }
            current = self.document.parent(candidate);
        }

        let fragment = match current
            .and_then(|a| self.document.attr(a, "href"))
            .and_then(|href| href.strip_prefix('#'))
        {
            Some(fragment) if !fragment.is_empty() => fragment.to_string(),
            _ => return false,
        };

        match self.document.get_element_by_id(&fragment) {
            Some(target) => {
                let top = self
                    .document
                    .bounding_client_rect(target, self.viewport.scroll_y())
                    .top
                    + self.viewport.scroll_y();
                debug!("Following anchor #{} to {:.0}", fragment, top);
                self.viewport.scroll_to(top, ScrollBehavior::Auto);
                true
            }
            None => false,
        }
    }

    fn collect_scroll_events(&mut self) {
        for _ in 0..self.viewport.take_position_changes() {
            self.queue.push_back(PageEvent::Scroll);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TocConfig;
    use crate::toc::WidgetState;

    fn sample_html() -> String {
        let filler = "<p>".to_string() + &"lorem ipsum ".repeat(200) + "</p>";
        format!(
            "<nav data-toc-container></nav><main data-toc-content>\
             <h1>Guide</h1>{f}<h2>Install</h2>{f}<h2>Configure</h2>{f}<h3>Advanced</h3>{f}</main>\
             <footer><a id=\"plain\" href=\"#install\">Install</a></footer>",
            f = filler
        )
    }

    fn started() -> (Page, TocWidget) {
        // Whole-pixel line boxes keep the geometry exact
        let mut config = TocConfig::default();
        config.viewport.line_height = 20.0;
        let mut page = Page::from_html(&sample_html(), &config.viewport);
        let mut widget = TocWidget::new(config).unwrap();
        assert_eq!(widget.start(&mut page.document, &page.viewport), WidgetState::Active);
        (page, widget)
    }

    fn active(widget: &TocWidget) -> Option<String> {
        widget.active_entry().map(|e| e.id.clone())
    }

    #[test]
    fn test_initial_state_on_load() {
        let (_, widget) = started();
        assert_eq!(active(&widget).as_deref(), Some("guide"));
    }

    #[test]
    fn test_scroll_bursts_recompute_once_per_frame() {
        let (mut page, mut widget) = started();
        page.scroll(500.0);
        page.scroll(1200.0);
        page.scroll(1900.0);

        let report = page.settle(&mut widget);
        assert_eq!(report.scroll_events, 3);
        assert!(report.recomputed);
        assert_eq!(widget.throttle().coalesced(), 2);

        let center = page.viewport.center();
        let expected = widget
            .toc()
            .headings
            .iter()
            .filter(|h| crate::toc::heading_center(&page.document, h.node, &page.viewport) <= center)
            .last()
            .map(|h| h.id.clone());
        assert_eq!(active(&widget), expected);
    }

    #[test]
    fn test_entry_click_scrolls_smoothly_and_updates_active() {
        let (mut page, mut widget) = started();
        let link = widget.toc().entry_for("configure").unwrap().link;
        page.click(link);

        let report = page.settle(&mut widget);
        assert_eq!(report.clicks, 1);
        assert_eq!(report.default_navigations, 0);
        assert_eq!(report.scroll_events, 1);
        assert!(report.recomputed);

        let request = page.viewport.requests()[0];
        assert_eq!(request.behavior, ScrollBehavior::Smooth);
        assert_eq!(active(&widget).as_deref(), Some("configure"));
    }

    #[test]
    fn test_plain_anchor_keeps_default_navigation() {
        let (mut page, mut widget) = started();
        let plain = page.document.get_element_by_id("plain").unwrap();
        page.click(plain);

        let report = page.settle(&mut widget);
        assert_eq!(report.default_navigations, 1);
        assert_eq!(page.viewport.requests()[0].behavior, ScrollBehavior::Auto);
    }

    #[test]
    fn test_relayout_keeps_heading_positions() {
        let (mut page, widget) = started();
        let centers = |page: &Page| -> Vec<f64> {
            widget
                .toc()
                .headings
                .iter()
                .map(|h| crate::toc::heading_center(&page.document, h.node, &page.viewport))
                .collect()
        };
        let before = centers(&page);

        page.relayout(&widget.config().viewport, &widget);
        assert_eq!(centers(&page), before);
        let container = widget.container().unwrap();
        assert!(page.document.layout(container).is_none());
    }

    #[test]
    fn test_idle_frame_does_nothing() {
        let (mut page, mut widget) = started();
        let report = page.settle(&mut widget);
        assert_eq!(report, SettleReport::default());
    }
}
