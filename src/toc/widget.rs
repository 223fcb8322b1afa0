use log::{debug, info};
use serde::Serialize;

use crate::config::{validate_config, TocConfig};
use crate::dom::{Document, NodeId, Selector};
use crate::toc::builder::TocBuilder;
use crate::toc::model::{Toc, TocEntry};
use crate::toc::navigator::scroll_to_heading;
use crate::toc::throttle::FrameThrottle;
use crate::toc::tracker::ActiveTracker;
use crate::utils::error::BoxResult;
use crate::viewport::Viewport;

/// Lifecycle of a widget instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetState {
    /// Roots not resolved; nothing rendered, no listeners
    Uninitialized,
    /// Entries generated and bound to the page
    Active,
}

/// What the widget did with a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickOutcome {
    /// The browser's anchor navigation must not run
    pub default_prevented: bool,
}

/// Table of contents with scroll tracking, bound to one page.
///
/// Created with [`TocWidget::new`], bound with [`TocWidget::start`], and
/// detached with [`TocWidget::stop`]. When the content root or container
/// cannot be found, `start` leaves the widget inert without reporting an
/// error.
#[derive(Debug)]
pub struct TocWidget {
    config: TocConfig,
    builder: TocBuilder,
    content_selector: Selector,
    container_selector: Selector,
    state: WidgetState,
    roots: Option<(NodeId, NodeId)>,
    /// Roots failed to resolve on the first `start`; the widget never binds
    inert: bool,
    toc: Toc,
    tracker: ActiveTracker,
    throttle: FrameThrottle,
    listening: bool,
}

impl TocWidget {
    /// Validate the configuration and create an unbound widget
    pub fn new(config: TocConfig) -> BoxResult<Self> {
        validate_config(&config)?;
        let builder = TocBuilder::from_config(&config)?;
        let content_selector = Selector::parse(&config.content_selector)?;
        let container_selector = Selector::parse(&config.container_selector)?;
        let tracker = ActiveTracker::new(Vec::new(), &config.markup.active_class);

        Ok(TocWidget {
            config,
            builder,
            content_selector,
            container_selector,
            state: WidgetState::Uninitialized,
            roots: None,
            inert: false,
            toc: Toc::default(),
            tracker,
            throttle: FrameThrottle::new(),
            listening: false,
        })
    }

    pub fn config(&self) -> &TocConfig {
        &self.config
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn toc(&self) -> &Toc {
        &self.toc
    }

    pub fn entries(&self) -> &[TocEntry] {
        &self.toc.entries
    }

    pub fn active_entry(&self) -> Option<&TocEntry> {
        self.tracker.active()
    }

    pub fn throttle(&self) -> &FrameThrottle {
        &self.throttle
    }

    /// The container the entries are rendered into, once bound
    pub fn container(&self) -> Option<NodeId> {
        self.roots.map(|(_, container)| container)
    }

    /// Resolve the roots, generate entries, attach listeners and compute the
    /// initial active entry.
    ///
    /// Calling `start` on a stopped widget re-attaches it without
    /// regenerating. Missing roots leave the widget `Uninitialized` for good;
    /// later calls do not look the roots up again.
    pub fn start<V: Viewport + ?Sized>(&mut self, doc: &mut Document, viewport: &V) -> WidgetState {
        if self.inert {
            return self.state;
        }
        if self.state == WidgetState::Active {
            if !self.listening {
                self.listening = true;
                self.recompute(doc, viewport);
            }
            return self.state;
        }

        let root = doc.root();
        let content = self.content_selector.query_first(doc, root);
        let container = self.container_selector.query_first(doc, root);
        let (content, container) = match (content, container) {
            (Some(content), Some(container)) => (content, container),
            _ => {
                self.inert = true;
                if self.config.debug {
                    debug!(
                        "Content root ({}) or container ({}) not found; widget stays inert",
                        self.content_selector, self.container_selector
                    );
                }
                return self.state;
            }
        };

        self.roots = Some((content, container));
        self.state = WidgetState::Active;
        self.rebuild(doc);
        self.listening = true;
        self.recompute(doc, viewport);

        info!("Table of contents started with {} entries", self.toc.len());
        self.state
    }

    /// Detach listeners and drop any pending frame. Generated markup and the
    /// current active marker stay in place.
    pub fn stop(&mut self) {
        if self.listening {
            debug!("Table of contents listeners detached");
        }
        self.listening = false;
        self.throttle.cancel();
    }

    /// Rebuild the entries from the current content and recompute the
    /// active entry. No-op unless the widget is active.
    pub fn regenerate<V: Viewport + ?Sized>(&mut self, doc: &mut Document, viewport: &V) {
        if self.state != WidgetState::Active {
            return;
        }
        self.rebuild(doc);
        self.recompute(doc, viewport);
    }

    /// Scroll listener: schedule a recomputation for the next frame.
    /// Returns `false` when not listening or when folded into a pending one.
    pub fn on_scroll(&mut self) -> bool {
        self.listening && self.throttle.request()
    }

    /// Frame callback: run the pending recomputation, if any
    pub fn on_animation_frame<V: Viewport + ?Sized>(&mut self, doc: &mut Document, viewport: &V) -> bool {
        if !self.listening || !self.throttle.take() {
            return false;
        }
        self.recompute(doc, viewport);
        true
    }

    /// Click listener: a click on (or inside) one of the entry links is
    /// taken over and turned into a centering scroll.
    pub fn on_click<V: Viewport + ?Sized>(
        &mut self,
        doc: &mut Document,
        viewport: &mut V,
        target: NodeId,
    ) -> ClickOutcome {
        if !self.listening {
            return ClickOutcome::default();
        }
        let link = match self.entry_link_for(doc, target) {
            Some(link) => link,
            None => return ClickOutcome::default(),
        };

        let id = doc
            .attr(link, &self.config.markup.target_attribute)
            .unwrap_or_default()
            .to_string();
        let scrolled = scroll_to_heading(doc, viewport, &id, self.config.scroll_offset);
        if self.config.debug {
            debug!("Entry {:?} clicked, scroll target {:?}", id, scrolled);
        }

        ClickOutcome { default_prevented: true }
    }

    /// The entry link that is `node` or contains it
    fn entry_link_for(&self, doc: &Document, node: NodeId) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.toc.entry_by_link(candidate).is_some() {
                return Some(candidate);
            }
            current = doc.parent(candidate);
        }
        None
    }

    fn rebuild(&mut self, doc: &mut Document) {
        let (content, container) = match self.roots {
            Some(roots) => roots,
            None => return,
        };
        self.toc = self.builder.generate(doc, content, container);
        self.tracker = ActiveTracker::new(self.toc.entries.clone(), &self.config.markup.active_class)
            .with_tracing(self.config.debug);
    }

    fn recompute<V: Viewport + ?Sized>(&mut self, doc: &mut Document, viewport: &V) {
        self.tracker.update(doc, &self.toc.headings, viewport);
    }
}
