use log::trace;
use serde::Serialize;

use super::{ScrollBehavior, Viewport};

/// A programmatic scroll as issued by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollRequest {
    pub target: f64,
    pub behavior: ScrollBehavior,
}

/// In-memory window used by the CLI and tests.
///
/// Scroll positions are clamped to `[0, document_height - height]` the way a
/// browser clamps them, and smooth scrolls land on their destination
/// immediately.
#[derive(Debug, Clone)]
pub struct HeadlessViewport {
    scroll_y: f64,
    height: f64,
    document_height: f64,
    requests: Vec<ScrollRequest>,
    position_changes: usize,
}

impl HeadlessViewport {
    pub fn new(height: f64, document_height: f64) -> Self {
        HeadlessViewport {
            scroll_y: 0.0,
            height,
            document_height,
            requests: Vec::new(),
            position_changes: 0,
        }
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.height).max(0.0)
    }

    pub fn set_document_height(&mut self, document_height: f64) {
        self.document_height = document_height;
        self.move_to(self.scroll_y);
    }

    /// Move as the user would (wheel, keyboard, scrollbar)
    pub fn user_scroll(&mut self, y: f64) {
        self.move_to(y);
    }

    /// Programmatic scroll requests in the order they were issued
    pub fn requests(&self) -> &[ScrollRequest] {
        &self.requests
    }

    /// Number of position changes since the last call
    pub fn take_position_changes(&mut self) -> usize {
        std::mem::take(&mut self.position_changes)
    }

    fn move_to(&mut self, y: f64) {
        let clamped = if y.is_finite() { y.clamp(0.0, self.max_scroll()) } else { self.scroll_y };
        if clamped != self.scroll_y {
            trace!("Viewport moved {:.1} -> {:.1}", self.scroll_y, clamped);
            self.scroll_y = clamped;
            self.position_changes += 1;
        }
    }
}

impl Viewport for HeadlessViewport {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior) {
        self.requests.push(ScrollRequest { target: y, behavior });
        self.move_to(y);
    }
}
