mod headless;

pub use headless::{HeadlessViewport, ScrollRequest};

/// How a programmatic scroll reaches its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Jump straight to the target
    Auto,
    /// Animated scroll; fire-and-forget, no completion signal
    Smooth,
}

/// Scroll primitives of the host window
pub trait Viewport {
    /// Current vertical scroll offset in document coordinates
    fn scroll_y(&self) -> f64;

    /// Height of the visible area
    fn height(&self) -> f64;

    fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior);

    /// Vertical midpoint of the visible area in document coordinates
    fn center(&self) -> f64 {
        self.scroll_y() + self.height() / 2.0
    }
}
