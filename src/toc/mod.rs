pub mod builder;
pub mod heading;
pub mod id;
pub mod model;
pub mod navigator;
pub mod throttle;
pub mod tracker;
pub mod widget;

pub use builder::TocBuilder;
pub use heading::{heading_center, heading_level, top_level};
pub use id::generate_id;
pub use model::{relative_level, HeadingRecord, Toc, TocEntry};
pub use navigator::scroll_to_heading;
pub use throttle::FrameThrottle;
pub use tracker::{select_active, ActiveTracker};
pub use widget::{ClickOutcome, TocWidget, WidgetState};
