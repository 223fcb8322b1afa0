use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::dom::LayoutOptions;

/// Widget configuration, resolved once and read-only afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocConfig {
    /// Selector for the element whose descendant headings are indexed
    #[serde(default = "defaults::default_content_selector")]
    pub content_selector: String,

    /// Selector for the element the generated list is rendered into
    #[serde(default = "defaults::default_container_selector")]
    pub container_selector: String,

    /// Scroll offset in pixels. Accepted but not applied: navigation centers
    /// the heading instead of aligning it below a fixed header.
    #[serde(default = "defaults::default_scroll_offset")]
    pub scroll_offset: f64,

    /// Trace generation and active-entry changes at debug level
    #[serde(default)]
    pub debug: bool,

    /// Which elements count as headings
    #[serde(default = "defaults::default_heading_selector")]
    pub heading_selector: String,

    /// Shallowest heading rank to include (h1 = 1)
    #[serde(default = "defaults::default_min_level")]
    pub min_level: u8,

    /// Deepest heading rank to include
    #[serde(default = "defaults::default_max_level")]
    pub max_level: u8,

    /// Headings carrying this class are left out of the list
    #[serde(default = "defaults::default_no_toc_class")]
    pub no_toc_class: String,

    /// Classes and attributes of the generated markup
    #[serde(default)]
    pub markup: MarkupConfig,

    /// Headless window used when no browser is present
    #[serde(default)]
    pub viewport: ViewportConfig,
}

impl Default for TocConfig {
    fn default() -> Self {
        TocConfig {
            content_selector: defaults::default_content_selector(),
            container_selector: defaults::default_container_selector(),
            scroll_offset: defaults::default_scroll_offset(),
            debug: false,
            heading_selector: defaults::default_heading_selector(),
            min_level: defaults::default_min_level(),
            max_level: defaults::default_max_level(),
            no_toc_class: defaults::default_no_toc_class(),
            markup: MarkupConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }
}

/// Generated markup contract consumed by the stylesheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupConfig {
    #[serde(default = "defaults::default_list_class")]
    pub list_class: String,

    #[serde(default = "defaults::default_item_class")]
    pub item_class: String,

    /// Prefix of the per-item level class, e.g. `toc-level-2`
    #[serde(default = "defaults::default_level_class_prefix")]
    pub level_class_prefix: String,

    /// Class of the decorative child added to items at level 2 and deeper
    #[serde(default = "defaults::default_marker_class")]
    pub marker_class: String,

    #[serde(default = "defaults::default_link_class")]
    pub link_class: String,

    /// Class toggled on the single active link
    #[serde(default = "defaults::default_active_class")]
    pub active_class: String,

    /// Data attribute carrying the heading identifier on each link
    #[serde(default = "defaults::default_target_attribute")]
    pub target_attribute: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        MarkupConfig {
            list_class: defaults::default_list_class(),
            item_class: defaults::default_item_class(),
            level_class_prefix: defaults::default_level_class_prefix(),
            marker_class: defaults::default_marker_class(),
            link_class: defaults::default_link_class(),
            active_class: defaults::default_active_class(),
            target_attribute: defaults::default_target_attribute(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Visible height in pixels
    #[serde(default = "defaults::default_viewport_height")]
    pub height: f64,

    #[serde(default = "defaults::default_line_height")]
    pub line_height: f64,

    #[serde(default = "defaults::default_chars_per_line")]
    pub chars_per_line: usize,

    /// Vertical gap between sibling blocks
    #[serde(default = "defaults::default_block_gap")]
    pub block_gap: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportConfig {
            height: defaults::default_viewport_height(),
            line_height: defaults::default_line_height(),
            chars_per_line: defaults::default_chars_per_line(),
            block_gap: defaults::default_block_gap(),
        }
    }
}

impl ViewportConfig {
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            line_height: self.line_height,
            chars_per_line: self.chars_per_line,
            block_gap: self.block_gap,
        }
    }
}
