//! Default values referenced by the serde `default = "..."` attributes

/// Marker attribute on the element whose headings are indexed
pub fn default_content_selector() -> String {
    "[data-toc-content]".to_string()
}

/// Marker attribute on the element that receives the generated list
pub fn default_container_selector() -> String {
    "[data-toc-container]".to_string()
}

pub fn default_scroll_offset() -> f64 {
    80.0
}

pub fn default_heading_selector() -> String {
    "h1, h2, h3, h4, h5, h6".to_string()
}

pub fn default_min_level() -> u8 {
    1
}

pub fn default_max_level() -> u8 {
    6
}

pub fn default_no_toc_class() -> String {
    "no_toc".to_string()
}

pub fn default_list_class() -> String {
    "toc-list".to_string()
}

pub fn default_item_class() -> String {
    "toc-item".to_string()
}

pub fn default_level_class_prefix() -> String {
    "toc-level-".to_string()
}

pub fn default_marker_class() -> String {
    "toc-marker".to_string()
}

pub fn default_link_class() -> String {
    "toc-link".to_string()
}

pub fn default_active_class() -> String {
    "active".to_string()
}

pub fn default_target_attribute() -> String {
    "data-toc-target".to_string()
}

pub fn default_viewport_height() -> f64 {
    800.0
}

pub fn default_line_height() -> f64 {
    24.0
}

pub fn default_chars_per_line() -> usize {
    80
}

pub fn default_block_gap() -> f64 {
    16.0
}
