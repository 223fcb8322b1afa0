use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything but ASCII word characters, whitespace and hyphens
    static ref DISALLOWED_REGEX: Regex = Regex::new(r"[^a-z0-9_\s-]").unwrap();

    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Derive a URL-fragment-safe identifier from heading text.
///
/// Lowercases, drops every character outside `[a-z0-9_]`, whitespace and
/// `-`, trims, then turns each whitespace run into a single hyphen. Empty
/// or whitespace-only text yields an empty identifier.
pub fn generate_id(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = DISALLOWED_REGEX.replace_all(&lowered, "");
    WHITESPACE_REGEX.replace_all(stripped.trim(), "-").into_owned()
}
