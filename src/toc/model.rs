use serde::Serialize;

use crate::dom::NodeId;

/// A heading discovered in the content root
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadingRecord {
    /// Heading element in the document
    pub node: NodeId,
    /// Existing or generated identifier, also written onto the element
    pub id: String,
    pub label: String,
    /// Raw rank, 1 through 6
    pub level: u8,
}

/// A generated, clickable list entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    /// Identifier of the heading this entry points at
    pub id: String,
    pub label: String,
    /// Rank normalized so the shallowest discovered heading is 1
    pub level: u8,
    /// The `<li>` element
    pub item: NodeId,
    /// The clickable `<a>` element carrying the active flag
    pub link: NodeId,
}

/// Generated table of contents: headings and entries pair up by index
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Toc {
    pub headings: Vec<HeadingRecord>,
    pub entries: Vec<TocEntry>,
}

impl Toc {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First entry bound to `id`
    pub fn entry_for(&self, id: &str) -> Option<&TocEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entry whose link is `node`
    pub fn entry_by_link(&self, node: NodeId) -> Option<&TocEntry> {
        self.entries.iter().find(|e| e.link == node)
    }
}

/// `rank - baseline + 1`; never below 1
pub fn relative_level(rank: u8, baseline: u8) -> u8 {
    rank.saturating_sub(baseline) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_level_normalization() {
        let ranks = [3u8, 4, 3, 5];
        let baseline = *ranks.iter().min().unwrap();
        let levels: Vec<u8> = ranks.iter().map(|&r| relative_level(r, baseline)).collect();
        assert_eq!(levels, vec![1, 2, 1, 3]);
    }

    #[test]
    fn test_relative_level_never_below_one() {
        assert_eq!(relative_level(1, 1), 1);
        assert_eq!(relative_level(2, 4), 1);
    }
}
