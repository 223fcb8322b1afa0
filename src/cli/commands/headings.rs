use std::path::Path;

use log::warn;
use serde::Serialize;

use tocspy::dom::Selector;
use tocspy::toc::{generate_id, heading_center, relative_level, top_level, TocBuilder};
use tocspy::utils::fs;
use tocspy::{BoxResult, Page, TocConfig};

use super::with_overrides;
use crate::cli::types::OutputFormat;

#[derive(Debug, Serialize)]
struct HeadingRow {
    id: String,
    label: String,
    level: u8,
    relative_level: u8,
    center: f64,
}

/// Handle the headings command
pub fn handle_headings_command(
    config: TocConfig,
    input: &Path,
    format: OutputFormat,
    content: Option<&str>,
) -> BoxResult<()> {
    let config = with_overrides(config, content, None);
    let html = fs::read_input(input)?;
    let page = Page::from_html(&html, &config.viewport);
    let doc = &page.document;

    let content_selector = Selector::parse(&config.content_selector)?;
    let builder = TocBuilder::from_config(&config)?;

    let found = match content_selector.query_first(doc, doc.root()) {
        Some(root) => builder.discover(doc, root),
        None => {
            warn!("No element matches '{}' in {}", content_selector, input.display());
            Vec::new()
        }
    };

    let baseline = top_level(found.iter().map(|&(_, level)| level)).unwrap_or(1);
    let rows: Vec<HeadingRow> = found
        .iter()
        .map(|&(node, level)| {
            let label = doc.text_content(node).split_whitespace().collect::<Vec<_>>().join(" ");
            let id = match doc.attr(node, "id").filter(|id| !id.is_empty()) {
                Some(id) => id.to_string(),
                None => generate_id(&label),
            };
            HeadingRow {
                id,
                label,
                level,
                relative_level: relative_level(level, baseline),
                center: heading_center(doc, node, &page.viewport),
            }
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => {
            for row in &rows {
                println!(
                    "{}h{} {:<32} #{} @ {:.0}",
                    "  ".repeat(usize::from(row.relative_level - 1)),
                    row.level,
                    row.label,
                    row.id,
                    row.center
                );
            }
        }
    }
    Ok(())
}
