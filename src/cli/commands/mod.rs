mod generate;
mod headings;
mod slug;
mod spy;

pub use generate::handle_generate_command;
pub use headings::handle_headings_command;
pub use slug::handle_slug_command;
pub use spy::handle_spy_command;

use std::path::Path;

use log::{debug, warn};

use tocspy::utils::fs;
use tocspy::{BoxResult, Page, TocConfig, TocWidget, WidgetState};

/// Apply selector overrides given on the command line
fn with_overrides(mut config: TocConfig, content: Option<&str>, container: Option<&str>) -> TocConfig {
    if let Some(content) = content {
        config.content_selector = content.to_string();
    }
    if let Some(container) = container {
        config.container_selector = container.to_string();
    }
    config
}

/// Load the input page and start a widget on it
fn open_page(config: TocConfig, input: &Path) -> BoxResult<(Page, TocWidget)> {
    let html = fs::read_input(input)?;
    let mut page = Page::from_html(&html, &config.viewport);
    let mut widget = TocWidget::new(config)?;

    match widget.start(&mut page.document, &page.viewport) {
        WidgetState::Active => debug!("Widget active on {}", input.display()),
        WidgetState::Uninitialized => warn!(
            "No element matches '{}' and '{}' in {}; nothing generated",
            widget.config().content_selector,
            widget.config().container_selector,
            input.display()
        ),
    }
    Ok((page, widget))
}
