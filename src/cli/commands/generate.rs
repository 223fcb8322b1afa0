use std::path::Path;

use log::info;

use tocspy::dom::to_html;
use tocspy::utils::fs;
use tocspy::{BoxResult, TocConfig, WidgetState};

use super::{open_page, with_overrides};

/// Handle the generate command
pub fn handle_generate_command(
    config: TocConfig,
    input: &Path,
    output: Option<&Path>,
    content: Option<&str>,
    container: Option<&str>,
) -> BoxResult<()> {
    let config = with_overrides(config, content, container);
    let (page, widget) = open_page(config, input)?;

    if widget.state() == WidgetState::Active {
        info!("Generated {} entries from {}", widget.entries().len(), input.display());
    }

    let rendered = to_html(&page.document);
    match output {
        Some(path) => {
            fs::write_file(path, &rendered)?;
            info!("Page written to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
