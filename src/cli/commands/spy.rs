use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use tocspy::page::SettleReport;
use tocspy::utils::error::TocError;
use tocspy::viewport::Viewport;
use tocspy::{BoxResult, Page, TocConfig, TocWidget};

use super::{open_page, with_overrides};
use crate::cli::types::OutputFormat;

/// One simulated user action
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Scroll(f64),
    Click(String),
}

impl FromStr for Step {
    type Err = TocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("scroll", y)) => y
                .trim()
                .parse::<f64>()
                .map(Step::Scroll)
                .map_err(|_| TocError::Parse(format!("Invalid scroll position in step '{}'", s))),
            Some(("click", id)) if !id.trim().is_empty() => Ok(Step::Click(id.trim().to_string())),
            _ => Err(TocError::Parse(format!(
                "Invalid step '{}': expected scroll:<Y> or click:<ID>",
                s
            ))),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Scroll(y) => write!(f, "scroll:{}", y),
            Step::Click(id) => write!(f, "click:{}", id),
        }
    }
}

#[derive(Debug, Serialize)]
struct StepReport {
    step: String,
    scroll_y: f64,
    active: Option<String>,
    #[serde(flatten)]
    settle: SettleReport,
}

/// Handle the spy command
pub fn handle_spy_command(
    config: TocConfig,
    input: &Path,
    steps: &[String],
    viewport_height: Option<f64>,
    format: OutputFormat,
    content: Option<&str>,
    container: Option<&str>,
) -> BoxResult<()> {
    let mut config = with_overrides(config, content, container);
    if let Some(height) = viewport_height {
        config.viewport.height = height;
    }
    let steps = steps
        .iter()
        .map(|s| s.parse::<Step>())
        .collect::<Result<Vec<_>, _>>()?;

    let (mut page, mut widget) = open_page(config, input)?;
    let reports = run_steps(&mut page, &mut widget, &steps);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => {
            for report in &reports {
                println!(
                    "{:<20} y={:<8.0} active={}",
                    report.step,
                    report.scroll_y,
                    report.active.as_deref().unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}

fn run_steps(page: &mut Page, widget: &mut TocWidget, steps: &[Step]) -> Vec<StepReport> {
    let mut reports = vec![snapshot(page, widget, "load".to_string(), SettleReport::default())];

    for step in steps {
        match step {
            Step::Scroll(y) => page.scroll(*y),
            Step::Click(id) => match widget.toc().entry_for(id) {
                Some(entry) => page.click(entry.link),
                None => {
                    // Clicking an unknown id behaves like clicking outside the list
                    if let Some(node) = page.document.get_element_by_id(id) {
                        page.click(node);
                    }
                }
            },
        }
        let settle = page.settle(widget);
        reports.push(snapshot(page, widget, step.to_string(), settle));
    }

    reports
}

fn snapshot(page: &Page, widget: &TocWidget, step: String, settle: SettleReport) -> StepReport {
    StepReport {
        step,
        scroll_y: page.viewport.scroll_y(),
        active: widget.active_entry().map(|e| e.id.clone()),
        settle,
    }
}
