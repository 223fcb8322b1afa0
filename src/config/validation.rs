use log::debug;

use crate::config::defaults;
use crate::config::TocConfig;
use crate::dom::Selector;
use crate::utils::error::{BoxResult, TocError};

/// Validate the configuration
pub fn validate_config(config: &TocConfig) -> BoxResult<()> {
    validate_selectors(config)?;
    validate_levels(config)?;
    validate_viewport(config)?;

    if !config.scroll_offset.is_finite() {
        return Err(TocError::Config("scroll_offset must be a finite number".to_string()).into());
    }
    if config.scroll_offset != defaults::default_scroll_offset() {
        debug!(
            "scroll_offset {} is accepted but navigation centers headings without it",
            config.scroll_offset
        );
    }

    Ok(())
}

fn validate_selectors(config: &TocConfig) -> BoxResult<()> {
    for (name, source) in [
        ("content_selector", &config.content_selector),
        ("container_selector", &config.container_selector),
        ("heading_selector", &config.heading_selector),
    ] {
        Selector::parse(source)
            .map_err(|e| TocError::Config(format!("{} is invalid: {}", name, e)))?;
    }
    Ok(())
}

fn validate_levels(config: &TocConfig) -> BoxResult<()> {
    let (min, max) = (config.min_level, config.max_level);
    if !(1..=6).contains(&min) || !(1..=6).contains(&max) || min > max {
        return Err(TocError::Config(format!(
            "heading levels must satisfy 1 <= min_level <= max_level <= 6 (got {}..{})",
            min, max
        ))
        .into());
    }
    Ok(())
}

fn validate_viewport(config: &TocConfig) -> BoxResult<()> {
    let viewport = &config.viewport;
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(viewport.height) || !positive(viewport.line_height) {
        return Err(TocError::Config(
            "viewport height and line_height must be positive".to_string(),
        )
        .into());
    }
    if viewport.chars_per_line == 0 {
        return Err(TocError::Config("viewport chars_per_line must be at least 1".to_string()).into());
    }
    if !viewport.block_gap.is_finite() || viewport.block_gap < 0.0 {
        return Err(TocError::Config("viewport block_gap must not be negative".to_string()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&TocConfig::default()).is_ok());
    }

    #[test]
    fn test_bad_selector_is_named() {
        let config = TocConfig {
            container_selector: "[data-toc".to_string(),
            ..TocConfig::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("container_selector"));
    }

    #[test]
    fn test_level_window_bounds() {
        let mut config = TocConfig::default();
        config.min_level = 0;
        assert!(validate_config(&config).is_err());
        config.min_level = 3;
        config.max_level = 7;
        assert!(validate_config(&config).is_err());
        config.max_level = 3;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_viewport_dimensions() {
        let mut config = TocConfig::default();
        config.viewport.height = 0.0;
        assert!(validate_config(&config).is_err());
        config.viewport.height = 500.0;
        config.viewport.chars_per_line = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_non_finite_offset_rejected() {
        let config = TocConfig {
            scroll_offset: f64::NAN,
            ..TocConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
