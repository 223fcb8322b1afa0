use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::Value;

use crate::config::types::TocConfig;
use crate::config::validation;
use crate::utils::error::{BoxResult, TocError};

/// Configuration file names to look for
const CONFIG_FILES: [&str; 4] = ["tocspy.yml", "tocspy.yaml", "tocspy.toml", "tocspy.json"];

/// Load widget configuration.
///
/// Explicit files are applied in order, later keys overriding earlier ones.
/// Without explicit files the first default file found in `search_dir` is
/// used, and without any file the defaults apply.
pub fn load_config<P: AsRef<Path>>(
    search_dir: P,
    config_files: Option<Vec<PathBuf>>,
) -> BoxResult<TocConfig> {
    let config_paths = match config_files {
        Some(paths) if !paths.is_empty() => paths,
        _ => find_default_config_file(&search_dir).into_iter().collect(),
    };

    let mut merged = Value::Object(Default::default());
    if config_paths.is_empty() {
        debug!("No configuration files found, using defaults");
    }
    for path in config_paths {
        debug!("Loading configuration from {}", path.display());
        let value = read_config_file(&path)?;
        merge_values(&mut merged, value);
    }

    let config: TocConfig = serde_json::from_value(merged)
        .map_err(|e| TocError::Config(format!("Invalid configuration: {}", e)))?;

    validation::validate_config(&config)?;

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Parse configuration text in the given format (`yaml`, `toml` or `json`)
pub fn parse_config_str(content: &str, format: &str) -> BoxResult<TocConfig> {
    let value = parse_value(content, format, Path::new("<inline>"))?;
    let config: TocConfig = serde_json::from_value(value)
        .map_err(|e| TocError::Config(format!("Invalid configuration: {}", e)))?;
    validation::validate_config(&config)?;
    Ok(config)
}

fn find_default_config_file<P: AsRef<Path>>(search_dir: P) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| search_dir.as_ref().join(name))
        .find(|path| path.is_file())
}

fn read_config_file(path: &Path) -> BoxResult<Value> {
    if !path.exists() {
        return Err(TocError::Config(format!(
            "Configuration file not found: {}",
            path.display()
        ))
        .into());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        TocError::Config(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Assume YAML if no extension
    let format = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "yaml".to_string());

    parse_value(&content, &format, path)
}

fn parse_value(content: &str, format: &str, path: &Path) -> BoxResult<Value> {
    let value = match format {
        "yml" | "yaml" => {
            // An empty YAML document deserializes to null
            let value: Value = serde_yaml::from_str(content).map_err(|e| {
                TocError::Config(format!(
                    "Failed to parse YAML configuration ({}): {}",
                    path.display(),
                    e
                ))
            })?;
            if value.is_null() {
                Value::Object(Default::default())
            } else {
                value
            }
        }
        "toml" => toml::from_str(content).map_err(|e| {
            TocError::Config(format!(
                "Failed to parse TOML configuration ({}): {}",
                path.display(),
                e
            ))
        })?,
        "json" => serde_json::from_str(content).map_err(|e| {
            TocError::Config(format!(
                "Failed to parse JSON configuration ({}): {}",
                path.display(),
                e
            ))
        })?,
        other => {
            return Err(TocError::Config(format!(
                "Unsupported configuration file format: {}",
                other
            ))
            .into());
        }
    };

    if !value.is_object() {
        return Err(TocError::Config(format!(
            "Configuration in {} must be a mapping",
            path.display()
        ))
        .into());
    }
    Ok(value)
}

/// Deep-merge `overlay` into `base`; mappings merge key by key, anything
/// else is replaced
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
