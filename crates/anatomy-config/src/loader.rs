// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three tiers, later tiers win:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{AnatomyConfig, ConfigError, ConfigResult};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "anatomy_configuration.toml";

/// Find the anatomy configuration file
///
/// Search order:
/// 1. `ANATOMY_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("ANATOMY_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by ANATOMY_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        search_paths.extend(cwd.ancestors().skip(1).take(5).map(|dir| dir.join(CONFIG_FILE_NAME)));
    }

    if let Some(found) = search_paths.iter().find(|path| path.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet ANATOMY_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML.
/// Validation is a separate step, see [`crate::validate_config`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<AnatomyConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: AnatomyConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `ANATOMY_DATA_DIR` -> `data.data_dir`
/// - `ANATOMY_LAYOUT_POLICY` -> `layout.policy`
/// - `ANATOMY_VIEWPORT_WIDTH` -> `layout.width`
/// - `ANATOMY_VIEWPORT_HEIGHT` -> `layout.height`
/// - `ANATOMY_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut AnatomyConfig) {
    if let Ok(value) = env::var("ANATOMY_DATA_DIR") {
        config.data.data_dir = PathBuf::from(value);
    }
    if let Ok(value) = env::var("ANATOMY_LAYOUT_POLICY") {
        config.layout.policy = value;
    }
    if let Ok(value) = env::var("ANATOMY_VIEWPORT_WIDTH") {
        if let Ok(width) = value.parse::<f64>() {
            config.layout.width = width;
        }
    }
    if let Ok(value) = env::var("ANATOMY_VIEWPORT_HEIGHT") {
        if let Ok(height) = value.parse::<f64>() {
            config.layout.height = height;
        }
    }
    if let Ok(value) = env::var("ANATOMY_LOG_LEVEL") {
        config.logging.level = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// Recognised keys: `data_dir`, `layout_policy`, `width`, `height`,
/// `label_margin`, `log_level`. Unparseable numbers are ignored.
pub fn apply_cli_overrides(config: &mut AnatomyConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("data_dir") {
        config.data.data_dir = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("layout_policy") {
        config.layout.policy = value.clone();
    }
    if let Some(width) = cli_args.get("width").and_then(|v| v.parse::<f64>().ok()) {
        config.layout.width = width;
    }
    if let Some(height) = cli_args.get("height").and_then(|v| v.parse::<f64>().ok()) {
        config.layout.height = height;
    }
    if let Some(margin) = cli_args.get("label_margin").and_then(|v| v.parse::<f64>().ok()) {
        config.layout.label_margin = margin;
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
}
