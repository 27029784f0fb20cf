// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Ensures table names are present, the viewport leaves room for drawing
//! after the label margin, and enumerated string options are known.

use crate::{AnatomyConfig, ConfigError, ConfigResult, TableFilesConfig, LAYOUT_POLICIES, LOG_LEVELS};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// All problems are collected before failing, so one run reports everything.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &AnatomyConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_table_files("data.part_of", &config.data.part_of, &mut errors);
    validate_table_files("data.is_a", &config.data.is_a, &mut errors);
    validate_viewport(config, &mut errors);
    validate_enumerations(config, &mut errors);

    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

fn validate_table_files(
    section: &str,
    files: &TableFilesConfig,
    errors: &mut Vec<ConfigValidationError>,
) {
    for (field, value) in [
        ("parts", &files.parts),
        ("elements", &files.elements),
        ("relations", &files.relations),
    ] {
        if value.trim().is_empty() {
            errors.push(ConfigValidationError::MissingRequired {
                field: format!("{}.{}", section, field),
            });
        }
    }
}

fn validate_viewport(config: &AnatomyConfig, errors: &mut Vec<ConfigValidationError>) {
    let layout = &config.layout;

    if !(layout.width > 0.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "layout.width".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if !(layout.height > 0.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "layout.height".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if layout.label_margin < 0.0 || layout.label_margin >= layout.width {
        errors.push(ConfigValidationError::InvalidValue {
            field: "layout.label_margin".to_string(),
            reason: "must be non-negative and smaller than layout.width".to_string(),
        });
    }
    if !(layout.max_font_size > 0.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "layout.max_font_size".to_string(),
            reason: "must be positive".to_string(),
        });
    }
}

fn validate_enumerations(config: &AnatomyConfig, errors: &mut Vec<ConfigValidationError>) {
    if !LAYOUT_POLICIES.contains(&config.layout.policy.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "layout.policy".to_string(),
            reason: format!("must be one of {}", LAYOUT_POLICIES.join(", ")),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
        });
    }

    if config.logging.format != "text" && config.logging.format != "json" {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.format".to_string(),
            reason: "must be 'text' or 'json'".to_string(),
        });
    }
}
