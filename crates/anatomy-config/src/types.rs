// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `anatomy_configuration.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Layout policy names accepted in `[layout].policy`
pub const LAYOUT_POLICIES: &[&str] = &["equal_leaf_depth", "uniform_edge_length"];

/// Log levels accepted in `[logging].level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnatomyConfig {
    pub data: DataConfig,
    pub layout: LayoutConfig,
    pub logging: LoggingConfig,
}

/// Where the relation tables live
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory the table file names below are resolved against
    pub data_dir: PathBuf,
    pub part_of: TableFilesConfig,
    pub is_a: TableFilesConfig,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("HumanAnatomy"),
            part_of: TableFilesConfig::for_prefix("partof"),
            is_a: TableFilesConfig::for_prefix("isa"),
        }
    }
}

/// File names of the three tables making up one hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TableFilesConfig {
    /// conceptId, representationId, name
    pub parts: String,
    /// conceptId, (unused), fileId
    pub elements: String,
    /// parentId, (unused), childId, (unused)
    pub relations: String,
}

impl TableFilesConfig {
    /// Standard file names of the anatomy dataset for a relation prefix
    /// (`partof` or `isa`).
    pub fn for_prefix(prefix: &str) -> Self {
        Self {
            parts: format!("{}_parts_list_e.txt", prefix),
            elements: format!("{}_element_parts.txt", prefix),
            relations: format!("{}_inclusion_relation_list.txt", prefix),
        }
    }
}

/// Cladogram layout and viewport configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Default policy: "equal_leaf_depth" or "uniform_edge_length"
    pub policy: String,
    pub width: f64,
    pub height: f64,
    /// Right-hand margin reserved for leaf labels
    pub label_margin: f64,
    pub max_font_size: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            policy: "equal_leaf_depth".to_string(),
            width: 800.0,
            height: 600.0,
            label_margin: 80.0,
            max_font_size: 12.0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "text" or "json"
    pub format: String,
    /// When set, JSON log files are also written below this directory
    pub file_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            file_dir: None,
        }
    }
}
