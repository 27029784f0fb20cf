// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Umbrella error type

use anatomy_config::ConfigError;
use anatomy_hierarchy::HierarchyError;
use anatomy_layout::LayoutError;

pub type AnatomyResult<T> = Result<T, AnatomyError>;

#[derive(Debug, thiserror::Error)]
pub enum AnatomyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] anyhow::Error),
}
