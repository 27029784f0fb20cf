// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Session facade wiring configuration, hierarchy loading and layout together.

A session is built once from an [`AnatomyConfig`]; both hierarchies are
loaded eagerly and stay immutable, while every layout call produces a fresh
mapping.
*/

use std::collections::HashMap;
use std::path::Path;

use anatomy_config::{validate_config, AnatomyConfig, LoggingConfig, TableFilesConfig};
use anatomy_hierarchy::{AnatomyModel, ConceptHierarchy, HierarchyKind, TableFiles};
use anatomy_layout::{
    compute_layout, scale_layout, CladogramDrawing, CladogramLayout, LayoutPolicy, LayoutSummary,
    Viewport,
};
use anatomy_observability::{init_logging, CrateDebugFlags, LogFormat, LoggingGuard, LoggingOptions};
use tracing::{info, warn};

use crate::error::AnatomyResult;

fn table_files(config: &TableFilesConfig) -> TableFiles {
    TableFiles::new(&config.parts, &config.elements, &config.relations)
}

/// Loaded model plus the configured default policy and viewport
#[derive(Debug, Clone)]
pub struct AnatomySession {
    model: AnatomyModel,
    policy: LayoutPolicy,
    viewport: Viewport,
}

impl AnatomySession {
    /// Validate `config` and load both hierarchies from `data.data_dir`
    ///
    /// # Errors
    ///
    /// Config validation, policy/viewport conversion and table or root
    /// failures all surface whole; no partial session is returned.
    pub fn from_config(config: &AnatomyConfig) -> AnatomyResult<Self> {
        validate_config(config)?;

        let policy: LayoutPolicy = config.layout.policy.parse()?;
        let viewport = Viewport::new(
            config.layout.width,
            config.layout.height,
            config.layout.label_margin,
        )?
        .with_max_font_size(config.layout.max_font_size);

        let model = AnatomyModel::load(
            &config.data.data_dir,
            &table_files(&config.data.part_of),
            &table_files(&config.data.is_a),
        )?;

        info!(target: "anatomy",
            "Session ready from {}: part-of {} nodes, is-a {} nodes, policy {}",
            config.data.data_dir.display(), model.part_of().len(), model.is_a().len(), policy);

        Ok(Self::new(model, policy, viewport))
    }

    /// Load configuration (file, environment, `cli_overrides`) and build a session
    pub fn load(
        config_path: Option<&Path>,
        cli_overrides: Option<&HashMap<String, String>>,
    ) -> AnatomyResult<Self> {
        let config = anatomy_config::load_config(config_path, cli_overrides)?;
        Self::from_config(&config)
    }

    pub fn new(model: AnatomyModel, policy: LayoutPolicy, viewport: Viewport) -> Self {
        Self {
            model,
            policy,
            viewport,
        }
    }

    pub fn model(&self) -> &AnatomyModel {
        &self.model
    }

    pub fn hierarchy(&self, kind: HierarchyKind) -> &ConceptHierarchy {
        self.model.hierarchy(kind)
    }

    pub fn policy(&self) -> LayoutPolicy {
        self.policy
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Raw layout of one hierarchy under an explicit policy
    pub fn layout(&self, kind: HierarchyKind, policy: LayoutPolicy) -> CladogramLayout {
        compute_layout(self.hierarchy(kind), policy)
    }

    /// Raw layout under the configured policy
    pub fn default_layout(&self, kind: HierarchyKind) -> CladogramLayout {
        self.layout(kind, self.policy)
    }

    /// Configured-policy layout fitted to the configured viewport
    pub fn scaled_layout(&self, kind: HierarchyKind) -> CladogramLayout {
        scale_layout(&self.default_layout(kind), &self.viewport)
    }

    pub fn drawing(&self, kind: HierarchyKind) -> CladogramDrawing {
        CladogramDrawing::build(self.hierarchy(kind), &self.default_layout(kind), &self.viewport)
    }

    pub fn layout_summary(&self, kind: HierarchyKind) -> LayoutSummary {
        self.default_layout(kind).summary(self.hierarchy(kind))
    }
}

/// Map the `[logging]` section onto observability options
///
/// An unrecognised format falls back to text.
pub fn logging_options(config: &LoggingConfig) -> LoggingOptions {
    let format = config.format.parse::<LogFormat>().unwrap_or_else(|reason| {
        warn!(target: "anatomy", "{}; using text", reason);
        LogFormat::Text
    });
    LoggingOptions {
        level: config.level.clone(),
        format,
        file_dir: config.file_dir.clone(),
    }
}

/// Install the global subscriber from the `[logging]` section
pub fn init_logging_from_config(
    debug_flags: &CrateDebugFlags,
    config: &AnatomyConfig,
) -> AnatomyResult<LoggingGuard> {
    Ok(init_logging(debug_flags, &logging_options(&config.logging))?)
}
