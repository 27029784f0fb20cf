// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Anatomy - ontology hierarchies and cladogram layout
//!
//! Reconstructs the part-of and is-a hierarchies of an anatomy ontology from
//! its flat tab-separated tables and lays them out as cladograms.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anatomy::prelude::*;
//!
//! let config = anatomy::config::load_config(None, None)?;
//! let session = AnatomySession::from_config(&config)?;
//!
//! let layout = session.layout(HierarchyKind::PartOf, LayoutPolicy::EqualLeafDepth);
//! let drawing = session.drawing(HierarchyKind::PartOf);
//! println!("{} nodes, {} labels", layout.len(), drawing.labels.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - **`file-logging`** (default): per-run log files via `tracing-appender`
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: anatomy-config, anatomy-observability      │
//! │  (TOML + overrides, tracing setup)                      │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Model: anatomy-hierarchy                               │
//! │  (tables → rooted concept hierarchy)                    │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Algorithms: anatomy-layout                             │
//! │  (layout policies, scaling, drawing geometry)           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use anatomy_config as config;
pub use anatomy_observability as observability;

// Re-export model and algorithms
pub use anatomy_hierarchy as hierarchy;
pub use anatomy_layout as layout;

pub mod error;
pub mod session;

pub use error::{AnatomyError, AnatomyResult};
pub use session::{init_logging_from_config, logging_options, AnatomySession};

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::error::{AnatomyError, AnatomyResult};
    pub use crate::session::AnatomySession;

    pub use crate::hierarchy::{
        AnatomyModel, ConceptHierarchy, ConceptNode, HierarchyKind, NodeId, RelationTables,
        TableFiles,
    };
    pub use crate::layout::{
        compute_layout, CladogramDrawing, CladogramLayout, LayoutPoint, LayoutPolicy, Viewport,
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        assert_eq!(LayoutPolicy::default(), LayoutPolicy::EqualLeafDepth);
        assert_eq!(HierarchyKind::PartOf.to_string(), "part_of");
    }
}
