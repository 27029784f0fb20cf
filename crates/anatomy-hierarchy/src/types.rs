// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for hierarchy construction.
*/

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Result type for hierarchy operations
pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// Errors that can occur while loading tables or building a hierarchy
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error("Resource not found: {}", path.display())]
    ResourceNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No root found: every concept has a recorded parent")]
    NoRootFound,

    #[error("No root found: {} concepts have no recorded parent ({})", candidates.len(), candidates.join(", "))]
    AmbiguousRoot { candidates: Vec<String> },

    #[error("Cycle detected at concept {concept_id}")]
    CycleDetected { concept_id: String },

    #[error("Unknown concept: {0}")]
    UnknownConcept(String),
}

/// Index of a node in a [`crate::ConceptHierarchy`] arena
///
/// Only meaningful for the hierarchy that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_root_message_lists_candidates() {
        let err = HierarchyError::AmbiguousRoot {
            candidates: vec!["FMA1".to_string(), "FMA2".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("No root found"));
        assert!(msg.contains("FMA1, FMA2"));
    }

    #[test]
    fn test_resource_not_found_message() {
        let err = HierarchyError::ResourceNotFound {
            path: PathBuf::from("HumanAnatomy/partof_parts_list_e.txt"),
        };
        assert_eq!(
            err.to_string(),
            "Resource not found: HumanAnatomy/partof_parts_list_e.txt"
        );
    }
}
