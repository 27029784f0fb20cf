// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::fmt;

use crate::types::NodeId;

/// One anatomical concept
///
/// Children are indices into the owning hierarchy, in order of first
/// appearance in the relations table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConceptNode {
    pub(crate) concept_id: String,
    pub(crate) representation_id: String,
    pub(crate) name: String,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) file_ids: Vec<String>,
}

impl ConceptNode {
    pub fn concept_id(&self) -> &str {
        &self.concept_id
    }

    /// Secondary identifier, may be empty
    pub fn representation_id(&self) -> &str {
        &self.representation_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label used by drawings and exports
    pub fn label(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent recorded by the loader (last relation row naming this child)
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Renderable asset identifiers, in table row order
    pub fn file_ids(&self) -> &[String] {
        &self.file_ids
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Display for ConceptNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.concept_id)
    }
}
