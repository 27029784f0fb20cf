// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
AnatomyModel - the part-of and is-a hierarchies loaded together.

Both relations cover the same concept space and load through the same
tables → hierarchy pipeline, each from its own three tables.
*/

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::hierarchy::ConceptHierarchy;
use crate::tables::{RelationTables, TableFiles};
use crate::types::HierarchyResult;

/// Which ontological relation a hierarchy is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyKind {
    /// Structural containment
    PartOf,
    /// Conceptual categorization
    IsA,
}

impl HierarchyKind {
    pub const ALL: [HierarchyKind; 2] = [HierarchyKind::PartOf, HierarchyKind::IsA];

    pub fn as_str(self) -> &'static str {
        match self {
            HierarchyKind::PartOf => "part_of",
            HierarchyKind::IsA => "is_a",
        }
    }
}

impl fmt::Display for HierarchyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HierarchyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "part_of" | "partof" => Ok(HierarchyKind::PartOf),
            "is_a" | "isa" => Ok(HierarchyKind::IsA),
            other => Err(format!("unknown hierarchy kind '{}'", other)),
        }
    }
}

/// Both anatomy hierarchies, built once and read-only afterwards
#[derive(Debug, Clone)]
pub struct AnatomyModel {
    part_of: ConceptHierarchy,
    is_a: ConceptHierarchy,
}

impl AnatomyModel {
    pub fn new(part_of: ConceptHierarchy, is_a: ConceptHierarchy) -> Self {
        Self { part_of, is_a }
    }

    /// Load both hierarchies from tables named relative to `data_dir`
    ///
    /// # Errors
    ///
    /// Any table or root failure of either hierarchy fails the whole model.
    pub fn load(data_dir: &Path, part_of: &TableFiles, is_a: &TableFiles) -> HierarchyResult<Self> {
        let model = Self {
            part_of: load_hierarchy(data_dir, part_of, HierarchyKind::PartOf)?,
            is_a: load_hierarchy(data_dir, is_a, HierarchyKind::IsA)?,
        };
        Ok(model)
    }

    pub fn hierarchy(&self, kind: HierarchyKind) -> &ConceptHierarchy {
        match kind {
            HierarchyKind::PartOf => &self.part_of,
            HierarchyKind::IsA => &self.is_a,
        }
    }

    pub fn part_of(&self) -> &ConceptHierarchy {
        &self.part_of
    }

    pub fn is_a(&self) -> &ConceptHierarchy {
        &self.is_a
    }
}

fn load_hierarchy(data_dir: &Path, files: &TableFiles, kind: HierarchyKind) -> HierarchyResult<ConceptHierarchy> {
    let tables = RelationTables::load_from_dir(data_dir, files)?;
    let hierarchy = ConceptHierarchy::build(&tables)?;
    info!(target: "anatomy-hierarchy", "{} hierarchy ready: root {}", kind, hierarchy.root());
    Ok(hierarchy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_and_display() {
        assert_eq!("part-of".parse::<HierarchyKind>(), Ok(HierarchyKind::PartOf));
        assert_eq!("ISA".parse::<HierarchyKind>(), Ok(HierarchyKind::IsA));
        assert!("has_part".parse::<HierarchyKind>().is_err());
        assert_eq!(HierarchyKind::IsA.to_string(), "is_a");
    }

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(serde_json::to_string(&HierarchyKind::PartOf).unwrap(), "\"part_of\"");
    }
}
