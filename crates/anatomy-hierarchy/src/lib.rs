// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# Anatomy Hierarchy

Reconstructs a rooted concept hierarchy from the three flat tables an anatomy
ontology ships as:

- `tables` - tab-separated parts / elements / relations parsing
- `hierarchy` - arena of [`ConceptNode`]s, two-phase build, root discovery
- `traversal` - walks, search, file-id collection, summaries
- `newick` - Newick export
- `model` - part-of and is-a hierarchies loaded together

## Pipeline

```text
tables ──► RelationTables ──► HierarchyBuilder ──► ConceptHierarchy
```

Nothing downstream mutates a hierarchy once built, so it can be shared freely
between threads.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod hierarchy;
pub mod model;
pub mod newick;
pub mod node;
pub mod tables;
pub mod traversal;
pub mod types;

pub use hierarchy::{ConceptHierarchy, HierarchyBuilder};
pub use model::{AnatomyModel, HierarchyKind};
pub use newick::{to_newick, walk_in_order};
pub use node::ConceptNode;
pub use tables::{Relation, RelationTables, TableFiles, TableStats};
pub use traversal::HierarchySummary;
pub use types::{HierarchyError, HierarchyResult, NodeId};
