// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
ConceptHierarchy - rooted tree of anatomy concepts.

Nodes live in an arena and refer to each other by [`NodeId`]. Construction is
two-phase: every concept is allocated first, then children are linked by index
in relation-row order.
*/

use ahash::AHashMap;
use tracing::{debug, info};

use crate::node::ConceptNode;
use crate::tables::RelationTables;
use crate::types::{HierarchyError, HierarchyResult, NodeId};

/// Immutable concept hierarchy with a single root
///
/// # Design Notes
///
/// - Root is the only concept absent from the child→parent map
/// - A child listed under several parents appears in each parent's children,
///   but records only the last parent seen
/// - Lookups by concept id are O(1)
#[derive(Debug, Clone)]
pub struct ConceptHierarchy {
    pub(crate) nodes: Vec<ConceptNode>,
    pub(crate) index: AHashMap<String, NodeId>,
    pub(crate) root: NodeId,
    pub(crate) overwritten_parent_links: usize,
}

impl ConceptHierarchy {
    /// Build from parsed tables, see [`HierarchyBuilder`]
    pub fn build(tables: &RelationTables) -> HierarchyResult<Self> {
        HierarchyBuilder::new(tables).build()
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &ConceptNode {
        &self.nodes[self.root.0]
    }

    /// Node by id
    ///
    /// # Panics
    ///
    /// If `id` was not handed out by this hierarchy.
    pub fn node(&self, id: NodeId) -> &ConceptNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&ConceptNode> {
        self.nodes.get(id.0)
    }

    /// Look up a node by concept id
    pub fn find(&self, concept_id: &str) -> Option<NodeId> {
        self.index.get(concept_id).copied()
    }

    /// Like [`Self::find`], failing with `UnknownConcept`
    pub fn require(&self, concept_id: &str) -> HierarchyResult<NodeId> {
        self.find(concept_id)
            .ok_or_else(|| HierarchyError::UnknownConcept(concept_id.to_string()))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].children.is_empty()
    }

    /// All allocated nodes, including any not reachable from the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every allocated node id in parts-table order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Relation rows whose child already had a parent (last-write-wins losses)
    pub fn overwritten_parent_links(&self) -> usize {
        self.overwritten_parent_links
    }
}

/// Two-phase builder from [`RelationTables`] to [`ConceptHierarchy`]
pub struct HierarchyBuilder<'a> {
    tables: &'a RelationTables,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(tables: &'a RelationTables) -> Self {
        Self { tables }
    }

    /// Allocate, link, find the root, and reject cycles reachable from it
    ///
    /// # Errors
    ///
    /// - `NoRootFound` if every concept has a recorded parent
    /// - `AmbiguousRoot` if more than one concept has none
    /// - `CycleDetected` if a path from the root revisits one of its own nodes
    pub fn build(self) -> HierarchyResult<ConceptHierarchy> {
        let tables = self.tables;

        // Phase 1: allocate
        let mut nodes: Vec<ConceptNode> = Vec::with_capacity(tables.concepts().len());
        let mut index: AHashMap<String, NodeId> = AHashMap::with_capacity(tables.concepts().len());
        for concept_id in tables.concepts() {
            index.insert(concept_id.clone(), NodeId(nodes.len()));
            nodes.push(ConceptNode {
                concept_id: concept_id.clone(),
                representation_id: tables
                    .representation_id_of(concept_id)
                    .unwrap_or_default()
                    .to_string(),
                name: tables.name_of(concept_id).unwrap_or_default().to_string(),
                children: Vec::new(),
                parent: None,
                file_ids: tables.file_ids_of(concept_id).to_vec(),
            });
        }

        // Phase 2: link by index
        let mut dangling = 0usize;
        for node in nodes.iter_mut() {
            for child_id in tables.children_of(&node.concept_id) {
                match index.get(child_id) {
                    Some(&child) => node.children.push(child),
                    None => {
                        dangling += 1;
                        debug!(target: "anatomy-hierarchy",
                            "Skipping dangling child {} of {}", child_id, node.concept_id);
                    }
                }
            }
            node.parent = tables
                .parent_of(&node.concept_id)
                .and_then(|parent_id| index.get(parent_id).copied());
        }

        let root = find_root(tables, &index)?;
        let hierarchy = ConceptHierarchy {
            nodes,
            index,
            root,
            overwritten_parent_links: tables.stats().overwritten_parent_links,
        };
        hierarchy.ensure_acyclic()?;

        let edges: usize = hierarchy.nodes.iter().map(|n| n.children.len()).sum();
        info!(target: "anatomy-hierarchy",
            "Built hierarchy rooted at {}: {} nodes, {} edges ({} dangling skipped, {} parent links overwritten)",
            hierarchy.root(), hierarchy.nodes.len(), edges, dangling, hierarchy.overwritten_parent_links);

        Ok(hierarchy)
    }
}

/// Root discovery by elimination: exactly one concept may lack a parent
fn find_root(tables: &RelationTables, index: &AHashMap<String, NodeId>) -> HierarchyResult<NodeId> {
    let candidates: Vec<&String> = tables
        .concepts()
        .iter()
        .filter(|concept_id| !tables.has_parent(concept_id))
        .collect();

    match candidates.as_slice() {
        [] => Err(HierarchyError::NoRootFound),
        [root] => index
            .get(root.as_str())
            .copied()
            .ok_or_else(|| HierarchyError::UnknownConcept(root.to_string())),
        _ => Err(HierarchyError::AmbiguousRoot {
            candidates: candidates.into_iter().cloned().collect(),
        }),
    }
}

impl ConceptHierarchy {
    /// Iterative DFS from the root with on-path marking
    ///
    /// Shared children (multi-parent rows) are allowed; only back edges fail.
    fn ensure_acyclic(&self) -> HierarchyResult<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            OnPath,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        let mut stack: Vec<(NodeId, usize)> = vec![(self.root, 0)];
        marks[self.root.0] = Mark::OnPath;

        while let Some(frame) = stack.last_mut() {
            let (id, next_child) = *frame;
            match self.nodes[id.0].children.get(next_child) {
                Some(&child) => {
                    frame.1 += 1;
                    match marks[child.0] {
                        Mark::OnPath => {
                            return Err(HierarchyError::CycleDetected {
                                concept_id: self.nodes[child.0].concept_id.clone(),
                            });
                        }
                        Mark::Unvisited => {
                            marks[child.0] = Mark::OnPath;
                            stack.push((child, 0));
                        }
                        Mark::Done => {}
                    }
                }
                None => {
                    marks[id.0] = Mark::Done;
                    stack.pop();
                }
            }
        }

        Ok(())
    }
}
