// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Traversal, search and summary queries over a [`ConceptHierarchy`]

use ahash::AHashSet;
use serde::Serialize;
use std::fmt::Write;

use crate::hierarchy::ConceptHierarchy;
use crate::types::NodeId;

/// Structural counts over the nodes reachable from the root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HierarchySummary {
    pub node_count: usize,
    /// Sum of per-node children counts
    pub edge_count: usize,
    pub leaf_count: usize,
    /// Longest root-to-leaf path in edges
    pub max_depth: usize,
}

impl ConceptHierarchy {
    /// Pre-order walk from the root, children left to right
    ///
    /// A child shared by several parents is visited once per parent.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }

    /// Post-order walk from the root (children before parents)
    pub fn postorder(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = vec![(self.root, 0)];
        while let Some(frame) = stack.last_mut() {
            let (id, next_child) = *frame;
            match self.children(id).get(next_child) {
                Some(&child) => {
                    frame.1 += 1;
                    stack.push((child, 0));
                }
                None => {
                    order.push(id);
                    stack.pop();
                }
            }
        }
        order
    }

    /// Distinct nodes reachable from the root, in first-visit pre-order
    pub fn reachable(&self) -> Vec<NodeId> {
        self.distinct_from(self.root)
    }

    fn distinct_from(&self, start: NodeId) -> Vec<NodeId> {
        let mut seen = vec![false; self.nodes.len()];
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.0], true) {
                continue;
            }
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }

    /// Distinct leaves reachable from the root, left to right
    pub fn leaves(&self) -> Vec<NodeId> {
        self.reachable().into_iter().filter(|&id| self.is_leaf(id)).collect()
    }

    /// Distinct nodes below `id`, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.distinct_from(id).into_iter().skip(1).collect()
    }

    /// Edges from the root following recorded parents
    ///
    /// `None` when the parent chain does not lead to the root.
    pub fn depth_of(&self, id: NodeId) -> Option<usize> {
        let mut current = id;
        for depth in 0..=self.nodes.len() {
            if current == self.root {
                return Some(depth);
            }
            current = self.parent(current)?;
        }
        None
    }

    /// Height of `id`: 0 for a leaf, otherwise 1 + the tallest child
    pub fn height_of(&self, id: NodeId) -> usize {
        let mut heights: Vec<Option<usize>> = vec![None; self.nodes.len()];
        let mut on_path = vec![false; self.nodes.len()];
        let mut stack: Vec<(NodeId, usize)> = vec![(id, 0)];
        on_path[id.0] = true;
        while let Some(frame) = stack.last_mut() {
            let (current, next_child) = *frame;
            match self.children(current).get(next_child) {
                Some(&child) => {
                    frame.1 += 1;
                    if heights[child.0].is_none() && !on_path[child.0] {
                        on_path[child.0] = true;
                        stack.push((child, 0));
                    }
                }
                None => {
                    let height = self
                        .children(current)
                        .iter()
                        .filter_map(|child| heights[child.0])
                        .max()
                        .map_or(0, |tallest| tallest + 1);
                    heights[current.0] = Some(height);
                    on_path[current.0] = false;
                    stack.pop();
                }
            }
        }
        heights[id.0].unwrap_or(0)
    }

    /// Longest root-to-leaf path (0 for a single-node hierarchy)
    pub fn max_depth(&self) -> usize {
        self.height_of(self.root)
    }

    /// File ids of `id` and everything below it, first occurrence kept
    pub fn collect_file_ids(&self, id: NodeId) -> Vec<String> {
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut file_ids = Vec::new();
        for node in self.distinct_from(id) {
            for file_id in self.node(node).file_ids() {
                if seen.insert(file_id.as_str()) {
                    file_ids.push(file_id.clone());
                }
            }
        }
        file_ids
    }

    /// Case-insensitive substring match on names, in pre-order
    ///
    /// The query is trimmed; an empty query matches nothing.
    pub fn search_by_name(&self, query: &str) -> Vec<NodeId> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.reachable()
            .into_iter()
            .filter(|&id| self.node(id).name().to_lowercase().contains(&query))
            .collect()
    }

    pub fn summary(&self) -> HierarchySummary {
        let reachable = self.reachable();
        HierarchySummary {
            node_count: reachable.len(),
            edge_count: reachable.iter().map(|&id| self.children(id).len()).sum(),
            leaf_count: reachable.iter().filter(|&&id| self.is_leaf(id)).count(),
            max_depth: self.max_depth(),
        }
    }

    /// Indented outline, one `name (conceptId)` line per node
    pub fn render_paths(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            // fmt::Write for String never returns an error
            let _ = writeln!(out, "{}{}", "  ".repeat(depth), self.node(id));
            stack.extend(self.children(id).iter().rev().map(|&child| (child, depth + 1)));
        }
        out
    }
}
