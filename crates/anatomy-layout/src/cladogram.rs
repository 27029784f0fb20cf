// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Raw cladogram layouts.

Both policies share the y assignment: a post-order walk hands each leaf the
next value of a leaf counter, and every internal node sits at the mean y of
its children. They differ in x:

- **Equal leaf depth**: leaves at `max_depth`, internal nodes one unit left of
  their leftmost child.
- **Uniform edge length**: x is the depth from the root.

A child listed under several parents is visited once per parent; the leaf
counter advances on every visit and the last visit's point is kept.
*/

use anatomy_hierarchy::{ConceptHierarchy, NodeId};
use serde::Serialize;
use tracing::debug;

use crate::types::{LayoutPoint, LayoutPolicy};

/// Counts describing what a layout covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutSummary {
    pub node_count: usize,
    /// Sum of children counts over laid-out nodes
    pub edge_count: usize,
    pub leaf_count: usize,
}

/// Node → point mapping produced by one layout pass
///
/// Covers exactly the nodes reachable from the root; a fresh mapping is
/// produced on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct CladogramLayout {
    policy: LayoutPolicy,
    /// Indexed by `NodeId::index()`
    points: Vec<Option<LayoutPoint>>,
    /// Nodes in order of first placement
    placed: Vec<NodeId>,
}

impl CladogramLayout {
    fn new(policy: LayoutPolicy, capacity: usize) -> Self {
        Self {
            policy,
            points: vec![None; capacity],
            placed: Vec::new(),
        }
    }

    fn set(&mut self, id: NodeId, point: LayoutPoint) {
        let slot = &mut self.points[id.index()];
        if slot.is_none() {
            self.placed.push(id);
        }
        *slot = Some(point);
    }

    fn set_x(&mut self, id: NodeId, x: f64) {
        if let Some(point) = self.points[id.index()].as_mut() {
            point.x = x;
        }
    }

    pub fn policy(&self) -> LayoutPolicy {
        self.policy
    }

    pub fn get(&self, id: NodeId) -> Option<LayoutPoint> {
        self.points.get(id.index()).copied().flatten()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// (node, point) pairs in order of first placement
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, LayoutPoint)> + '_ {
        self.placed
            .iter()
            .filter_map(move |&id| self.get(id).map(|point| (id, point)))
    }

    pub fn points(&self) -> impl Iterator<Item = LayoutPoint> + '_ {
        self.iter().map(|(_, point)| point)
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn summary(&self, hierarchy: &ConceptHierarchy) -> LayoutSummary {
        LayoutSummary {
            node_count: self.len(),
            edge_count: self.placed.iter().map(|&id| hierarchy.children(id).len()).sum(),
            leaf_count: self.placed.iter().filter(|&&id| hierarchy.is_leaf(id)).count(),
        }
    }

    /// Same nodes, every point passed through `f`
    pub fn map_points(&self, mut f: impl FnMut(LayoutPoint) -> LayoutPoint) -> Self {
        Self {
            policy: self.policy,
            points: self.points.iter().copied().map(|point| point.map(&mut f)).collect(),
            placed: self.placed.clone(),
        }
    }
}

/// Leaf counter threaded through the post-order walk
#[derive(Debug, Default)]
struct LeafCursor {
    next_index: usize,
}

impl LeafCursor {
    fn advance(&mut self) -> f64 {
        let index = self.next_index;
        self.next_index += 1;
        index as f64
    }
}

/// Lay out `hierarchy` under `policy`
pub fn compute_layout(hierarchy: &ConceptHierarchy, policy: LayoutPolicy) -> CladogramLayout {
    match policy {
        LayoutPolicy::EqualLeafDepth => layout_equal_leaf_depth(hierarchy),
        LayoutPolicy::UniformEdgeLength => layout_uniform_edge_length(hierarchy),
    }
}

/// Leaves aligned at the maximum depth
pub fn layout_equal_leaf_depth(hierarchy: &ConceptHierarchy) -> CladogramLayout {
    let max_depth = hierarchy.max_depth() as f64;
    let mut layout = CladogramLayout::new(LayoutPolicy::EqualLeafDepth, hierarchy.len());
    let mut cursor = LeafCursor::default();

    place_post_order(hierarchy, hierarchy.root_id(), max_depth, &mut cursor, &mut layout);

    debug!(target: "anatomy-layout",
        "Equal leaf depth layout: {} nodes, {} leaf slots, max depth {}",
        layout.len(), cursor.next_index, max_depth);
    layout
}

/// Every edge one x unit long
pub fn layout_uniform_edge_length(hierarchy: &ConceptHierarchy) -> CladogramLayout {
    let mut layout = layout_equal_leaf_depth(hierarchy);
    layout.policy = LayoutPolicy::UniformEdgeLength;

    assign_depth_x(hierarchy, hierarchy.root_id(), &mut layout);

    debug!(target: "anatomy-layout", "Uniform edge length layout: {} nodes", layout.len());
    layout
}

/// Post-order placement over an explicit `(node, next_child)` stack
///
/// Leaves take the next counter value as they are finished; an internal node
/// is placed once its last child is.
fn place_post_order(
    hierarchy: &ConceptHierarchy,
    root: NodeId,
    max_depth: f64,
    cursor: &mut LeafCursor,
    layout: &mut CladogramLayout,
) {
    let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
    while let Some(frame) = stack.last_mut() {
        let (id, next_child) = *frame;
        let children = hierarchy.children(id);
        if let Some(&child) = children.get(next_child) {
            frame.1 += 1;
            stack.push((child, 0));
            continue;
        }

        stack.pop();
        if children.is_empty() {
            layout.set(id, LayoutPoint::new(max_depth, cursor.advance()));
            continue;
        }

        let mut min_x = f64::INFINITY;
        let mut y_sum = 0.0;
        for &child in children {
            if let Some(point) = layout.get(child) {
                min_x = min_x.min(point.x);
                y_sum += point.y;
            }
        }
        layout.set(id, LayoutPoint::new(min_x - 1.0, y_sum / children.len() as f64));
    }
}

/// Pre-order pass overwriting x with the depth from `root`
fn assign_depth_x(hierarchy: &ConceptHierarchy, root: NodeId, layout: &mut CladogramLayout) {
    let mut stack: Vec<(NodeId, f64)> = vec![(root, 0.0)];
    while let Some((id, x)) = stack.pop() {
        layout.set_x(id, x);
        stack.extend(hierarchy.children(id).iter().rev().map(|&child| (child, x + 1.0)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anatomy_hierarchy::RelationTables;

    fn hierarchy(parts: &str, relations: &str) -> ConceptHierarchy {
        ConceptHierarchy::build(&RelationTables::parse(parts, "", relations)).unwrap()
    }

    fn example() -> ConceptHierarchy {
        hierarchy(
            "id\trep\tname\nP\t\tTrunk\nA\t\tArm\nB\t\tLeg\nC\t\tHand\n",
            "parent\tpname\tchild\tcname\nP\tTrunk\tA\tArm\nP\tTrunk\tB\tLeg\nA\tArm\tC\tHand\n",
        )
    }

    fn point_of(h: &ConceptHierarchy, layout: &CladogramLayout, concept: &str) -> LayoutPoint {
        layout.get(h.find(concept).unwrap()).unwrap()
    }

    #[test]
    fn test_equal_leaf_depth_example() {
        let h = example();
        let layout = layout_equal_leaf_depth(&h);

        assert_eq!(point_of(&h, &layout, "C"), LayoutPoint::new(2.0, 0.0));
        assert_eq!(point_of(&h, &layout, "B"), LayoutPoint::new(2.0, 1.0));
        assert_eq!(point_of(&h, &layout, "A"), LayoutPoint::new(1.0, 0.0));
        assert_eq!(point_of(&h, &layout, "P"), LayoutPoint::new(0.0, 0.5));
        assert_eq!(layout.len(), 4);
    }

    #[test]
    fn test_uniform_edge_length_example() {
        let h = example();
        let layout = compute_layout(&h, LayoutPolicy::UniformEdgeLength);

        assert_eq!(layout.policy(), LayoutPolicy::UniformEdgeLength);
        assert_eq!(point_of(&h, &layout, "P"), LayoutPoint::new(0.0, 0.5));
        assert_eq!(point_of(&h, &layout, "A"), LayoutPoint::new(1.0, 0.0));
        assert_eq!(point_of(&h, &layout, "B"), LayoutPoint::new(1.0, 1.0));
        assert_eq!(point_of(&h, &layout, "C"), LayoutPoint::new(2.0, 0.0));
    }

    #[test]
    fn test_single_node_is_origin_under_both_policies() {
        let h = hierarchy("id\trep\tname\nR\t\tRoot\n", "");
        for policy in [LayoutPolicy::EqualLeafDepth, LayoutPolicy::UniformEdgeLength] {
            let layout = compute_layout(&h, policy);
            assert_eq!(layout.get(h.root_id()), Some(LayoutPoint::new(0.0, 0.0)));
            assert_eq!(layout.len(), 1);
        }
    }

    #[test]
    fn test_summary_counts() {
        let h = example();
        let summary = layout_equal_leaf_depth(&h).summary(&h);
        assert_eq!(
            summary,
            LayoutSummary {
                node_count: 4,
                edge_count: 3,
                leaf_count: 2
            }
        );
    }

    #[test]
    fn test_unreachable_nodes_are_not_laid_out() {
        // Y -> Z -> Y is unreachable from P
        let h = hierarchy(
            "id\trep\tname\nP\t\tP\nA\t\tA\nY\t\tY\nZ\t\tZ\n",
            "p\tpn\tc\tcn\nP\tP\tA\tA\nY\tY\tZ\tZ\nZ\tZ\tY\tY\n",
        );
        let layout = layout_equal_leaf_depth(&h);

        assert_eq!(layout.len(), 2);
        assert!(!layout.contains(h.find("Y").unwrap()));
    }

    #[test]
    fn test_shared_child_advances_counter_per_visit() {
        // S is listed under both A and B
        let h = hierarchy(
            "id\trep\tname\nP\t\tP\nA\t\tA\nB\t\tB\nS\t\tS\n",
            "p\tpn\tc\tcn\nP\tP\tA\tA\nP\tP\tB\tB\nA\tA\tS\tS\nB\tB\tS\tS\n",
        );
        let layout = layout_equal_leaf_depth(&h);

        assert_eq!(point_of(&h, &layout, "S"), LayoutPoint::new(2.0, 1.0));
        assert_eq!(point_of(&h, &layout, "A"), LayoutPoint::new(1.0, 0.0));
        assert_eq!(point_of(&h, &layout, "B"), LayoutPoint::new(1.0, 1.0));
        assert_eq!(layout.len(), 4);
    }

    #[test]
    fn test_layouts_are_recomputed_identically() {
        let h = example();
        assert_eq!(layout_equal_leaf_depth(&h), layout_equal_leaf_depth(&h));
        assert_eq!(layout_uniform_edge_length(&h), layout_uniform_edge_length(&h));
    }

    #[test]
    fn test_hundred_thousand_level_chain_layout() {
        const DEPTH: usize = 100_000;
        let mut parts = String::from("id\trep\tname\n");
        let mut relations = String::from("p\tpn\tc\tcn\n");
        for i in 0..DEPTH {
            parts.push_str(&format!("N{i}\t\tNode {i}\n"));
            if i > 0 {
                relations.push_str(&format!("N{}\tx\tN{i}\tx\n", i - 1));
            }
        }
        let h = hierarchy(&parts, &relations);

        let equal = layout_equal_leaf_depth(&h);
        let uniform = layout_uniform_edge_length(&h);
        assert_eq!(equal.len(), DEPTH);
        assert_eq!(point_of(&h, &equal, "N0"), LayoutPoint::new(0.0, 0.0));
        assert_eq!(point_of(&h, &equal, "N50000"), LayoutPoint::new(50_000.0, 0.0));
        let last = format!("N{}", DEPTH - 1);
        assert_eq!(point_of(&h, &equal, &last), LayoutPoint::new((DEPTH - 1) as f64, 0.0));
        assert_eq!(point_of(&h, &uniform, &last), LayoutPoint::new((DEPTH - 1) as f64, 0.0));
        assert_eq!(equal.summary(&h).leaf_count, 1);
    }

    #[test]
    fn test_map_points_keeps_coverage() {
        let h = example();
        let layout = layout_equal_leaf_depth(&h);
        let doubled = layout.map_points(|p| LayoutPoint::new(p.x * 2.0, p.y * 2.0));

        assert_eq!(doubled.len(), layout.len());
        assert_eq!(point_of(&h, &doubled, "P"), LayoutPoint::new(0.0, 1.0));
    }
}
