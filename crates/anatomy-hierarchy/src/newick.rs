// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Newick export of a concept hierarchy

use crate::hierarchy::ConceptHierarchy;
use crate::node::ConceptNode;
use crate::types::NodeId;

/// Newick string for the hierarchy, e.g. `(Hand,Leg)Trunk;`
///
/// Labels are node names with whitespace and `():;,` replaced by `_`.
pub fn to_newick(hierarchy: &ConceptHierarchy) -> String {
    let mut out = String::new();
    walk_in_order(
        hierarchy,
        hierarchy.root_id(),
        &mut out,
        &|out: &mut String, node: &ConceptNode| {
            if !node.is_leaf() {
                out.push('(');
            }
        },
        &|out: &mut String, _: &ConceptNode| out.push(','),
        &|out: &mut String, node: &ConceptNode| {
            if !node.is_leaf() {
                out.push(')');
            }
            out.push_str(&sanitize_label(node.label()));
        },
    );
    out.push(';');
    out
}

/// Depth-first walk with a hook before a node, between consecutive
/// children, and after a node
///
/// Runs on an explicit stack, so depth is bounded only by memory.
pub fn walk_in_order<C>(
    hierarchy: &ConceptHierarchy,
    id: NodeId,
    context: &mut C,
    pre: &impl Fn(&mut C, &ConceptNode),
    between: &impl Fn(&mut C, &ConceptNode),
    post: &impl Fn(&mut C, &ConceptNode),
) {
    pre(context, hierarchy.node(id));
    let mut stack: Vec<(NodeId, usize)> = vec![(id, 0)];
    while let Some(frame) = stack.last_mut() {
        let (current, next_child) = *frame;
        let children = hierarchy.children(current);
        match children.get(next_child) {
            Some(&child) => {
                frame.1 += 1;
                if next_child > 0 {
                    between(context, hierarchy.node(children[next_child - 1]));
                }
                pre(context, hierarchy.node(child));
                stack.push((child, 0));
            }
            None => {
                post(context, hierarchy.node(current));
                stack.pop();
            }
        }
    }
}

fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_whitespace() || "():;,".contains(c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}
