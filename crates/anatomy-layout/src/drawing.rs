// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Render-agnostic cladogram geometry.

A drawing is three layers in viewport coordinates: L-shaped edge connectors,
one dot per node and one label per leaf. Any renderer (SVG, canvas, GUI
toolkit) can paint them directly.
*/

use anatomy_hierarchy::{ConceptHierarchy, NodeId};
use serde::Serialize;
use tracing::debug;

use crate::cladogram::CladogramLayout;
use crate::scaler::{label_font_size, Scaler, Viewport};
use crate::types::LayoutPoint;

pub const DOT_RADIUS: f64 = 2.5;
pub const EDGE_STROKE_WIDTH: f64 = 0.75;
/// Horizontal gap between a leaf dot and its label
pub const LABEL_OFFSET_X: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: LayoutPoint,
    pub end: LayoutPoint,
}

impl Segment {
    pub fn new(start: LayoutPoint, end: LayoutPoint) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dot {
    pub node: NodeId,
    pub center: LayoutPoint,
    pub radius: f64,
}

/// Parent→child edge drawn as a vertical then a horizontal segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeConnector {
    pub parent: NodeId,
    pub child: NodeId,
    /// At parent x, from parent y to child y
    pub vertical: Segment,
    /// At child y, from parent x to child x
    pub horizontal: Segment,
}

impl EdgeConnector {
    fn between(parent: NodeId, from: LayoutPoint, child: NodeId, to: LayoutPoint) -> Self {
        let corner = LayoutPoint::new(from.x, to.y);
        Self {
            parent,
            child,
            vertical: Segment::new(from, corner),
            horizontal: Segment::new(corner, to),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafLabel {
    pub node: NodeId,
    pub position: LayoutPoint,
    pub text: String,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CladogramDrawing {
    pub connectors: Vec<EdgeConnector>,
    pub dots: Vec<Dot>,
    pub labels: Vec<LeafLabel>,
    pub font_size: f64,
    pub stroke_width: f64,
}

impl CladogramDrawing {
    /// Scale `layout` into `viewport` and emit its geometry
    ///
    /// Nodes without a point in `layout` are skipped, as are edges touching
    /// them.
    pub fn build(hierarchy: &ConceptHierarchy, layout: &CladogramLayout, viewport: &Viewport) -> Self {
        let scaler = Scaler::for_layout(layout, viewport);
        let scaled = |id: NodeId| layout.get(id).map(|point| scaler.scale(point));

        let leaf_count = layout.iter().filter(|&(id, _)| hierarchy.is_leaf(id)).count();
        let font_size = label_font_size(viewport.height(), leaf_count, viewport.max_font_size());

        let mut drawing = Self {
            connectors: Vec::new(),
            dots: Vec::with_capacity(layout.len()),
            labels: Vec::with_capacity(leaf_count),
            font_size,
            stroke_width: EDGE_STROKE_WIDTH,
        };

        for (id, _) in layout.iter() {
            let Some(center) = scaled(id) else {
                continue;
            };

            for &child in hierarchy.children(id) {
                if let Some(child_point) = scaled(child) {
                    drawing
                        .connectors
                        .push(EdgeConnector::between(id, center, child, child_point));
                }
            }

            drawing.dots.push(Dot {
                node: id,
                center,
                radius: DOT_RADIUS,
            });

            if hierarchy.is_leaf(id) {
                drawing.labels.push(LeafLabel {
                    node: id,
                    position: LayoutPoint::new(center.x + LABEL_OFFSET_X, center.y),
                    text: hierarchy.node(id).label().to_string(),
                    font_size,
                });
            }
        }

        debug!(target: "anatomy-layout",
            "Drawing: {} dots, {} connectors, {} labels at font size {}",
            drawing.dots.len(), drawing.connectors.len(), drawing.labels.len(), font_size);
        drawing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cladogram::layout_equal_leaf_depth;
    use anatomy_hierarchy::RelationTables;

    fn example() -> ConceptHierarchy {
        ConceptHierarchy::build(&RelationTables::parse(
            "id\trep\tname\nP\t\tTrunk\nA\t\tArm\nB\t\tLeg\nC\t\tHand\n",
            "",
            "parent\tpname\tchild\tcname\nP\tTrunk\tA\tArm\nP\tTrunk\tB\tLeg\nA\tArm\tC\tHand\n",
        ))
        .unwrap()
    }

    #[test]
    fn test_drawing_counts_and_font() {
        let h = example();
        let layout = layout_equal_leaf_depth(&h);
        let viewport = Viewport::new(180.0, 100.0, 80.0).unwrap();
        let drawing = CladogramDrawing::build(&h, &layout, &viewport);

        assert_eq!(drawing.dots.len(), 4);
        assert_eq!(drawing.connectors.len(), 3);
        assert_eq!(drawing.labels.len(), 2);
        assert_eq!(drawing.font_size, 12.0);
        assert!(drawing.dots.iter().all(|dot| dot.radius == DOT_RADIUS));
    }

    #[test]
    fn test_connector_is_l_shaped() {
        let h = example();
        let layout = layout_equal_leaf_depth(&h);
        let viewport = Viewport::new(180.0, 100.0, 80.0).unwrap();
        let drawing = CladogramDrawing::build(&h, &layout, &viewport);

        let root = h.root_id();
        let leg = h.find("B").unwrap();
        let connector = drawing
            .connectors
            .iter()
            .find(|c| c.parent == root && c.child == leg)
            .unwrap();

        // P scales to (0, 50), B to (100, 100)
        assert_eq!(
            connector.vertical,
            Segment::new(LayoutPoint::new(0.0, 50.0), LayoutPoint::new(0.0, 100.0))
        );
        assert_eq!(
            connector.horizontal,
            Segment::new(LayoutPoint::new(0.0, 100.0), LayoutPoint::new(100.0, 100.0))
        );
    }

    #[test]
    fn test_leaf_labels_offset_from_dot() {
        let h = example();
        let layout = layout_equal_leaf_depth(&h);
        let viewport = Viewport::new(180.0, 100.0, 80.0).unwrap();
        let drawing = CladogramDrawing::build(&h, &layout, &viewport);

        let hand = drawing.labels.iter().find(|l| l.text == "Hand").unwrap();
        assert_eq!(hand.position, LayoutPoint::new(104.0, 0.0));
        assert!(drawing.labels.iter().all(|l| l.text != "Trunk"));
    }

    #[test]
    fn test_many_leaves_shrink_font() {
        let h = example();
        let layout = layout_equal_leaf_depth(&h);
        let viewport = Viewport::new(180.0, 10.0, 80.0).unwrap();
        let drawing = CladogramDrawing::build(&h, &layout, &viewport);
        assert_eq!(drawing.font_size, 5.0);
    }
}
