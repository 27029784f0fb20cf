// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# Anatomy Layout

Turns a [`ConceptHierarchy`](anatomy_hierarchy::ConceptHierarchy) into a
cladogram:

1. [`compute_layout`] assigns every reachable node a raw `(x, y)` under a
   [`LayoutPolicy`]
2. [`Scaler`] fits raw coordinates into a [`Viewport`]
3. [`CladogramDrawing`] emits dots, L-shaped connectors and leaf labels

Layouts never modify the hierarchy and may be computed concurrently.
*/

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cladogram;
pub mod drawing;
pub mod scaler;
pub mod types;

pub use cladogram::{
    compute_layout, layout_equal_leaf_depth, layout_uniform_edge_length, CladogramLayout,
    LayoutSummary,
};
pub use drawing::{CladogramDrawing, Dot, EdgeConnector, LeafLabel, Segment};
pub use scaler::{label_font_size, scale_layout, Scaler, Viewport};
pub use types::{LayoutError, LayoutPoint, LayoutPolicy, LayoutResult};
