// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fitting raw layout coordinates into a drawing viewport

use serde::Serialize;

use crate::cladogram::CladogramLayout;
use crate::types::{LayoutError, LayoutPoint, LayoutResult};

pub const DEFAULT_LABEL_MARGIN: f64 = 80.0;
pub const DEFAULT_MAX_FONT_SIZE: f64 = 12.0;

/// Target drawing area
///
/// The rightmost `label_margin` units of the width are reserved for leaf
/// labels, so x coordinates scale into `width - label_margin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    width: f64,
    height: f64,
    label_margin: f64,
    max_font_size: f64,
}

impl Viewport {
    /// # Errors
    ///
    /// `InvalidViewport` unless width and height are positive and finite and
    /// `0 <= label_margin < width`.
    pub fn new(width: f64, height: f64, label_margin: f64) -> LayoutResult<Self> {
        let valid = width.is_finite()
            && height.is_finite()
            && label_margin.is_finite()
            && width > 0.0
            && height > 0.0
            && label_margin >= 0.0
            && label_margin < width;
        if !valid {
            return Err(LayoutError::InvalidViewport {
                width,
                height,
                label_margin,
            });
        }
        Ok(Self {
            width,
            height,
            label_margin,
            max_font_size: DEFAULT_MAX_FONT_SIZE,
        })
    }

    /// Viewport with the default label margin
    pub fn with_size(width: f64, height: f64) -> LayoutResult<Self> {
        Self::new(width, height, DEFAULT_LABEL_MARGIN)
    }

    /// Non-positive sizes are ignored
    pub fn with_max_font_size(mut self, max_font_size: f64) -> Self {
        if max_font_size > 0.0 {
            self.max_font_size = max_font_size;
        }
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn label_margin(&self) -> f64 {
        self.label_margin
    }

    pub fn max_font_size(&self) -> f64 {
        self.max_font_size
    }

    /// Width available to the tree itself
    pub fn drawing_width(&self) -> f64 {
        self.width - self.label_margin
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisRange {
    min: f64,
    range: f64,
}

impl AxisRange {
    fn fit(values: impl Iterator<Item = f64>) -> Self {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if min > max {
            // no points
            return Self { min: 0.0, range: 1.0 };
        }
        let range = if max > min { max - min } else { 1.0 };
        Self { min, range }
    }

    fn scale(&self, value: f64, dimension: f64) -> f64 {
        (value - self.min) / self.range * dimension
    }
}

/// Affine map from raw layout space into a viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaler {
    x: AxisRange,
    y: AxisRange,
    width: f64,
    height: f64,
}

impl Scaler {
    /// Fit the bounding box of `points` to `viewport`
    ///
    /// An axis on which every point agrees gets a range of 1, so every such
    /// point maps to 0 rather than dividing by zero.
    pub fn fit(points: &[LayoutPoint], viewport: &Viewport) -> Self {
        Self {
            x: AxisRange::fit(points.iter().map(|p| p.x)),
            y: AxisRange::fit(points.iter().map(|p| p.y)),
            width: viewport.drawing_width(),
            height: viewport.height(),
        }
    }

    pub fn for_layout(layout: &CladogramLayout, viewport: &Viewport) -> Self {
        let points: Vec<LayoutPoint> = layout.points().collect();
        Self::fit(&points, viewport)
    }

    pub fn scale(&self, point: LayoutPoint) -> LayoutPoint {
        LayoutPoint::new(
            self.x.scale(point.x, self.width),
            self.y.scale(point.y, self.height),
        )
    }
}

/// Layout with every point mapped into `viewport`
pub fn scale_layout(layout: &CladogramLayout, viewport: &Viewport) -> CladogramLayout {
    let scaler = Scaler::for_layout(layout, viewport);
    layout.map_points(|point| scaler.scale(point))
}

/// Leaf label font size: `min(max_font_size, height / leaf_count)`
///
/// With no leaves the cap applies.
pub fn label_font_size(height: f64, leaf_count: usize, max_font_size: f64) -> f64 {
    if leaf_count == 0 {
        return max_font_size;
    }
    max_font_size.min(height / leaf_count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_validation() {
        assert!(Viewport::new(800.0, 600.0, 80.0).is_ok());
        assert!(Viewport::new(800.0, 600.0, 0.0).is_ok());
        assert!(Viewport::new(0.0, 600.0, 0.0).is_err());
        assert!(Viewport::new(800.0, -1.0, 80.0).is_err());
        assert!(Viewport::new(80.0, 600.0, 80.0).is_err());
        assert!(Viewport::new(f64::NAN, 600.0, 80.0).is_err());
        assert_eq!(
            Viewport::new(800.0, 600.0, -5.0),
            Err(LayoutError::InvalidViewport {
                width: 800.0,
                height: 600.0,
                label_margin: -5.0
            })
        );
    }

    #[test]
    fn test_viewport_defaults() {
        let viewport = Viewport::with_size(800.0, 600.0).unwrap();
        assert_eq!(viewport.drawing_width(), 720.0);
        assert_eq!(viewport.max_font_size(), 12.0);
        assert_eq!(viewport.with_max_font_size(0.0).max_font_size(), 12.0);
        assert_eq!(viewport.with_max_font_size(9.0).max_font_size(), 9.0);
    }

    #[test]
    fn test_scale_example_points() {
        let viewport = Viewport::new(180.0, 100.0, 80.0).unwrap();
        let points = [
            LayoutPoint::new(0.0, 0.5),
            LayoutPoint::new(1.0, 0.0),
            LayoutPoint::new(2.0, 1.0),
            LayoutPoint::new(2.0, 0.0),
        ];
        let scaler = Scaler::fit(&points, &viewport);

        assert_eq!(scaler.scale(LayoutPoint::new(0.0, 0.5)), LayoutPoint::new(0.0, 50.0));
        assert_eq!(scaler.scale(LayoutPoint::new(1.0, 0.0)), LayoutPoint::new(50.0, 0.0));
        assert_eq!(scaler.scale(LayoutPoint::new(2.0, 1.0)), LayoutPoint::new(100.0, 100.0));
    }

    #[test]
    fn test_degenerate_axes_use_unit_range() {
        let viewport = Viewport::new(180.0, 100.0, 80.0).unwrap();
        let scaler = Scaler::fit(&[LayoutPoint::new(3.0, 7.0)], &viewport);

        assert_eq!(scaler.scale(LayoutPoint::new(3.0, 7.0)), LayoutPoint::new(0.0, 0.0));
        assert_eq!(scaler.scale(LayoutPoint::new(4.0, 8.0)), LayoutPoint::new(100.0, 100.0));
    }

    #[test]
    fn test_empty_point_set_is_identity_scaled() {
        let viewport = Viewport::new(180.0, 100.0, 80.0).unwrap();
        let scaler = Scaler::fit(&[], &viewport);
        assert_eq!(scaler.scale(LayoutPoint::new(1.0, 1.0)), LayoutPoint::new(100.0, 100.0));
    }

    #[test]
    fn test_label_font_size() {
        assert_eq!(label_font_size(600.0, 10, 12.0), 12.0);
        assert_eq!(label_font_size(600.0, 100, 12.0), 6.0);
        assert_eq!(label_font_size(600.0, 0, 12.0), 12.0);
    }
}
