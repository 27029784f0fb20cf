// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for the layout crate.
*/

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Layout and scaling errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid viewport: width {width}, height {height}, label margin {label_margin}")]
    InvalidViewport {
        width: f64,
        height: f64,
        label_margin: f64,
    },

    #[error("Unknown layout policy: {0}")]
    UnknownPolicy(String),
}

/// Raw or scaled coordinate of one node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for LayoutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// How x coordinates are assigned; y is shared by both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPolicy {
    /// All leaves aligned at the maximum depth
    #[default]
    EqualLeafDepth,
    /// Every edge spans exactly one x unit
    UniformEdgeLength,
}

impl LayoutPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutPolicy::EqualLeafDepth => "equal_leaf_depth",
            LayoutPolicy::UniformEdgeLength => "uniform_edge_length",
        }
    }
}

impl fmt::Display for LayoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutPolicy {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equal_leaf_depth" => Ok(LayoutPolicy::EqualLeafDepth),
            "uniform_edge_length" => Ok(LayoutPolicy::UniformEdgeLength),
            _ => Err(LayoutError::UnknownPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("equal_leaf_depth".parse(), Ok(LayoutPolicy::EqualLeafDepth));
        assert_eq!(" Uniform_Edge_Length ".parse(), Ok(LayoutPolicy::UniformEdgeLength));
        assert_eq!(
            "radial".parse::<LayoutPolicy>(),
            Err(LayoutError::UnknownPolicy("radial".to_string()))
        );
    }

    #[test]
    fn test_policy_serde_matches_from_str() {
        for policy in [LayoutPolicy::EqualLeafDepth, LayoutPolicy::UniformEdgeLength] {
            let json = serde_json::to_string(&policy).unwrap();
            assert_eq!(json, format!("\"{}\"", policy));
            assert_eq!(policy.as_str().parse::<LayoutPolicy>(), Ok(policy));
        }
    }
}
