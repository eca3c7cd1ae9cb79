//! Bounding boxes and sub-box partitioning for fast, approximate hit-testing.

use crate::error::{LSystemError, Result};
use crate::interpreter::Vertex;
use bevy_math::Rect;
use glam::Vec2;
use std::ops::Range;

/// Axis-aligned rectangle given by its min/max corners.
pub type BoundingBox = Rect;

/// Bounding rectangle of a contiguous run of vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct SubBox {
    /// Indices of the covered vertices.
    pub range: Range<usize>,
    pub bounds: BoundingBox,
}

/// Minimal box containing every vertex. Zero-sized for fewer than two vertices.
pub fn compute_bounding_box(vertices: &[Vertex]) -> BoundingBox {
    let Some((first, rest)) = vertices.split_first() else {
        return Rect::default();
    };
    rest.iter().fold(
        Rect::from_corners(first.position, first.position),
        |bounds, v| bounds.union_point(v.position),
    )
}

/// Splits `vertices` into at most `max_boxes` contiguous runs of equal length (the last
/// one may be shorter) and bounds each run.
///
/// The runs are disjoint, ordered and together cover every vertex exactly once.
///
/// # Errors
///
/// [`LSystemError::InvalidArgument`] if `max_boxes` is zero.
pub fn compute_sub_boxes(vertices: &[Vertex], max_boxes: usize) -> Result<Vec<SubBox>> {
    if max_boxes == 0 {
        return Err(LSystemError::InvalidArgument(
            "max_boxes must be at least 1".into(),
        ));
    }
    if vertices.is_empty() {
        return Ok(Vec::new());
    }

    let chunk = vertices.len().div_ceil(max_boxes);
    Ok(vertices
        .chunks(chunk)
        .enumerate()
        .map(|(i, run)| {
            let start = i * chunk;
            SubBox {
                range: start..start + run.len(),
                bounds: compute_bounding_box(run),
            }
        })
        .collect())
}

/// The bounding box and sub-boxes of one piece of geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpatialIndex {
    pub bounding_box: BoundingBox,
    pub sub_boxes: Vec<SubBox>,
}

impl SpatialIndex {
    pub fn build(vertices: &[Vertex], max_boxes: usize) -> Result<Self> {
        Ok(Self {
            bounding_box: compute_bounding_box(vertices),
            sub_boxes: compute_sub_boxes(vertices, max_boxes)?,
        })
    }

    /// Returns `true` if `point` lies in any sub-box (edges included).
    ///
    /// Conservative: sparse regions inside a sub-box still count as hits.
    pub fn point_inside(&self, point: Vec2) -> bool {
        self.sub_boxes.iter().any(|b| b.bounds.contains(point))
    }
}
