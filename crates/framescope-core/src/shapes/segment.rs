//! Stroked line segment, shared by the open (`line`) and round-capped
//! (`cline`) shape kinds.

use super::Attrs;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A stroked segment between two endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point1: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point2: Option<Point>,
    /// Stroke width; defaults from the viewport configuration at insertion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(flatten)]
    pub attrs: Attrs,
}

impl Segment {
    /// Create a complete segment with an explicit stroke width.
    pub fn new(point1: Point, point2: Point, width: f64) -> Self {
        Self {
            point1: Some(point1),
            point2: Some(point2),
            width: Some(width),
            attrs: Attrs::default(),
        }
    }

    /// Create a segment whose width is filled in at insertion time.
    pub fn open(point1: Point, point2: Point) -> Self {
        Self {
            point1: Some(point1),
            point2: Some(point2),
            width: None,
            attrs: Attrs::default(),
        }
    }

    /// Bounding box of the endpoints, inflated by half the stroke width on
    /// all sides. A missing width counts as zero.
    pub fn bounds(&self) -> Option<Rect> {
        let p1 = self.point1?;
        let p2 = self.point2?;
        let half = self.width.unwrap_or(0.0) / 2.0;
        Some(Rect::from_points(p1, p2).inflate(half, half))
    }
}
