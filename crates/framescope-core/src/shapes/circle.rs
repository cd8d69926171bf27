//! Circle shape.

use super::Attrs;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A filled circle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(flatten)]
    pub attrs: Attrs,
}

impl Circle {
    /// Create a complete circle. Radius must be non-negative.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center: Some(center),
            radius: Some(radius),
            attrs: Attrs::default(),
        }
    }

    /// Bounding box: center +/- radius on both axes.
    pub fn bounds(&self) -> Option<Rect> {
        let center = self.center?;
        let radius = self.radius?;
        Some(Rect::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        ))
    }
}
