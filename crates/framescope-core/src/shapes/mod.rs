//! Shape definitions for the scene.

mod circle;
mod polygon;
mod segment;

pub use circle::Circle;
pub use polygon::Polygon;
pub use segment::Segment;

use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Common optional shape attributes.
///
/// `color` defaults from the viewport configuration at insertion time;
/// `comment` is a display label; `layer` is an informational tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
}

/// Shape kind, named by its scene-DSL keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Line,
    CappedLine,
    Polygon,
}

impl ShapeKind {
    /// The DSL keyword for this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Line => "line",
            ShapeKind::CappedLine => "cline",
            ShapeKind::Polygon => "polygon",
        }
    }

    /// Parse a DSL keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "circle" => Some(ShapeKind::Circle),
            "line" => Some(ShapeKind::Line),
            "cline" => Some(ShapeKind::CappedLine),
            "polygon" => Some(ShapeKind::Polygon),
            _ => None,
        }
    }
}

/// Tagged shape variant.
///
/// Geometry fields are optional: the tolerant scene parser produces a shape
/// even when a required field is missing, and such a shape fails later, at
/// bounding-box or render time, not at parse time. Shapes carry no identity;
/// the viewport assigns ids at insertion.
///
/// The serde representation matches the frame source's JSON descriptors
/// (`{"type": "circle", "center": {"x": ..., "y": ...}, ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Circle(Circle),
    Line(Segment),
    #[serde(rename = "cline")]
    CappedLine(Segment),
    Polygon(Polygon),
}

impl Shape {
    /// The DSL keyword kind of this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Line(_) => ShapeKind::Line,
            Shape::CappedLine(_) => ShapeKind::CappedLine,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Axis-aligned bounding box, `None` when geometry is incomplete.
    ///
    /// An over-approximation by design: stroke width is accounted for on
    /// segments, and it is the only geometric summary the spatial index
    /// persists.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Shape::Circle(c) => c.bounds(),
            Shape::Line(s) | Shape::CappedLine(s) => s.bounds(),
            Shape::Polygon(p) => p.bounds(),
        }
    }

    /// Common attributes.
    pub fn attrs(&self) -> &Attrs {
        match self {
            Shape::Circle(c) => &c.attrs,
            Shape::Line(s) | Shape::CappedLine(s) => &s.attrs,
            Shape::Polygon(p) => &p.attrs,
        }
    }

    /// Mutable common attributes.
    pub fn attrs_mut(&mut self) -> &mut Attrs {
        match self {
            Shape::Circle(c) => &mut c.attrs,
            Shape::Line(s) | Shape::CappedLine(s) => &mut s.attrs,
            Shape::Polygon(p) => &mut p.attrs,
        }
    }

    /// Stroke width, for the kinds that have one.
    pub fn width(&self) -> Option<f64> {
        match self {
            Shape::Line(s) | Shape::CappedLine(s) => s.width,
            _ => None,
        }
    }

    /// Whether this kind carries a stroke width (line and cline).
    pub fn has_width(&self) -> bool {
        matches!(self, Shape::Line(_) | Shape::CappedLine(_))
    }

    /// Set the stroke width on kinds that have one; no-op otherwise.
    pub fn set_width(&mut self, width: f64) {
        if let Shape::Line(s) | Shape::CappedLine(s) = self {
            s.width = Some(width);
        }
    }

    /// Translate the shape geometry by a scene-space vector.
    pub fn translate(&mut self, delta: kurbo::Vec2) {
        match self {
            Shape::Circle(c) => {
                if let Some(center) = &mut c.center {
                    *center += delta;
                }
            }
            Shape::Line(s) | Shape::CappedLine(s) => {
                if let Some(p) = &mut s.point1 {
                    *p += delta;
                }
                if let Some(p) = &mut s.point2 {
                    *p += delta;
                }
            }
            Shape::Polygon(p) => {
                for pt in &mut p.points {
                    *pt += delta;
                }
            }
        }
    }
}
