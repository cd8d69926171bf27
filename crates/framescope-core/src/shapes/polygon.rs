//! Polygon shape.

use super::Attrs;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A filled polygon over an ordered point sequence, closed implicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
    #[serde(flatten)]
    pub attrs: Attrs,
}

impl Polygon {
    /// Create a polygon from an ordered point sequence.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            attrs: Attrs::default(),
        }
    }

    /// Running merge of all point boxes; `None` for zero points.
    pub fn bounds(&self) -> Option<Rect> {
        let mut iter = self.points.iter();
        let first = iter.next()?;
        let mut rect = Rect::from_points(*first, *first);
        for p in iter {
            rect = rect.union_pt(*p);
        }
        Some(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_merges_all_points() {
        let poly = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, -3.0),
            Point::new(4.0, 8.0),
        ]);
        assert_eq!(poly.bounds(), Some(Rect::new(0.0, -3.0, 10.0, 8.0)));
    }

    #[test]
    fn test_single_point_polygon_is_degenerate() {
        let poly = Polygon::new(vec![Point::new(2.0, 2.0)]);
        assert_eq!(poly.bounds(), Some(Rect::new(2.0, 2.0, 2.0, 2.0)));
    }

    #[test]
    fn test_empty_polygon_has_no_bounds() {
        assert_eq!(Polygon::new(Vec::new()).bounds(), None);
    }
}
