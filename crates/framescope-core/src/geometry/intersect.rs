//! Line-segment intersection.

use kurbo::Point;

/// Intersection point of segments `a-b` and `c-d`, if any.
///
/// Solves the 2x2 linear system for the parameters `t` (along `a-b`) and `u`
/// (along `c-d`) and returns the point only when both lie in `[0, 1]`
/// inclusive. A zero determinant (parallel or coincident segments) yields
/// `None` without special-casing collinear overlap.
pub fn segment_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    let ba = b - a;
    let dc = d - c;
    let ca = c - a;

    let det = ba.x * dc.y - ba.y * dc.x;
    if det == 0.0 {
        return None;
    }

    let t = (ca.x * dc.y - ca.y * dc.x) / det;
    let u = (ca.x * ba.y - ca.y * ba.x) / det;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Point::new(a.x + t * ba.x, a.y + t * ba.y))
    } else {
        None
    }
}
