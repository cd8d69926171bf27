//! Scene-DSL writer, the inverse of the parser for complete shapes.

use crate::shapes::Shape;
use kurbo::Point;
use std::fmt::Write;

/// Serialize shapes as a `(scene ...)` document, one shape per line.
pub fn serialize_scene<'a, I>(shapes: I) -> String
where
    I: IntoIterator<Item = &'a Shape>,
{
    let mut out = String::from("(scene\n");
    for shape in shapes {
        out.push_str("  ");
        out.push_str(&serialize_shape(shape));
        out.push('\n');
    }
    out.push(')');
    out
}

/// Serialize one shape as a single-line form.
///
/// Emits only the fields the parser needs to rebuild the geometry plus the
/// stroke color; `comment` and `layer` are display-side attributes and are
/// not written. Missing optional fields are omitted rather than invented.
pub fn serialize_shape(shape: &Shape) -> String {
    let mut out = String::new();
    out.push('(');
    out.push_str(shape.kind().keyword());

    match shape {
        Shape::Circle(c) => {
            if let Some(center) = c.center {
                write_point(&mut out, "center", center);
            }
            if let Some(radius) = c.radius {
                let _ = write!(out, " (radius {})", fmt_num(radius));
            }
        }
        Shape::Line(s) | Shape::CappedLine(s) => {
            // Positional `point` fields: the parser assigns the first to
            // point1 and the last to point2.
            if let Some(p) = s.point1 {
                write_point(&mut out, "point", p);
            }
            if let Some(p) = s.point2 {
                write_point(&mut out, "point", p);
            }
            if let Some(width) = s.width {
                let _ = write!(out, " (width {})", fmt_num(width));
            }
        }
        Shape::Polygon(p) => {
            for point in &p.points {
                write_point(&mut out, "point", *point);
            }
        }
    }

    if let Some(color) = &shape.attrs().color {
        let _ = write!(out, " (color \"{color}\")");
    }

    out.push(')');
    out
}

fn write_point(out: &mut String, key: &str, p: Point) {
    let _ = write!(out, " ({key} {} {})", fmt_num(p.x), fmt_num(p.y));
}

/// Print integer-valued coordinates without a trailing `.0`.
fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::{ParseOptions, parse_scene};
    use crate::shapes::{Circle, Polygon, Segment};

    #[test]
    fn test_serialize_circle() {
        let mut shape = Shape::Circle(Circle::new(Point::new(0.0, -2.5), 5.0));
        shape.attrs_mut().color = Some("red".into());
        assert_eq!(
            serialize_shape(&shape),
            r#"(circle (center 0 -2.5) (radius 5) (color "red"))"#
        );
    }

    #[test]
    fn test_serialize_omits_missing_fields() {
        let shape = Shape::Line(Segment {
            point1: Some(Point::new(1.0, 2.0)),
            point2: None,
            width: None,
            attrs: Default::default(),
        });
        assert_eq!(serialize_shape(&shape), "(line (point 1 2))");
    }

    #[test]
    fn test_segments_serialize_positional_point_fields() {
        let line = Shape::Line(Segment::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0), 2.0));
        assert_eq!(
            serialize_shape(&line),
            "(line (point 1 2) (point 3 4) (width 2))"
        );
        let cline = Shape::CappedLine(Segment::new(
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            1.0,
        ));
        assert_eq!(
            serialize_shape(&cline),
            "(cline (point 0 0) (point 5 5) (width 1))"
        );
    }

    #[test]
    fn test_serialize_scene_layout() {
        let shapes = vec![
            Shape::Circle(Circle::new(Point::new(0.0, 0.0), 1.0)),
            Shape::Polygon(Polygon::new(vec![
                Point::new(0.0, 0.0),
                Point::new(3.0, 0.0),
            ])),
        ];
        assert_eq!(
            serialize_scene(&shapes),
            "(scene\n  (circle (center 0 0) (radius 1))\n  (polygon (point 0 0) (point 3 0))\n)"
        );
    }

    #[test]
    fn test_parse_of_serialize_is_identity() {
        let mut line = Shape::CappedLine(Segment::new(
            Point::new(-1.5, 2.0),
            Point::new(4.0, 4.0),
            2.0,
        ));
        line.attrs_mut().color = Some("rgba(99, 99, 99, 0.99)".into());
        let shapes = vec![
            Shape::Circle(Circle::new(Point::new(10.0, 20.0), 3.25)),
            line,
            Shape::Polygon(Polygon::new(vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(5.0, 7.5),
            ])),
        ];
        let text = serialize_scene(&shapes);
        let parsed = parse_scene(&text, ParseOptions { strict: true }).unwrap();
        assert_eq!(parsed, shapes);
    }
}
