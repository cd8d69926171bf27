//! Rendering interface.
//!
//! The viewport does not paint; it walks the scene in paint order and calls
//! shape-specific primitives on a [`RenderSink`]. Sinks receive the full
//! screen-from-scene transform once per pass and interpret all coordinates
//! in scene space.

use crate::geometry::Transform;
use crate::shapes::Shape;
use crate::viewport::Viewport;
use kurbo::{Point, Vec2};

/// Color used to re-paint selected shapes on top of the scene.
const HIGHLIGHT_COLOR: &str = "rgba(200, 200, 230, 0.3)";

/// A paint surface the viewport renders into.
pub trait RenderSink {
    /// Wipe the surface to the background color.
    fn clear(&mut self, background: &str);

    /// Set the screen-from-scene transform for the primitives that follow.
    fn set_transform(&mut self, transform: &Transform);

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str);

    /// Stroke a segment; `capped` adds filled round caps of radius
    /// `width / 2` at both endpoints.
    fn stroke_segment(&mut self, p1: Point, p2: Point, width: f64, color: &str, capped: bool);

    fn fill_polygon(&mut self, points: &[Point], color: &str);

    /// Lay text out along the `from`→`to` axis, scaled to fit `height`.
    fn draw_label(&mut self, from: Point, to: Point, height: f64, text: &str);
}

impl Viewport {
    /// Paint the scene: background, shapes in z-order, then selected shapes
    /// again in the highlight color. Shapes with incomplete geometry are
    /// skipped.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        sink.clear(&self.config().default_background);
        sink.set_transform(&self.full_transform());
        for (_, shape) in self.shapes_ordered() {
            self.paint_shape(sink, shape, None);
        }
        for id in self.selected() {
            if let Some(shape) = self.shape(*id) {
                self.paint_shape(sink, shape, Some(HIGHLIGHT_COLOR));
            }
        }
    }

    fn paint_shape(&self, sink: &mut dyn RenderSink, shape: &Shape, color_override: Option<&str>) {
        let color = color_override
            .or(shape.attrs().color.as_deref())
            .unwrap_or(&self.config().default_color);
        match shape {
            Shape::Circle(c) => {
                let (Some(center), Some(radius)) = (c.center, c.radius) else {
                    return;
                };
                sink.fill_circle(center, radius, color);
                if let Some(comment) = &c.attrs.comment {
                    // Label across the horizontal diameter, slightly inset.
                    let half = Vec2::new(radius * 0.6, 0.0);
                    sink.draw_label(center - half, center + half, radius * 1.2, comment);
                }
            }
            Shape::Line(s) | Shape::CappedLine(s) => {
                let (Some(p1), Some(p2)) = (s.point1, s.point2) else {
                    return;
                };
                let width = s.width.unwrap_or(self.config().default_width);
                let capped = matches!(shape, Shape::CappedLine(_));
                sink.stroke_segment(p1, p2, width, color, capped);
                if let Some(comment) = &s.attrs.comment {
                    sink.draw_label(p1, p2, width, comment);
                }
            }
            Shape::Polygon(p) => {
                if !p.points.is_empty() {
                    sink.fill_polygon(&p.points, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Polygon, Segment};
    use kurbo::Size;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear(String),
        SetTransform,
        Circle(Point, f64, String),
        Segment(Point, Point, f64, String, bool),
        Polygon(usize, String),
        Label(String),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl RenderSink for Recorder {
        fn clear(&mut self, background: &str) {
            self.0.push(Op::Clear(background.to_string()));
        }

        fn set_transform(&mut self, _transform: &Transform) {
            self.0.push(Op::SetTransform);
        }

        fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
            self.0.push(Op::Circle(center, radius, color.to_string()));
        }

        fn stroke_segment(&mut self, p1: Point, p2: Point, width: f64, color: &str, capped: bool) {
            self.0
                .push(Op::Segment(p1, p2, width, color.to_string(), capped));
        }

        fn fill_polygon(&mut self, points: &[Point], color: &str) {
            self.0.push(Op::Polygon(points.len(), color.to_string()));
        }

        fn draw_label(&mut self, _from: Point, _to: Point, _height: f64, text: &str) {
            self.0.push(Op::Label(text.to_string()));
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(Size::new(800.0, 600.0))
    }

    #[test]
    fn test_render_walks_paint_order() {
        let mut vp = viewport();
        vp.add_shape(Shape::Circle(Circle::new(Point::new(0.0, 0.0), 2.0)));
        vp.add_shape(Shape::Line(Segment::new(
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            1.0,
        )));
        vp.add_shape(Shape::Polygon(Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ])));

        let mut sink = Recorder::default();
        vp.render(&mut sink);
        assert_eq!(sink.0[0], Op::Clear("#2c2929".to_string()));
        assert_eq!(sink.0[1], Op::SetTransform);
        assert!(matches!(sink.0[2], Op::Circle(..)));
        assert!(matches!(sink.0[3], Op::Segment(.., false)));
        assert!(matches!(sink.0[4], Op::Polygon(3, _)));
    }

    #[test]
    fn test_capped_segments_render_with_caps() {
        let mut vp = viewport();
        vp.add_shape(Shape::CappedLine(Segment::new(
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            2.0,
        )));
        let mut sink = Recorder::default();
        vp.render(&mut sink);
        assert!(matches!(sink.0[2], Op::Segment(.., true)));
    }

    #[test]
    fn test_comments_emit_labels() {
        let mut vp = viewport();
        let mut circle = Shape::Circle(Circle::new(Point::new(0.0, 0.0), 10.0));
        circle.attrs_mut().comment = Some("hub".to_string());
        vp.add_shape(circle);
        let mut sink = Recorder::default();
        vp.render(&mut sink);
        assert!(sink.0.contains(&Op::Label("hub".to_string())));
    }

    #[test]
    fn test_incomplete_shapes_are_skipped() {
        let mut vp = viewport();
        vp.add_shape(Shape::Circle(Circle {
            center: Some(Point::new(0.0, 0.0)),
            radius: None,
            attrs: Default::default(),
        }));
        let mut sink = Recorder::default();
        vp.render(&mut sink);
        assert_eq!(sink.0.len(), 2); // clear + set_transform only
    }

    #[test]
    fn test_selected_shapes_rendered_highlighted_on_top() {
        let mut vp = viewport();
        vp.add_shape(Shape::Circle(Circle::new(Point::new(0.0, 0.0), 5.0)));
        vp.update_selection(Point::new(0.0, 0.0), Point::new(800.0, 600.0))
            .unwrap();

        let mut sink = Recorder::default();
        vp.render(&mut sink);
        let highlighted: Vec<&Op> = sink
            .0
            .iter()
            .filter(|op| matches!(op, Op::Circle(_, _, color) if color == HIGHLIGHT_COLOR))
            .collect();
        assert_eq!(highlighted.len(), 1);
        assert!(matches!(sink.0.last(), Some(Op::Circle(..))));
    }
}
