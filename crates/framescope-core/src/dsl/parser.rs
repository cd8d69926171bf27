//! Recursive-descent parser for the scene DSL.

use super::token::{Token, tokenize};
use super::ParseError;
use crate::shapes::{Attrs, Circle, Polygon, Segment, Shape, ShapeKind};
use kurbo::Point;

/// Parser configuration.
///
/// The default mode is tolerant, matching the format's original contract:
/// unknown shape kinds and field keys are skipped without error, and a shape
/// missing a required field still parses (it fails later, at bounding-box
/// time). Strict mode turns all of those into [`ParseError`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub strict: bool,
}

/// Parse a scene text into shapes.
///
/// The `(scene ...)` envelope is optional; top-level shape forms are
/// accepted with or without it. A malformed token stream (unbalanced or
/// truncated forms, a non-number where one is required) is an error in both
/// modes and leaves the caller's scene unchanged.
pub fn parse_scene(input: &str, options: ParseOptions) -> Result<Vec<Shape>, ParseError> {
    let tokens = tokenize(input);
    Parser {
        tokens: &tokens,
        pos: 0,
        options,
    }
    .parse()
}

/// Accumulates fields before the shape kind fixes their interpretation.
#[derive(Default)]
struct Draft {
    center: Option<Point>,
    radius: Option<f64>,
    point1: Option<Point>,
    point2: Option<Point>,
    width: Option<f64>,
    points: Vec<Point>,
    attrs: Attrs,
}

impl Draft {
    fn finish(self, kind: ShapeKind, strict: bool) -> Result<Shape, ParseError> {
        if strict {
            let missing = |field: &str| ParseError::MissingField {
                kind: kind.keyword().to_string(),
                field: field.to_string(),
            };
            match kind {
                ShapeKind::Circle => {
                    if self.center.is_none() {
                        return Err(missing("center"));
                    }
                    if self.radius.is_none() {
                        return Err(missing("radius"));
                    }
                }
                ShapeKind::Line | ShapeKind::CappedLine => {
                    if self.point1.is_none() || self.point2.is_none() {
                        return Err(missing("point"));
                    }
                }
                ShapeKind::Polygon => {
                    if self.points.is_empty() {
                        return Err(missing("point"));
                    }
                }
            }
        }
        let shape = match kind {
            ShapeKind::Circle => Shape::Circle(Circle {
                center: self.center,
                radius: self.radius,
                attrs: self.attrs,
            }),
            ShapeKind::Line | ShapeKind::CappedLine => {
                let seg = Segment {
                    point1: self.point1,
                    point2: self.point2,
                    width: self.width,
                    attrs: self.attrs,
                };
                if kind == ShapeKind::Line {
                    Shape::Line(seg)
                } else {
                    Shape::CappedLine(seg)
                }
            }
            ShapeKind::Polygon => Shape::Polygon(Polygon {
                points: self.points,
                attrs: self.attrs,
            }),
        };
        Ok(shape)
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    fn parse(mut self) -> Result<Vec<Shape>, ParseError> {
        let mut shapes = Vec::new();
        while let Some(token) = self.peek() {
            if *token != Token::LParen {
                // Stray closing paren of the scene envelope, or loose atoms.
                self.pos += 1;
                continue;
            }
            self.pos += 1;
            let head = self.next()?;
            match head.text() {
                Some("scene") => {
                    // Envelope: its contents are parsed as further top-level
                    // forms and its closing paren is skipped above.
                }
                Some(keyword) => match ShapeKind::from_keyword(keyword) {
                    Some(kind) => shapes.push(self.parse_shape(kind)?),
                    None if self.options.strict => {
                        return Err(ParseError::UnknownKind(keyword.to_string()));
                    }
                    None => self.skip_form(),
                },
                None => {
                    if self.options.strict {
                        return Err(ParseError::UnexpectedToken {
                            expected: "shape kind".to_string(),
                            got: format!("{head:?}"),
                        });
                    }
                    self.skip_form();
                }
            }
        }
        Ok(shapes)
    }

    fn parse_shape(&mut self, kind: ShapeKind) -> Result<Shape, ParseError> {
        let mut draft = Draft::default();
        loop {
            match self.peek() {
                None => {
                    if self.options.strict {
                        return Err(ParseError::UnexpectedEnd);
                    }
                    break;
                }
                Some(Token::RParen) => {
                    self.pos += 1;
                    break;
                }
                Some(Token::LParen) => {
                    self.pos += 1;
                    self.parse_field(kind, &mut draft)?;
                }
                Some(other) => {
                    if self.options.strict {
                        return Err(ParseError::UnexpectedToken {
                            expected: "field or ')'".to_string(),
                            got: format!("{other:?}"),
                        });
                    }
                    self.pos += 1;
                }
            }
        }
        draft.finish(kind, self.options.strict)
    }

    fn parse_field(&mut self, kind: ShapeKind, draft: &mut Draft) -> Result<(), ParseError> {
        let key = match self.next()?.text() {
            Some(key) => key.to_string(),
            None => {
                if self.options.strict {
                    return Err(ParseError::UnexpectedToken {
                        expected: "field key".to_string(),
                        got: "(".to_string(),
                    });
                }
                self.skip_form();
                return Ok(());
            }
        };

        match key.as_str() {
            "point" | "point1" | "point2" | "center" => {
                let x = self.number()?;
                let y = self.number()?;
                let p = Point::new(x, y);
                if kind == ShapeKind::Polygon {
                    // Every point-like field appends, in order.
                    draft.points.push(p);
                } else {
                    match (key.as_str(), kind) {
                        ("center", ShapeKind::Circle) => draft.center = Some(p),
                        // Positional assignment: first `point` is point1,
                        // every later one overwrites point2 (last wins).
                        ("point", ShapeKind::Line | ShapeKind::CappedLine) => {
                            if draft.point1.is_none() {
                                draft.point1 = Some(p);
                            } else {
                                draft.point2 = Some(p);
                            }
                        }
                        ("point1", ShapeKind::Line | ShapeKind::CappedLine) => {
                            draft.point1 = Some(p);
                        }
                        ("point2", ShapeKind::Line | ShapeKind::CappedLine) => {
                            draft.point2 = Some(p);
                        }
                        _ => return self.unknown_field(kind, &key),
                    }
                }
            }
            "radius" => {
                let v = self.number()?;
                if kind == ShapeKind::Circle {
                    draft.radius = Some(v);
                } else {
                    return self.unknown_field(kind, &key);
                }
            }
            "width" => {
                let v = self.number()?;
                if matches!(kind, ShapeKind::Line | ShapeKind::CappedLine) {
                    draft.width = Some(v);
                } else {
                    return self.unknown_field(kind, &key);
                }
            }
            "color" => draft.attrs.color = Some(self.text()?),
            "comment" => draft.attrs.comment = Some(self.text()?),
            "layer" => draft.attrs.layer = Some(self.text()?),
            _ => return self.unknown_field(kind, &key),
        }

        self.close_field()
    }

    /// Handle an unrecognized or kind-mismatched field key.
    fn unknown_field(&mut self, kind: ShapeKind, key: &str) -> Result<(), ParseError> {
        if self.options.strict {
            return Err(ParseError::UnknownField {
                kind: kind.keyword().to_string(),
                field: key.to_string(),
            });
        }
        self.skip_form();
        Ok(())
    }

    /// Consume the field's closing paren. Tolerant mode swallows any extra
    /// tokens before it.
    fn close_field(&mut self) -> Result<(), ParseError> {
        if self.options.strict {
            match self.next()? {
                Token::RParen => Ok(()),
                other => Err(ParseError::UnexpectedToken {
                    expected: ")".to_string(),
                    got: format!("{other:?}"),
                }),
            }
        } else {
            self.skip_form();
            Ok(())
        }
    }

    /// Skip to the end of the form whose opening paren is already consumed.
    fn skip_form(&mut self) {
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek() {
                None => return,
                Some(Token::LParen) => depth += 1,
                Some(Token::RParen) => depth -= 1,
                Some(_) => {}
            }
            self.pos += 1;
        }
    }

    fn number(&mut self) -> Result<f64, ParseError> {
        let token = self.next()?;
        let text = token
            .text()
            .ok_or_else(|| ParseError::ExpectedNumber(format!("{token:?}")))?;
        text.parse::<f64>()
            .map_err(|_| ParseError::ExpectedNumber(text.to_string()))
    }

    fn text(&mut self) -> Result<String, ParseError> {
        let token = self.next()?;
        match token.text() {
            Some(s) => Ok(s.to_string()),
            None => Err(ParseError::UnexpectedToken {
                expected: "string".to_string(),
                got: format!("{token:?}"),
            }),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<&'a Token, ParseError> {
        let token = self.tokens.get(self.pos).ok_or(ParseError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tolerant(input: &str) -> Vec<Shape> {
        parse_scene(input, ParseOptions::default()).unwrap()
    }

    fn strict(input: &str) -> Result<Vec<Shape>, ParseError> {
        parse_scene(input, ParseOptions { strict: true })
    }

    #[test]
    fn test_parse_full_scene() {
        let shapes = tolerant(
            r#"(scene
              (circle (center 0 0) (radius 5) (color "red"))
              (line (point 1 2) (point 3 4) (width 2))
              (polygon (point 0 0) (point 10 0) (point 5 5))
            )"#,
        );
        assert_eq!(shapes.len(), 3);
        assert_eq!(
            shapes[0],
            Shape::Circle(Circle {
                center: Some(Point::new(0.0, 0.0)),
                radius: Some(5.0),
                attrs: Attrs {
                    color: Some("red".into()),
                    ..Attrs::default()
                },
            })
        );
        assert_eq!(
            shapes[1],
            Shape::Line(Segment::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0), 2.0))
        );
    }

    #[test]
    fn test_envelope_is_optional() {
        let shapes = tolerant("(circle (center 1 1) (radius 2))");
        assert_eq!(shapes.len(), 1);
    }

    #[test]
    fn test_positional_points_last_wins() {
        let shapes = tolerant("(cline (point 0 0) (point 1 1) (point 2 2) (point 3 3))");
        let Shape::CappedLine(seg) = &shapes[0] else {
            panic!("expected cline");
        };
        assert_eq!(seg.point1, Some(Point::new(0.0, 0.0)));
        assert_eq!(seg.point2, Some(Point::new(3.0, 3.0)));
    }

    #[test]
    fn test_polygon_accumulates_points() {
        let shapes = tolerant("(polygon (point 0 0) (point 1 0) (point 1 1) (point 0 1))");
        let Shape::Polygon(poly) = &shapes[0] else {
            panic!("expected polygon");
        };
        assert_eq!(poly.points.len(), 4);
    }

    #[test]
    fn test_unknown_field_skipped_tolerantly() {
        let shapes = tolerant("(circle (center 0 0) (glow 3 4 5) (radius 1))");
        let Shape::Circle(c) = &shapes[0] else {
            panic!("expected circle");
        };
        assert_eq!(c.radius, Some(1.0));
    }

    #[test]
    fn test_unknown_field_is_strict_error() {
        assert_eq!(
            strict("(circle (center 0 0) (glow 3) (radius 1))"),
            Err(ParseError::UnknownField {
                kind: "circle".into(),
                field: "glow".into()
            })
        );
    }

    #[test]
    fn test_unknown_kind_skipped_tolerantly() {
        let shapes = tolerant("(scene (blob (point 0 0)) (circle (center 0 0) (radius 1)))");
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].kind(), ShapeKind::Circle);
    }

    #[test]
    fn test_unknown_kind_is_strict_error() {
        assert_eq!(
            strict("(blob (point 0 0))"),
            Err(ParseError::UnknownKind("blob".into()))
        );
    }

    #[test]
    fn test_missing_field_tolerated_without_bounds() {
        let shapes = tolerant("(circle (center 0 0))");
        assert_eq!(shapes[0].bounds(), None);
    }

    #[test]
    fn test_missing_field_is_strict_error() {
        assert_eq!(
            strict("(circle (center 0 0))"),
            Err(ParseError::MissingField {
                kind: "circle".into(),
                field: "radius".into()
            })
        );
    }

    #[test]
    fn test_bad_number_is_error_in_both_modes() {
        let input = "(circle (center zero 0) (radius 1))";
        assert_eq!(
            parse_scene(input, ParseOptions::default()),
            Err(ParseError::ExpectedNumber("zero".into()))
        );
        assert!(strict(input).is_err());
    }

    #[test]
    fn test_comment_and_layer_fields() {
        let shapes = tolerant(r#"(line (point 0 0) (point 1 0) (comment "edge a") (layer wires))"#);
        let attrs = shapes[0].attrs();
        assert_eq!(attrs.comment.as_deref(), Some("edge a"));
        assert_eq!(attrs.layer.as_deref(), Some("wires"));
    }

    #[test]
    fn test_line_comments_ignored() {
        let shapes = tolerant("; header\n(circle (center 0 0) (radius 2)) ; trailing\n");
        assert_eq!(shapes.len(), 1);
    }
}
