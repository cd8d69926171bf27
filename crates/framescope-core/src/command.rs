//! Textual command interpreter: `draw`, `clear`, `zoom`, `set`.
//!
//! Commands never fail hard; anything wrong is reported through the
//! [`StatusSink`] and leaves the scene unchanged.

use crate::dsl::{ParseOptions, parse_scene};
use crate::shapes::{Segment, Shape};
use crate::viewport::Viewport;
use kurbo::Point;

/// Receiver for transient user-visible messages. No structured codes; how
/// long the message stays visible is the embedder's concern.
pub trait StatusSink {
    fn report(&mut self, message: &str);
}

/// Status sink routing messages to the log.
#[derive(Debug, Default)]
pub struct LogStatus;

impl StatusSink for LogStatus {
    fn report(&mut self, message: &str) {
        log::warn!("{message}");
    }
}

/// Execute one free-text command line.
pub fn run_command(viewport: &mut Viewport, line: &str, status: &mut dyn StatusSink) {
    let trimmed = line.trim();
    let (verb, args) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (trimmed, ""),
    };
    match verb {
        "draw" => cmd_draw(viewport, args, status),
        "clear" => {
            viewport.clear();
            viewport.clear_selection();
        }
        "zoom" => viewport.fit_screen(),
        "set" => cmd_set(viewport, args, status),
        _ => status.report(&format!("cannot execute '{trimmed}'")),
    }
}

/// `draw` tries the coordinate-pair shorthand first: two or more points
/// make a capped-segment polyline. Anything else is handed to the tolerant
/// scene parser.
fn cmd_draw(viewport: &mut Viewport, args: &str, status: &mut dyn StatusSink) {
    let points = scan_points(args);
    if points.len() > 1 {
        for pair in points.windows(2) {
            viewport.add_shape(Shape::CappedLine(Segment::open(pair[0], pair[1])));
        }
        return;
    }
    match parse_scene(args, ParseOptions::default()) {
        Ok(shapes) => {
            for shape in shapes {
                viewport.add_shape(shape);
            }
        }
        Err(err) => status.report(&err.to_string()),
    }
}

fn cmd_set(viewport: &mut Viewport, args: &str, status: &mut dyn StatusSink) {
    let argv = split_args(args);
    let Some(key) = argv.first() else {
        status.report("set nothing");
        return;
    };
    if argv.len() != 2 {
        status.report(&format!("fail to set default {key}"));
        return;
    }
    let value = &argv[1];
    match key.as_str() {
        "color" => viewport.config_mut().default_color = value.clone(),
        "background" => viewport.config_mut().default_background = value.clone(),
        "width" => match value.parse::<f64>() {
            Ok(width) => viewport.config_mut().default_width = width,
            Err(_) => status.report(&format!("fail to set default width '{value}'")),
        },
        _ => status.report(&format!("set nothing '{key}'")),
    }
}

/// Split an argument string on whitespace, keeping single- or double-quoted
/// runs together (quotes stripped).
fn split_args(input: &str) -> Vec<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        match bytes[pos] {
            c if c.is_ascii_whitespace() => pos += 1,
            quote @ (b'"' | b'\'') => {
                let start = pos + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end] != quote {
                    end += 1;
                }
                out.push(input[start..end].to_string());
                pos = (end + 1).min(bytes.len());
            }
            _ => {
                let start = pos;
                while pos < bytes.len() {
                    let c = bytes[pos];
                    if c.is_ascii_whitespace() || c == b'"' || c == b'\'' {
                        break;
                    }
                    pos += 1;
                }
                out.push(input[start..pos].to_string());
            }
        }
    }
    out
}

/// Scan for coordinate pairs: `{x,y}` or `(x,y)` with optional `x=` / `y=`
/// labels and signed decimal components. Non-matching text is skipped.
fn scan_points(input: &str) -> Vec<Point> {
    let mut points = Vec::new();
    let mut scanner = Scanner {
        bytes: input.as_bytes(),
        pos: 0,
    };
    while scanner.pos < scanner.bytes.len() {
        let mark = scanner.pos;
        if let Some(point) = scanner.try_pair() {
            points.push(point);
        } else {
            scanner.pos = mark + 1;
        }
    }
    points
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Scanner<'_> {
    fn try_pair(&mut self) -> Option<Point> {
        self.skip_ws();
        if !self.eat_any(b"({") {
            return None;
        }
        self.skip_ws();
        self.eat_label(b'x');
        let x = self.number()?;
        self.skip_ws();
        if !self.eat_any(b",") {
            return None;
        }
        self.skip_ws();
        self.eat_label(b'y');
        let y = self.number()?;
        self.skip_ws();
        if !self.eat_any(b")}") {
            return None;
        }
        Some(Point::new(x, y))
    }

    fn skip_ws(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn eat_any(&mut self, set: &[u8]) -> bool {
        if self.pos < self.bytes.len() && set.contains(&self.bytes[self.pos]) {
            self.pos += 1;
            return true;
        }
        false
    }

    /// Consume an optional `<name> =` label.
    fn eat_label(&mut self, name: u8) {
        let mark = self.pos;
        if self.eat_any(&[name]) {
            self.skip_ws();
            if self.eat_any(b"=") {
                self.skip_ws();
                return;
            }
        }
        self.pos = mark;
    }

    /// Signed decimal: `-?digits(.digits)?`.
    fn number(&mut self) -> Option<f64> {
        let start = self.pos;
        self.eat_any(b"-");
        let digits = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos == digits {
            return None;
        }
        if self.eat_any(b".") {
            while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
        }
        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()?
            .parse()
            .ok()
    }
}
