//! Scene description DSL: a parenthesized, Lisp-like shape-list format.
//!
//! ```text
//! (scene
//!   (circle (center 0 0) (radius 5) (color "red"))
//!   (cline (point 0 0) (point 10 10) (width 2))
//! )
//! ```

mod parser;
mod serialize;
mod token;

pub use parser::{ParseOptions, parse_scene};
pub use serialize::{serialize_scene, serialize_shape};
pub use token::{Token, tokenize};

use thiserror::Error;

/// Scene-DSL parse errors.
///
/// In the default tolerant mode only malformed token streams are errors;
/// the strict-only variants tighten unknown and missing content into
/// failures.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("expected a number, got '{0}'")]
    ExpectedNumber(String),
    #[error("expected '{expected}', got '{got}'")]
    UnexpectedToken { expected: String, got: String },
    #[error("unknown shape kind '{0}'")]
    UnknownKind(String),
    #[error("unknown field '{field}' on '{kind}'")]
    UnknownField { kind: String, field: String },
    #[error("'{kind}' is missing required field '{field}'")]
    MissingField { kind: String, field: String },
}
