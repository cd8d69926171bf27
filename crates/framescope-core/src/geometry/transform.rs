//! 2D affine transform used as the composable view-transform stack.

use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Geometry errors.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("transform is not invertible (determinant is zero)")]
    NotInvertible,
}

/// An immutable 2D affine transform.
///
/// Represents `[x'; y'] = [[a, b], [c, d]] * [x; y] + [tx, ty]`.
/// Every operation returns a new value; composition is associative but not
/// commutative, with [`Transform::IDENTITY`] as the neutral element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Create a transform from raw coefficients.
    pub fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Counter-clockwise rotation by `angle` radians (mathematical convention).
    pub fn rotate(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, -sin, sin, cos, 0.0, 0.0)
    }

    /// Clockwise screen-space rotation by `degrees`.
    ///
    /// Degrees are converted to radians with the sign negated, so a positive
    /// argument turns the scene clockwise as seen on screen.
    pub fn rotate_clockwise_degrees(degrees: f64) -> Self {
        Self::rotate(-degrees.to_radians())
    }

    /// Pure translation.
    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Axis-aligned scaling about the origin.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Compose with another transform: the result applies `other` first,
    /// then `self` (matrix product `self * other`).
    pub fn concat(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            tx: self.a * other.tx + self.b * other.ty + self.tx,
            ty: self.c * other.tx + self.d * other.ty + self.ty,
        }
    }

    /// Forward point mapping.
    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.b * point.y + self.tx,
            self.c * point.x + self.d * point.y + self.ty,
        )
    }

    /// The determinant `a*d - b*c`.
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse point mapping.
    ///
    /// Fails when the determinant is exactly zero. Callers must not invoke
    /// this on a transform known to be degenerate (e.g. zero scale); such a
    /// failure is an invariant violation, fatal to the call but not to the
    /// session.
    pub fn revert(&self, point: Point) -> Result<Point, GeometryError> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(GeometryError::NotInvertible);
        }
        let inv = 1.0 / det;
        let a = self.d * inv;
        let b = -self.b * inv;
        let c = -self.c * inv;
        let d = self.a * inv;
        let tx = (self.c * self.ty - self.d * self.tx) * inv;
        let ty = (self.b * self.tx - self.a * self.ty) * inv;
        Ok(Point::new(
            a * point.x + b * point.y + tx,
            c * point.x + d * point.y + ty,
        ))
    }

    /// Transform mapping `from` onto `to`, preserving aspect ratio.
    ///
    /// Uses the smaller of the two axis scale factors shrunk by 5% for
    /// margin, with a centering translation. A `from` box with zero extent
    /// on either axis yields a pure center-to-center translation.
    pub fn fit_box(from: Rect, to: Rect) -> Self {
        let c1 = from.center();
        let c2 = to.center();
        let s = if from.width() == 0.0 || from.height() == 0.0 {
            1.0
        } else {
            (to.height() / from.height()).min(to.width() / from.width()) * 0.95
        };
        Self::translate(c2.x, c2.y)
            .concat(&Self::scale(s, s))
            .concat(&Self::translate(-c1.x, -c1.y))
    }

    /// Convert to a kurbo [`Affine`] for sinks that speak kurbo.
    pub fn to_affine(&self) -> Affine {
        // kurbo coefficient order is [a, c, b, d, tx, ty] relative to the
        // row-major layout used here.
        Affine::new([self.a, self.c, self.b, self.d, self.tx, self.ty])
    }
}
