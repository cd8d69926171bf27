//! Geometry kernel: affine view transforms and segment intersection.

mod intersect;
mod transform;

pub use intersect::segment_intersection;
pub use transform::{GeometryError, Transform};
