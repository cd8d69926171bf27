//! Frame data source abstraction.
//!
//! The viewport never retries or caches frame payloads; every frame change
//! issues a fresh request through the source.

use crate::shapes::Shape;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Frame-source errors.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame load failed: {0}")]
    Load(String),
    #[error("frame decode failed: {0}")]
    Decode(String),
}

/// Result type for frame-source operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for frame data sources.
///
/// Implementations may serve frames from memory, the filesystem, or a
/// network endpoint.
pub trait FrameSource: Send + Sync {
    /// Load the shape descriptors for one frame.
    fn load(&mut self, frame: usize) -> BoxFuture<'_, FrameResult<Vec<Shape>>>;
}

/// Startup document describing the scene: overall bounds and frame count.
///
/// The wire form uses corner points (`minxy`/`maxxy`) and `nframes`; either
/// corner may be absent, in which case the viewport starts from the
/// identity transform.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minxy: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxxy: Option<Point>,
    pub nframes: usize,
}

impl SceneInfo {
    /// Scene bounds when both corners are present.
    pub fn bounds(&self) -> Option<Rect> {
        Some(Rect::from_points(self.minxy?, self.maxxy?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_json_decode() {
        let json = r#"{"minxy":{"x":-10.0,"y":-10.0},"maxxy":{"x":10.0,"y":20.0},"nframes":42}"#;
        let info: SceneInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.nframes, 42);
        assert_eq!(info.bounds(), Some(Rect::new(-10.0, -10.0, 10.0, 20.0)));
    }

    #[test]
    fn test_info_without_bounds() {
        let info: SceneInfo = serde_json::from_str(r#"{"nframes":1}"#).unwrap();
        assert_eq!(info.bounds(), None);
    }
}
