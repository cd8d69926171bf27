//! Concrete frame sources.

use framescope_core::frame::BoxFuture;
use framescope_core::{FrameError, FrameResult, FrameSource, SceneInfo, Shape};
use kurbo::Rect;
use std::path::PathBuf;

/// A frame source holding every frame in memory. Used by tests and by
/// embedders that assemble frames programmatically.
pub struct MemorySource {
    frames: Vec<Vec<Shape>>,
}

impl MemorySource {
    pub fn new(frames: Vec<Vec<Shape>>) -> Self {
        Self { frames }
    }

    /// Scene info derived from the stored frames: frame count plus the
    /// union box of every shape across all frames.
    pub fn info(&self) -> SceneInfo {
        let mut bounds: Option<Rect> = None;
        for shape in self.frames.iter().flatten() {
            if let Some(b) = shape.bounds() {
                bounds = Some(match bounds {
                    Some(acc) => acc.union(b),
                    None => b,
                });
            }
        }
        SceneInfo {
            minxy: bounds.map(|b| b.origin()),
            maxxy: bounds.map(|b| kurbo::Point::new(b.x1, b.y1)),
            nframes: self.frames.len(),
        }
    }
}

impl FrameSource for MemorySource {
    fn load(&mut self, frame: usize) -> BoxFuture<'_, FrameResult<Vec<Shape>>> {
        let result = self
            .frames
            .get(frame)
            .cloned()
            .ok_or_else(|| FrameError::Load(format!("no frame {frame}")));
        Box::pin(async move { result })
    }
}

/// A frame source reading JSON documents from a directory:
/// `info.json` holds the [`SceneInfo`], `frame-<n>.json` each frame's shape
/// descriptors. Every load re-reads the file; nothing is cached.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn info(&self) -> FrameResult<SceneInfo> {
        let path = self.root.join("info.json");
        let text = std::fs::read_to_string(&path)
            .map_err(|err| FrameError::Load(format!("{}: {err}", path.display())))?;
        serde_json::from_str(&text).map_err(|err| FrameError::Decode(err.to_string()))
    }
}

impl FrameSource for DirectorySource {
    fn load(&mut self, frame: usize) -> BoxFuture<'_, FrameResult<Vec<Shape>>> {
        let path = self.root.join(format!("frame-{frame}.json"));
        Box::pin(async move {
            let text = std::fs::read_to_string(&path)
                .map_err(|err| FrameError::Load(format!("{}: {err}", path.display())))?;
            serde_json::from_str(&text).map_err(|err| FrameError::Decode(err.to_string()))
        })
    }
}
