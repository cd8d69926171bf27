//! Framescope Core Library
//!
//! Scene model, view-transform stack, scene DSL and playback state for the
//! framescope 2D viewer. Rendering surfaces and frame transports plug in
//! through the [`render::RenderSink`] and [`frame::FrameSource`] traits.

pub mod command;
pub mod config;
pub mod dsl;
pub mod frame;
pub mod geometry;
pub mod index;
pub mod render;
pub mod shapes;
pub mod viewport;

pub use command::{LogStatus, StatusSink, run_command};
pub use config::ViewportConfig;
pub use frame::{FrameError, FrameResult, FrameSource, SceneInfo};
pub use geometry::{GeometryError, Transform, segment_intersection};
pub use index::SpatialIndex;
pub use render::RenderSink;
pub use shapes::{Attrs, Circle, Polygon, Segment, Shape, ShapeKind};
pub use viewport::Viewport;

/// Identifier the viewport assigns to a shape at insertion.
pub type ShapeId = uuid::Uuid;
