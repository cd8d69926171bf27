//! Viewport engine: scene document, view transform stack, selection and
//! frame playback.
//!
//! The viewport is the root of session state. It owns the shape list (paint
//! order), the spatial index, the current view transform and the playback
//! cursor; everything else talks to it through explicit operations.

use crate::config::ViewportConfig;
use crate::frame::{FrameResult, FrameSource, SceneInfo};
use crate::geometry::{GeometryError, Transform};
use crate::index::SpatialIndex;
use crate::shapes::Shape;
use crate::ShapeId;
use kurbo::{Point, Rect, Size, Vec2};
use std::collections::HashMap;
use uuid::Uuid;

/// Zoom factor applied by one scale-up step; scale-down uses its inverse.
const ZOOM_STEP: f64 = 1.1;

/// Margin added around the scene box by `fit_screen`, in scene units.
const FIT_MARGIN: f64 = 10.0;

/// Area-selection state: the screen rectangle being dragged and the ids it
/// currently hits. Recomputed on every drag sample.
#[derive(Debug, Default)]
struct Selection {
    start: Option<Point>,
    end: Option<Point>,
    hits: Vec<ShapeId>,
}

/// An interactive scene viewport.
pub struct Viewport {
    config: ViewportConfig,
    shapes: HashMap<ShapeId, Shape>,
    /// Insertion order; later shapes paint on top.
    z_order: Vec<ShapeId>,
    index: SpatialIndex,
    /// The box each shape was indexed under. Removal and re-indexing go
    /// through this record, never through live geometry, so the index can
    /// not accumulate ghost entries.
    indexed: HashMap<ShapeId, Rect>,
    transform: Transform,
    screen_size: Size,
    selection: Selection,
    paused: bool,
    current_frame: usize,
    total_frames: usize,
    source: Option<Box<dyn FrameSource>>,
}

impl Viewport {
    pub fn new(screen_size: Size) -> Self {
        Self {
            config: ViewportConfig::default(),
            shapes: HashMap::new(),
            z_order: Vec::new(),
            index: SpatialIndex::new(),
            indexed: HashMap::new(),
            transform: Transform::IDENTITY,
            screen_size,
            selection: Selection::default(),
            paused: true,
            current_frame: 0,
            total_frames: 0,
            source: None,
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ViewportConfig {
        &mut self.config
    }

    // --- scene document ---

    /// Insert a shape, defaulting its color (and width, for segment kinds)
    /// from the configuration, and index it when its box is defined.
    pub fn add_shape(&mut self, mut shape: Shape) -> ShapeId {
        let attrs = shape.attrs_mut();
        if attrs.color.is_none() {
            attrs.color = Some(self.config.default_color.clone());
        }
        if shape.has_width() && shape.width().is_none() {
            shape.set_width(self.config.default_width);
        }

        let id = Uuid::new_v4();
        if let Some(bounds) = shape.bounds() {
            self.index.insert(id, bounds);
            self.indexed.insert(id, bounds);
        }
        self.shapes.insert(id, shape);
        self.z_order.push(id);
        id
    }

    /// Remove a shape and its index entry.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let shape = self.shapes.remove(&id)?;
        self.z_order.retain(|other| *other != id);
        if let Some(rect) = self.indexed.remove(&id) {
            self.index.remove(id, rect);
        }
        Some(shape)
    }

    /// Translate a shape's geometry and re-index it.
    ///
    /// The stale entry is always removed before reinsertion, whether or not
    /// one exists, so a move can never leave a ghost entry behind.
    pub fn move_shape(&mut self, id: ShapeId, delta: Vec2) -> bool {
        let Some(shape) = self.shapes.get_mut(&id) else {
            return false;
        };
        shape.translate(delta);
        let bounds = shape.bounds();
        if let Some(rect) = self.indexed.remove(&id) {
            self.index.remove(id, rect);
        }
        if let Some(bounds) = bounds {
            self.index.insert(id, bounds);
            self.indexed.insert(id, bounds);
        }
        true
    }

    /// Drop every shape, index entry and selection hit.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
        self.index.clear();
        self.indexed.clear();
        self.selection.hits.clear();
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Shapes in paint order.
    pub fn shapes_ordered(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.z_order
            .iter()
            .filter_map(|id| self.shapes.get(id).map(|shape| (*id, shape)))
    }

    pub fn shape_count(&self) -> usize {
        self.z_order.len()
    }

    /// Union box of every shape with a defined box; `None` for an empty
    /// scene or one of only incomplete shapes.
    pub fn scene_bounds(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        for shape in self.shapes.values() {
            if let Some(b) = shape.bounds() {
                bounds = Some(match bounds {
                    Some(acc) => acc.union(b),
                    None => b,
                });
            }
        }
        bounds
    }

    /// Ids whose boxes intersect the scene-space query box.
    pub fn query_area(&self, rect: Rect) -> Vec<ShapeId> {
        self.index.search(rect)
    }

    // --- view transform stack ---

    /// The canvas-to-centered, y-flipped base transform. This is the sole
    /// place the y-flip lives; the rendering pass and every coordinate
    /// conversion compose it in front of the view transform.
    fn base_transform(&self) -> Transform {
        Transform::new(
            1.0,
            0.0,
            0.0,
            -1.0,
            self.screen_size.width / 2.0,
            self.screen_size.height / 2.0,
        )
    }

    pub fn view_transform(&self) -> Transform {
        self.transform
    }

    /// Base and view transforms composed: the full screen-from-scene map.
    pub fn full_transform(&self) -> Transform {
        self.base_transform().concat(&self.transform)
    }

    /// Map a screen coordinate to the scene point under it.
    pub fn screen_to_scene(&self, point: Point) -> Result<Point, GeometryError> {
        self.full_transform().revert(point)
    }

    /// Pan by a screen-space delta.
    ///
    /// The delta is converted to scene units by mapping both it and the
    /// origin through the inverse view transform, so pan speed does not
    /// depend on the current zoom.
    pub fn translate(&mut self, dx: f64, dy: f64) -> Result<(), GeometryError> {
        let v1 = self.transform.revert(Point::new(dx, dy))?;
        let v2 = self.transform.revert(Point::new(0.0, 0.0))?;
        self.transform = self
            .transform
            .concat(&Transform::translate(v1.x - v2.x, v1.y - v2.y));
        Ok(())
    }

    /// Scale about an anchor fixed in scene space.
    ///
    /// Implemented as translate-to-anchor, scale, translate-back in screen
    /// space, composed in front of the current transform; the anchor's
    /// scene coordinate is invariant across the zoom.
    pub fn scale(&mut self, sx: f64, sy: f64, anchor: Point) {
        let xy = self.transform.apply(anchor);
        let scale_at = Transform::translate(xy.x, xy.y)
            .concat(&Transform::scale(sx, sy).concat(&Transform::translate(-xy.x, -xy.y)));
        self.transform = scale_at.concat(&self.transform);
    }

    pub fn scale_up(&mut self, anchor: Point) {
        self.scale(ZOOM_STEP, ZOOM_STEP, anchor);
    }

    pub fn scale_down(&mut self, anchor: Point) {
        self.scale(1.0 / ZOOM_STEP, 1.0 / ZOOM_STEP, anchor);
    }

    /// Rotate the view clockwise by `degrees` about the scene origin,
    /// relative to the current orientation.
    pub fn rotate_clockwise(&mut self, degrees: f64) {
        self.transform = self
            .transform
            .concat(&Transform::rotate_clockwise_degrees(degrees));
    }

    /// Back to the identity view.
    pub fn reset(&mut self) {
        self.transform = Transform::IDENTITY;
    }

    /// Fit the whole scene into the viewport, with a margin. Shapes with
    /// undefined boxes are skipped; an empty scene leaves the view alone.
    pub fn fit_screen(&mut self) {
        let Some(bounds) = self.scene_bounds() else {
            return;
        };
        let bounds = bounds.inflate(FIT_MARGIN, FIT_MARGIN);
        let half_w = self.screen_size.width / 2.0;
        let half_h = self.screen_size.height / 2.0;
        let screen = Rect::new(-half_w, -half_h, half_w, half_h);
        self.transform = Transform::fit_box(bounds, screen);
    }

    pub fn resize(&mut self, size: Size) {
        self.screen_size = size;
    }

    pub fn screen_size(&self) -> Size {
        self.screen_size
    }

    // --- frame playback ---

    /// Attach a frame source and load the first frame. The initial view
    /// fits the advertised scene bounds, or stays at identity without them.
    pub async fn init(&mut self, info: &SceneInfo, source: Box<dyn FrameSource>) -> FrameResult<()> {
        self.current_frame = 0;
        self.total_frames = info.nframes;
        self.transform = match info.bounds() {
            Some(bounds) => {
                let half_w = self.screen_size.width / 2.0;
                let half_h = self.screen_size.height / 2.0;
                Transform::fit_box(bounds, Rect::new(-half_w, -half_h, half_w, half_h))
            }
            None => Transform::IDENTITY,
        };
        self.source = Some(source);
        self.set_frame(0).await
    }

    /// Jump to frame `n`.
    ///
    /// Requests at or beyond the frame count are silently ignored (no
    /// wraparound). The previous frame stays visible until the load
    /// resolves, then the document and index are replaced wholesale; a load
    /// failure propagates and leaves the previous scene and cursor intact.
    /// Taking `&mut self` across the await serializes frame transitions, so
    /// overlapping loads cannot race.
    pub async fn set_frame(&mut self, n: usize) -> FrameResult<()> {
        if self.total_frames == 0 || n >= self.total_frames {
            return Ok(());
        }
        let Some(source) = self.source.as_mut() else {
            return Ok(());
        };
        let shapes = source.load(n).await?;
        log::debug!("frame {n}: {} shapes", shapes.len());
        self.current_frame = n;
        self.clear();
        for shape in shapes {
            self.add_shape(shape);
        }
        Ok(())
    }

    pub fn play(&mut self) {
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn toggle(&mut self) {
        self.paused = !self.paused;
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    // --- selection ---

    /// Update the selection to the shapes intersecting the screen-space
    /// rectangle spanned by two corners.
    pub fn update_selection(&mut self, p0: Point, p1: Point) -> Result<(), GeometryError> {
        let t = self.full_transform();
        let a = t.revert(p0)?;
        let b = t.revert(p1)?;
        self.selection.start = Some(p0);
        self.selection.end = Some(p1);
        self.selection.hits = self.index.search(Rect::from_points(a, b));
        Ok(())
    }

    /// Re-run the selection query with the stored rectangle, after a
    /// transform or document change.
    pub fn refresh_selection(&mut self) -> Result<(), GeometryError> {
        if let (Some(p0), Some(p1)) = (self.selection.start, self.selection.end) {
            self.update_selection(p0, p1)?;
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::default();
    }

    /// Delete every selected shape from the document and index.
    pub fn remove_selected(&mut self) {
        let hits = std::mem::take(&mut self.selection.hits);
        for id in hits {
            self.remove_shape(id);
        }
        self.selection = Selection::default();
    }

    pub fn selected(&self) -> &[ShapeId] {
        &self.selection.hits
    }
}
