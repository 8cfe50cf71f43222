pub mod freehand;
pub mod model;
pub mod path;

use tracing::debug;

use crate::consts::{ANNOTATION_COLORS, DEFAULT_BRUSH_SIZE, DEFAULT_FONT_SIZE};
use crate::error::{PixdiffError, Result};

pub use freehand::{get_stroke, StrokeOptions};
pub use model::{AnnotationSet, ImageSlot, PerSlot, Stroke, StrokePoint, TextAnnotation, ToolKind};

/// Handle to a placed-but-unconfirmed text annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextHandle(u64);

/// One renderable stroke outline: an SVG path plus its fill color.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokePath {
    pub path: String,
    pub color: String,
}

#[derive(Clone, Debug)]
struct PendingText {
    handle: TextHandle,
    x: f32,
    y: f32,
}

/// Stateful annotation session for one open comparison.
///
/// All coordinates accepted here are image-space (origin at the image
/// center) and already divided by the base fit scale; the caller performs
/// the screen→image inverse transform, typically via
/// [`crate::view::ViewTransform::to_image_base`]. Brush and font sizes are
/// divided by the current base scale here, at commit time, so stored
/// annotations are zoom- and resize-independent.
#[derive(Clone, Debug)]
pub struct AnnotationStore {
    set: AnnotationSet,
    active_image: ImageSlot,
    tool: ToolKind,
    color_index: usize,
    brush_size: f32,
    font_size: f32,
    base_scale: f32,
    current_points: Vec<StrokePoint>,
    drawing: bool,
    pending_text: Option<PendingText>,
    next_handle: u64,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self {
            set: AnnotationSet::default(),
            active_image: ImageSlot::A,
            tool: ToolKind::Draw,
            color_index: 0,
            brush_size: DEFAULT_BRUSH_SIZE,
            font_size: DEFAULT_FONT_SIZE,
            base_scale: 1.0,
            current_points: Vec::new(),
            drawing: false,
            pending_text: None,
            next_handle: 0,
        }
    }

    // ------------------------------------------------------------------
    // Tool state
    // ------------------------------------------------------------------

    pub fn active_image(&self) -> ImageSlot {
        self.active_image
    }

    pub fn set_active_image(&mut self, slot: ImageSlot) {
        self.active_image = slot;
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn color(&self) -> &'static str {
        ANNOTATION_COLORS[self.color_index]
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn set_color_index(&mut self, index: usize) -> Result<()> {
        if index >= ANNOTATION_COLORS.len() {
            return Err(PixdiffError::InvalidArgument(format!(
                "color index {index} out of range (palette has {})",
                ANNOTATION_COLORS.len()
            )));
        }
        self.color_index = index;
        Ok(())
    }

    pub fn cycle_color(&mut self) {
        self.color_index = (self.color_index + 1) % ANNOTATION_COLORS.len();
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    pub fn set_brush_size(&mut self, size: f32) -> Result<()> {
        if !size.is_finite() || size <= 0.0 {
            return Err(PixdiffError::InvalidArgument(format!(
                "brush size must be positive, got {size}"
            )));
        }
        self.brush_size = size;
        Ok(())
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: f32) -> Result<()> {
        if !size.is_finite() || size <= 0.0 {
            return Err(PixdiffError::InvalidArgument(format!(
                "font size must be positive, got {size}"
            )));
        }
        self.font_size = size;
        Ok(())
    }

    /// Update the current base (container-fit) scale, called by the host on
    /// container resize. Only affects sizes committed from now on; stored
    /// annotations are already scale-independent.
    pub fn set_base_scale(&mut self, scale: f32) -> Result<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PixdiffError::InvalidArgument(format!(
                "base scale must be positive, got {scale}"
            )));
        }
        self.base_scale = scale;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Draw tool
    // ------------------------------------------------------------------

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn begin_stroke(&mut self, point: StrokePoint) {
        self.drawing = true;
        self.current_points.clear();
        self.current_points.push(point);
    }

    /// Extend the in-progress stroke. Ignored when no stroke is active.
    pub fn extend_stroke(&mut self, point: StrokePoint) {
        if self.drawing {
            self.current_points.push(point);
        }
    }

    /// Commit the in-progress stroke to the active image. A stroke with no
    /// points is discarded rather than committed.
    pub fn end_stroke(&mut self) {
        self.drawing = false;
        if self.current_points.is_empty() {
            return;
        }
        let stroke = Stroke {
            points: std::mem::take(&mut self.current_points),
            color: self.color().to_string(),
            size: self.brush_size / self.base_scale,
        };
        debug!(
            image = %self.active_image,
            points = stroke.points.len(),
            "stroke committed"
        );
        self.set.strokes.get_mut(self.active_image).push(stroke);
    }

    // ------------------------------------------------------------------
    // Text tool
    // ------------------------------------------------------------------

    /// Place a pending text annotation at an image-space point. Any previous
    /// pending placement is discarded.
    pub fn place_text(&mut self, x: f32, y: f32) -> TextHandle {
        self.next_handle += 1;
        let handle = TextHandle(self.next_handle);
        self.pending_text = Some(PendingText { handle, x, y });
        handle
    }

    /// Commit a pending text placement. Empty or whitespace-only text
    /// silently discards the placement instead of committing.
    pub fn confirm_text(&mut self, handle: TextHandle, text: &str) -> Result<()> {
        let pending = self.take_pending(handle)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let annotation = TextAnnotation {
            x: pending.x,
            y: pending.y,
            text: trimmed.to_string(),
            color: self.color().to_string(),
            font_size: self.font_size / self.base_scale,
        };
        self.set.texts.get_mut(self.active_image).push(annotation);
        Ok(())
    }

    /// Discard a pending text placement.
    pub fn cancel_text(&mut self, handle: TextHandle) -> Result<()> {
        self.take_pending(handle)?;
        Ok(())
    }

    fn take_pending(&mut self, handle: TextHandle) -> Result<PendingText> {
        match self.pending_text.take() {
            Some(pending) if pending.handle == handle => Ok(pending),
            other => {
                self.pending_text = other;
                Err(PixdiffError::InvalidArgument(
                    "text handle does not match the pending placement".into(),
                ))
            }
        }
    }

    // ------------------------------------------------------------------
    // Undo / clear
    // ------------------------------------------------------------------

    /// Remove the most recently added annotation for the active image and
    /// the active tool type only. Annotations on the other image, and on the
    /// other tool's list, are untouched. There is deliberately no unified
    /// chronological stack across tools.
    pub fn undo(&mut self) {
        match self.tool {
            ToolKind::Draw => {
                self.set.strokes.get_mut(self.active_image).pop();
            }
            ToolKind::Text => {
                self.set.texts.get_mut(self.active_image).pop();
            }
        }
    }

    /// Remove all annotations for the active image.
    pub fn clear(&mut self) {
        self.set.strokes.get_mut(self.active_image).clear();
        self.set.texts.get_mut(self.active_image).clear();
        self.current_points.clear();
        self.drawing = false;
    }

    /// Remove all annotations for both images.
    pub fn clear_all(&mut self) {
        for slot in ImageSlot::ALL {
            self.set.strokes.get_mut(slot).clear();
            self.set.texts.get_mut(slot).clear();
        }
        self.current_points.clear();
        self.drawing = false;
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    pub fn serialize(&self) -> AnnotationSet {
        self.set.clone()
    }

    /// Replace the session's annotations. Accepts sets produced by
    /// [`serialize`](Self::serialize) as well as the legacy wire shape (a
    /// bare stroke array deserializes into `strokes.A`).
    pub fn deserialize(&mut self, set: AnnotationSet) {
        self.set = set;
        self.current_points.clear();
        self.drawing = false;
        self.pending_text = None;
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    pub fn strokes(&self, slot: ImageSlot) -> &[Stroke] {
        self.set.strokes.get(slot)
    }

    pub fn texts(&self, slot: ImageSlot) -> &[TextAnnotation] {
        self.set.texts.get(slot)
    }

    /// Outline paths for every committed stroke on `slot`, in creation
    /// z-order.
    pub fn render_paths(&self, slot: ImageSlot) -> Vec<StrokePath> {
        self.set
            .strokes
            .get(slot)
            .iter()
            .map(|stroke| StrokePath {
                path: path::outline_to_svg_path(&freehand::get_stroke(
                    &stroke.points,
                    &StrokeOptions {
                        size: stroke.size,
                        ..StrokeOptions::default()
                    },
                )),
                color: stroke.color.clone(),
            })
            .collect()
    }

    /// Outline path for the stroke currently being drawn, if any.
    pub fn current_path(&self) -> Option<StrokePath> {
        if self.current_points.is_empty() {
            return None;
        }
        Some(StrokePath {
            path: path::outline_to_svg_path(&freehand::get_stroke(
                &self.current_points,
                &StrokeOptions {
                    size: self.brush_size / self.base_scale,
                    ..StrokeOptions::default()
                },
            )),
            color: self.color().to_string(),
        })
    }
}
