use serde::{Deserialize, Serialize};

use crate::annotate::ImageSlot;
use crate::consts::{
    BUTTON_ZOOM_IN, BUTTON_ZOOM_OUT, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT, ZOOM_MAX, ZOOM_MIN,
};
use crate::error::{PixdiffError, Result};
use crate::geometry::{contained_size, fit_scale, Size, Vec2};

/// A named zoom target. `None` on [`ViewTransform`] means free/manual zoom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomMode {
    /// Fit the image inside the container (zoom 1 relative to fit).
    #[serde(rename = "fit")]
    Fit,
    /// 1:1 native pixels for image A.
    #[serde(rename = "match-A")]
    MatchA,
    /// 1:1 native pixels for image B.
    #[serde(rename = "match-B")]
    MatchB,
}

/// Zoom/pan state for the viewing session, with forward and inverse mapping
/// between screen space and image space.
///
/// Zoom and pan apply around the container center, not its top-left corner.
/// Zoom is relative to the *fitted* display size: zoom 1 shows the image
/// fitted to the container regardless of its native resolution. Any manual
/// zoom or pan drops the named mode back to free.
#[derive(Clone, Debug)]
pub struct ViewTransform {
    zoom: f64,
    pan: Vec2,
    mode: Option<ZoomMode>,
    container: Size,
    image_a: Option<Size>,
    image_b: Option<Size>,
    pan_modifier: bool,
    panning: bool,
}

impl ViewTransform {
    pub fn new(container: Size) -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            mode: Some(ZoomMode::Fit),
            container,
            image_a: None,
            image_b: None,
            pan_modifier: false,
            panning: false,
        }
    }

    // ------------------------------------------------------------------
    // Inputs from the hosting layer
    // ------------------------------------------------------------------

    pub fn set_container(&mut self, container: Size) {
        self.container = container;
    }

    pub fn set_image_a(&mut self, dims: Option<Size>) {
        self.image_a = dims;
    }

    pub fn set_image_b(&mut self, dims: Option<Size>) {
        self.image_b = dims;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn mode(&self) -> Option<ZoomMode> {
        self.mode
    }

    // ------------------------------------------------------------------
    // Zoom
    // ------------------------------------------------------------------

    /// Apply one wheel notch: negative `delta_y` (toward the viewer) zooms
    /// in. Drops any named mode.
    pub fn wheel(&mut self, delta_y: f64) {
        self.mode = None;
        let factor = if delta_y > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
        self.zoom = clamp_zoom(self.zoom * factor);
    }

    pub fn zoom_in(&mut self) {
        self.mode = None;
        self.zoom = clamp_zoom(self.zoom * BUTTON_ZOOM_IN);
    }

    pub fn zoom_out(&mut self) {
        self.mode = None;
        self.zoom = clamp_zoom(self.zoom * BUTTON_ZOOM_OUT);
    }

    /// Back to the fitted view: zoom 1, no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Vec2::ZERO;
        self.mode = Some(ZoomMode::Fit);
    }

    /// Zoom so image A maps 1:1 to native pixels, relative to its fitted
    /// display size in the current container. Resets pan.
    pub fn match_a(&mut self) -> Result<()> {
        let dims = self
            .image_a
            .ok_or_else(|| PixdiffError::TransformPrecondition("image A is not loaded".into()))?;
        self.zoom = clamp_zoom(self.native_zoom(dims)?);
        self.pan = Vec2::ZERO;
        self.mode = Some(ZoomMode::MatchA);
        Ok(())
    }

    /// Zoom so image B maps 1:1 to native pixels, independent of image A.
    pub fn match_b(&mut self) -> Result<()> {
        let dims = self
            .image_b
            .ok_or_else(|| PixdiffError::TransformPrecondition("image B is not loaded".into()))?;
        self.zoom = clamp_zoom(self.native_zoom(dims)?);
        self.pan = Vec2::ZERO;
        self.mode = Some(ZoomMode::MatchB);
        Ok(())
    }

    /// Zoom factor at which `dims` displays at native 1:1 pixels:
    /// the ratio of natural width to fitted display width.
    fn native_zoom(&self, dims: Size) -> Result<f64> {
        if dims.is_empty() {
            return Err(PixdiffError::TransformPrecondition(
                "image dimensions are empty".into(),
            ));
        }
        if self.container.is_empty() {
            return Err(PixdiffError::TransformPrecondition(
                "container size is not known".into(),
            ));
        }
        let displayed = contained_size(dims, self.container);
        Ok(dims.width / displayed.width)
    }

    /// Displayed zoom percentage. In a match mode this is a flat 100% by
    /// definition of 1:1, regardless of the underlying fit-relative zoom.
    pub fn display_percentage(&self) -> u32 {
        match self.mode {
            Some(ZoomMode::MatchA) | Some(ZoomMode::MatchB) => 100,
            _ => (self.zoom * 100.0).round() as u32,
        }
    }

    // ------------------------------------------------------------------
    // Pan
    // ------------------------------------------------------------------

    /// Whether panning is currently possible at all.
    pub fn can_pan(&self) -> bool {
        self.zoom > 1.0
    }

    /// Hold or release the pan modifier (the spacebar equivalent). Panning
    /// is gated behind it so drags during annotation or slider interaction
    /// do not move the view.
    pub fn set_pan_modifier(&mut self, held: bool) {
        self.pan_modifier = held;
        if !held {
            self.panning = false;
        }
    }

    /// Try to start a pan drag. Returns whether the drag was accepted.
    pub fn begin_pan(&mut self) -> bool {
        self.panning = self.pan_modifier && self.can_pan();
        self.panning
    }

    /// Apply a drag delta in screen pixels. Ignored unless a pan drag is
    /// active. Drops any named mode.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if !self.panning {
            return;
        }
        self.mode = None;
        self.pan = self.pan + Vec2::new(dx, dy);
    }

    pub fn end_pan(&mut self) {
        self.panning = false;
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    // ------------------------------------------------------------------
    // Coordinate mapping
    // ------------------------------------------------------------------

    /// Image space (origin at container/image center) to screen space
    /// (origin at the container's top-left).
    pub fn to_screen(&self, image_point: Vec2) -> Vec2 {
        image_point * self.zoom + self.pan + self.container.center()
    }

    /// Screen space to image space; exact inverse of [`to_screen`](Self::to_screen).
    pub fn to_image(&self, screen_point: Vec2) -> Vec2 {
        (screen_point - self.container.center() - self.pan) * (1.0 / self.zoom)
    }

    /// Screen space to annotation storage space: the inverse transform
    /// additionally divided by the slot's base fit scale, so coordinates are
    /// independent of both zoom and container size.
    pub fn to_image_base(&self, screen_point: Vec2, slot: ImageSlot) -> Result<Vec2> {
        let scale = self.base_fit_scale(slot)?;
        Ok(self.to_image(screen_point) * (1.0 / scale))
    }

    /// The base (object-contain fit) scale for the given image slot.
    pub fn base_fit_scale(&self, slot: ImageSlot) -> Result<f64> {
        let dims = match slot {
            ImageSlot::A => self.image_a,
            ImageSlot::B => self.image_b,
        }
        .ok_or_else(|| {
            PixdiffError::TransformPrecondition(format!("image {slot} is not loaded"))
        })?;
        if self.container.is_empty() {
            return Err(PixdiffError::TransformPrecondition(
                "container size is not known".into(),
            ));
        }
        Ok(fit_scale(dims, self.container))
    }

    /// CSS-style transform string for the hosting layer.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.pan.x, self.pan.y, self.zoom
        )
    }
}

fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}
