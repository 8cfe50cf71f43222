use image::{imageops::FilterType, DynamicImage, RgbaImage};

use crate::error::{PixdiffError, Result};

/// A decoded RGBA bitmap, 8 bits per channel. Immutable after construction.
///
/// A `RasterImage` may be *tainted*: its dimensions are known but its pixel
/// data may not be read. This models sources the host was not allowed to
/// sample (the browser equivalent is a canvas tainted by a cross-origin
/// image). Every pixel read on a tainted image fails with
/// [`PixdiffError::PixelAccess`].
#[derive(Clone, Debug)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Option<RgbaImage>,
}

impl RasterImage {
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            data: Some(rgba),
        }
    }

    /// Build from a raw RGBA buffer (row-major, 4 bytes per pixel).
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(PixdiffError::InvalidArgument(format!(
                "RGBA buffer length {} does not match {}x{} ({} bytes)",
                bytes.len(),
                width,
                height,
                expected
            )));
        }
        let data = RgbaImage::from_raw(width, height, bytes)
            .ok_or_else(|| PixdiffError::InvalidArgument("invalid RGBA buffer".into()))?;
        Ok(Self {
            width,
            height,
            data: Some(data),
        })
    }

    /// A handle with known dimensions but unreadable pixels.
    pub fn tainted(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_tainted(&self) -> bool {
        self.data.is_none()
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> Result<&[u8]> {
        self.data
            .as_ref()
            .map(|img| img.as_raw().as_slice())
            .ok_or(PixdiffError::PixelAccess)
    }

    /// RGBA at pixel coordinates (origin top-left).
    pub fn pixel_at(&self, x: u32, y: u32) -> Result<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return Err(PixdiffError::InvalidArgument(format!(
                "pixel ({x}, {y}) outside {}x{} image",
                self.width, self.height
            )));
        }
        let img = self.data.as_ref().ok_or(PixdiffError::PixelAccess)?;
        Ok(img.get_pixel(x, y).0)
    }

    /// Stretch to exactly `width` x `height` with bilinear filtering.
    ///
    /// Aspect ratio is deliberately not preserved: mismatched inputs are
    /// stretched onto the common canvas, not letterboxed.
    pub fn resample_to(&self, width: u32, height: u32) -> Result<RasterImage> {
        let img = self.data.as_ref().ok_or(PixdiffError::PixelAccess)?;
        if self.width == width && self.height == height {
            return Ok(self.clone());
        }
        let resized = image::imageops::resize(img, width, height, FilterType::Triangle);
        Ok(Self {
            width,
            height,
            data: Some(resized),
        })
    }

    /// Consume into the backing `RgbaImage` for encoding.
    pub fn into_rgba(self) -> Result<RgbaImage> {
        self.data.ok_or(PixdiffError::PixelAccess)
    }
}
