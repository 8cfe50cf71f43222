use crate::error::{PixdiffError, Result};
use crate::geometry::Vec2;
use crate::raster::RasterImage;

/// A sampled pixel color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampledColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SampledColor {
    /// `#rrggbb` hex representation (alpha dropped).
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for SampledColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Sample the color under an image-space point (origin at the image center).
///
/// Fails with `InvalidArgument` outside the image bounds and with
/// `PixelAccess` on a tainted image. Reads only; safe to use concurrently
/// with a diff over the same image.
pub fn sample_color(img: &RasterImage, image_point: Vec2) -> Result<SampledColor> {
    let x = image_point.x + img.width() as f64 / 2.0;
    let y = image_point.y + img.height() as f64 / 2.0;
    if x < 0.0 || y < 0.0 || x >= img.width() as f64 || y >= img.height() as f64 {
        return Err(PixdiffError::InvalidArgument(format!(
            "sample point ({:.1}, {:.1}) outside {}x{} image",
            image_point.x,
            image_point.y,
            img.width(),
            img.height()
        )));
    }
    sample_at_pixel(img, x as u32, y as u32)
}

/// Sample at explicit pixel coordinates (origin top-left).
pub fn sample_at_pixel(img: &RasterImage, x: u32, y: u32) -> Result<SampledColor> {
    let [r, g, b, a] = img.pixel_at(x, y)?;
    Ok(SampledColor { r, g, b, a })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> RasterImage {
        // 2x2: red, green / blue, white.
        let bytes = vec![
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 255, 255, 255, 255,
        ];
        RasterImage::from_rgba_bytes(2, 2, bytes).unwrap()
    }

    #[test]
    fn samples_center_relative_coordinates() {
        let img = checker();
        // (-1, -1) from center lands on the top-left pixel.
        let c = sample_color(&img, Vec2::new(-1.0, -1.0)).unwrap();
        assert_eq!(c.to_hex(), "#ff0000");
        let c = sample_color(&img, Vec2::new(0.5, 0.5)).unwrap();
        assert_eq!(c.to_hex(), "#ffffff");
    }

    #[test]
    fn out_of_bounds_sample_fails() {
        let img = checker();
        assert!(sample_color(&img, Vec2::new(5.0, 0.0)).is_err());
    }

    #[test]
    fn tainted_image_denies_sampling() {
        let img = RasterImage::tainted(2, 2);
        assert!(matches!(
            sample_at_pixel(&img, 0, 0),
            Err(PixdiffError::PixelAccess)
        ));
    }
}
