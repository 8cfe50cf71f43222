use std::path::Path;

use image::ImageFormat;

use crate::diff::DiffResult;
use crate::error::{PixdiffError, Result};
use crate::raster::RasterImage;

/// Decode an image file into a [`RasterImage`].
///
/// Decoding is delegated to the `image` crate; any failure maps to
/// [`PixdiffError::ImageLoad`].
pub fn load_raster(path: &Path) -> Result<RasterImage> {
    let img = image::open(path)
        .map_err(|err| PixdiffError::ImageLoad(format!("{}: {err}", path.display())))?;
    Ok(RasterImage::from_dynamic(img))
}

/// Save a computed heat map as PNG.
pub fn save_heat_map(result: &DiffResult, path: &Path) -> Result<()> {
    let img = result.clone().into_image();
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
