use image::{Rgba, RgbaImage};
use pixdiff_core::diff::{compute_diff, DiffMode};
use pixdiff_core::error::PixdiffError;
use pixdiff_core::io::image_io::{load_raster, save_heat_map};
use pixdiff_core::raster::RasterImage;

#[test]
fn load_raster_round_trips_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solid.png");

    let mut img = RgbaImage::new(3, 2);
    for p in img.pixels_mut() {
        *p = Rgba([12, 34, 56, 255]);
    }
    img.save(&path).unwrap();

    let raster = load_raster(&path).unwrap();
    assert_eq!((raster.width(), raster.height()), (3, 2));
    assert_eq!(raster.pixel_at(2, 1).unwrap(), [12, 34, 56, 255]);
}

#[test]
fn loaded_raster_yields_its_backing_buffer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.png");

    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(1, 0, Rgba([200, 100, 50, 255]));
    img.save(&path).unwrap();

    let raster = load_raster(&path).unwrap();
    assert!(!raster.is_tainted());
    let rgba = raster.into_rgba().unwrap();
    assert_eq!(rgba.dimensions(), (2, 2));
    assert_eq!(rgba.get_pixel(1, 0).0, [200, 100, 50, 255]);
}

#[test]
fn tainted_raster_has_no_buffer_to_yield() {
    let raster = RasterImage::tainted(4, 4);
    assert!(raster.is_tainted());
    let err = raster.into_rgba().unwrap_err();
    assert!(matches!(err, PixdiffError::PixelAccess));
}

#[test]
fn load_raster_missing_file_is_an_image_load_error() {
    let err = load_raster(std::path::Path::new("/nonexistent/nope.png")).unwrap_err();
    assert!(matches!(err, PixdiffError::ImageLoad(_)));
}

#[test]
fn saved_heat_map_reloads_with_the_same_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heatmap.png");

    let img = RasterImage::from_rgba_bytes(2, 2, vec![0; 16]).unwrap();
    let result = compute_diff(&img, &img, 128, DiffMode::Rgb).unwrap();
    save_heat_map(&result, &path).unwrap();

    let reloaded = load_raster(&path).unwrap();
    assert_eq!((reloaded.width(), reloaded.height()), (2, 2));
    // Identity diff renders pure blue.
    assert_eq!(reloaded.pixel_at(0, 0).unwrap(), [0, 0, 255, 255]);
}
