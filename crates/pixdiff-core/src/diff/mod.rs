pub mod cancel;
pub mod metric;
pub mod ramp;

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::debug;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{PixdiffError, Result};
use crate::raster::RasterImage;

pub use cancel::CancelToken;
pub use metric::DiffMode;
pub use ramp::difference_to_color;

/// Aggregate statistics gathered during a diff scan.
///
/// Percentages and averages are kept numeric; the `*_label` methods produce
/// the fixed-precision strings shown in the viewer's stats readout.
#[derive(Clone, Debug, PartialEq)]
pub struct DiffStats {
    pub total_pixels: usize,
    pub diff_pixel_count: usize,
    pub diff_percentage: f64,
    pub avg_diff: f64,
    pub max_diff: f64,
    pub above_threshold: usize,
    pub above_threshold_percentage: f64,
}

impl DiffStats {
    /// Percentage of pixels with any difference, one decimal.
    pub fn diff_percentage_label(&self) -> String {
        format!("{:.1}", self.diff_percentage)
    }

    /// Mean difference over all pixels, two decimals.
    pub fn avg_diff_label(&self) -> String {
        format!("{:.2}", self.avg_diff)
    }

    /// Maximum per-pixel difference, integer.
    pub fn max_diff_label(&self) -> String {
        format!("{:.0}", self.max_diff)
    }

    /// Percentage of pixels at or above the sensitivity threshold, three decimals.
    pub fn above_threshold_percentage_label(&self) -> String {
        format!("{:.3}", self.above_threshold_percentage)
    }
}

/// A rendered heat map plus its statistics. Recomputed in full whenever any
/// input changes; never updated incrementally.
#[derive(Clone, Debug)]
pub struct DiffResult {
    pub width: u32,
    pub height: u32,
    /// RGBA, row-major, alpha always 255.
    pub pixels: Vec<u8>,
    pub stats: DiffStats,
}

impl DiffResult {
    pub fn into_image(self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels)
            .expect("pixel buffer matches dimensions")
    }
}

/// Per-row partial statistics, folded in row order so parallel and serial
/// scans produce identical results.
#[derive(Clone, Copy, Default)]
struct RowStats {
    sum: f64,
    max: f64,
    diff_count: usize,
    above_count: usize,
}

fn scan_row(row_a: &[u8], row_b: &[u8], out: &mut [u8], sensitivity: f64, mode: DiffMode) -> RowStats {
    let mut stats = RowStats::default();
    for ((pa, pb), po) in row_a.chunks_exact(4).zip(row_b.chunks_exact(4)).zip(out.chunks_exact_mut(4)) {
        let d = metric::pixel_diff(mode, pa, pb);
        let t = (d / sensitivity).clamp(0.0, 1.0);

        stats.sum += d;
        if d > stats.max {
            stats.max = d;
        }
        if d > 0.0 {
            stats.diff_count += 1;
        }
        if d >= sensitivity {
            stats.above_count += 1;
        }

        let [r, g, b] = ramp::difference_to_color(t);
        po[0] = r;
        po[1] = g;
        po[2] = b;
        po[3] = 255;
    }
    stats
}

/// Compute a false-color heat map of the per-pixel difference between two
/// images.
///
/// The output canvas takes the larger of each dimension and both inputs are
/// stretched (not letterboxed) to fill it before comparison. `sensitivity`
/// is the difference value (1-255) at which the ramp saturates to red.
pub fn compute_diff(
    a: &RasterImage,
    b: &RasterImage,
    sensitivity: u8,
    mode: DiffMode,
) -> Result<DiffResult> {
    compute_diff_impl(a, b, sensitivity, mode, None, None)
}

/// [`compute_diff`] with a cooperative cancellation token.
///
/// The token is checked between resampling steps and during the scan; a
/// cancelled computation fails with [`PixdiffError::Cancelled`] and its
/// partial result is never surfaced.
pub fn compute_diff_cancellable(
    a: &RasterImage,
    b: &RasterImage,
    sensitivity: u8,
    mode: DiffMode,
    token: &CancelToken,
) -> Result<DiffResult> {
    compute_diff_impl(a, b, sensitivity, mode, Some(token), None)
}

/// [`compute_diff`] with per-row progress reporting.
///
/// Calls `on_progress(rows_done)` as each output row is scanned.
pub fn compute_diff_with_progress(
    a: &RasterImage,
    b: &RasterImage,
    sensitivity: u8,
    mode: DiffMode,
    on_progress: impl Fn(usize) + Send + Sync,
) -> Result<DiffResult> {
    compute_diff_impl(a, b, sensitivity, mode, None, Some(&on_progress))
}

fn compute_diff_impl(
    a: &RasterImage,
    b: &RasterImage,
    sensitivity: u8,
    mode: DiffMode,
    token: Option<&CancelToken>,
    on_progress: Option<&(dyn Fn(usize) + Send + Sync)>,
) -> Result<DiffResult> {
    if sensitivity == 0 {
        return Err(PixdiffError::InvalidSensitivity(0));
    }

    // Larger of each dimension so no difference is cropped away.
    let width = a.width().max(b.width());
    let height = a.height().max(b.height());
    if width == 0 || height == 0 {
        return Err(PixdiffError::InvalidArgument(
            "cannot diff zero-sized images".into(),
        ));
    }

    let scaled_a = a.resample_to(width, height)?;
    if let Some(token) = token {
        token.check()?;
    }
    let scaled_b = b.resample_to(width, height)?;
    if let Some(token) = token {
        token.check()?;
    }

    let pa = scaled_a.pixels()?;
    let pb = scaled_b.pixels()?;

    let total_pixels = width as usize * height as usize;
    let row_stride = width as usize * 4;
    let sens = sensitivity as f64;
    let mut pixels = vec![0u8; total_pixels * 4];

    debug!(width, height, sensitivity, ?mode, "computing diff heat map");

    let partials: Vec<RowStats> = if total_pixels >= PARALLEL_PIXEL_THRESHOLD {
        let done = AtomicUsize::new(0);
        let partials = pixels
            .par_chunks_exact_mut(row_stride)
            .enumerate()
            .map(|(row, out)| {
                if token.is_some_and(|t| t.is_cancelled()) {
                    return RowStats::default();
                }
                let offset = row * row_stride;
                let stats = scan_row(
                    &pa[offset..offset + row_stride],
                    &pb[offset..offset + row_stride],
                    out,
                    sens,
                    mode,
                );
                if let Some(progress) = on_progress {
                    progress(done.fetch_add(1, Ordering::Relaxed) + 1);
                }
                stats
            })
            .collect();
        if let Some(token) = token {
            token.check()?;
        }
        partials
    } else {
        let mut partials = Vec::with_capacity(height as usize);
        for (row, out) in pixels.chunks_exact_mut(row_stride).enumerate() {
            if let Some(token) = token {
                token.check()?;
            }
            let offset = row * row_stride;
            partials.push(scan_row(
                &pa[offset..offset + row_stride],
                &pb[offset..offset + row_stride],
                out,
                sens,
                mode,
            ));
            if let Some(progress) = on_progress {
                progress(row + 1);
            }
        }
        partials
    };

    // Sequential fold in row order keeps the stats identical to a serial scan.
    let mut sum = 0.0f64;
    let mut max = 0.0f64;
    let mut diff_count = 0usize;
    let mut above_count = 0usize;
    for p in &partials {
        sum += p.sum;
        if p.max > max {
            max = p.max;
        }
        diff_count += p.diff_count;
        above_count += p.above_count;
    }

    let stats = DiffStats {
        total_pixels,
        diff_pixel_count: diff_count,
        diff_percentage: diff_count as f64 / total_pixels as f64 * 100.0,
        avg_diff: sum / total_pixels as f64,
        max_diff: max,
        above_threshold: above_count,
        above_threshold_percentage: above_count as f64 / total_pixels as f64 * 100.0,
    };

    Ok(DiffResult {
        width,
        height,
        pixels,
        stats,
    })
}
