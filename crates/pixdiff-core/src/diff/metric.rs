use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::error::PixdiffError;

/// Which per-pixel difference metric the heat map uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// Mean of the absolute R, G, B channel deltas.
    #[default]
    Rgb,
    /// Absolute BT.601 luminance delta.
    Luma,
    /// Circular hue distance, rescaled onto the 0-255 range.
    Hue,
}

impl FromStr for DiffMode {
    type Err = PixdiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rgb" => Ok(DiffMode::Rgb),
            "luma" => Ok(DiffMode::Luma),
            "hue" => Ok(DiffMode::Hue),
            other => Err(PixdiffError::InvalidArgument(format!(
                "unknown diff mode {other:?} (expected rgb, luma, or hue)"
            ))),
        }
    }
}

impl std::fmt::Display for DiffMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffMode::Rgb => write!(f, "rgb"),
            DiffMode::Luma => write!(f, "luma"),
            DiffMode::Hue => write!(f, "hue"),
        }
    }
}

/// Scalar difference between two RGBA pixels on a 0-255 scale.
pub fn pixel_diff(mode: DiffMode, a: &[u8], b: &[u8]) -> f64 {
    match mode {
        DiffMode::Rgb => rgb_diff(a, b),
        DiffMode::Luma => luma_diff(a, b),
        DiffMode::Hue => hue_diff(a, b),
    }
}

fn rgb_diff(a: &[u8], b: &[u8]) -> f64 {
    let dr = (a[0] as f64 - b[0] as f64).abs();
    let dg = (a[1] as f64 - b[1] as f64).abs();
    let db = (a[2] as f64 - b[2] as f64).abs();
    (dr + dg + db) / 3.0
}

fn luma_diff(a: &[u8], b: &[u8]) -> f64 {
    let luma_a = LUMINANCE_R * a[0] as f64 + LUMINANCE_G * a[1] as f64 + LUMINANCE_B * a[2] as f64;
    let luma_b = LUMINANCE_R * b[0] as f64 + LUMINANCE_G * b[1] as f64 + LUMINANCE_B * b[2] as f64;
    (luma_a - luma_b).abs()
}

fn hue_diff(a: &[u8], b: &[u8]) -> f64 {
    let hue_a = rgb_to_hue(a[0], a[1], a[2]);
    let hue_b = rgb_to_hue(b[0], b[1], b[2]);
    // Hue wraps at 360, so the distance is at most 180 degrees.
    let diff = (hue_a - hue_b).abs();
    diff.min(360.0 - diff) * (255.0 / 180.0)
}

/// Hue in degrees [0, 360). Achromatic pixels (max == min) map to 0.
pub fn rgb_to_hue(r: u8, g: u8, b: u8) -> f64 {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return 0.0;
    }

    let d = max - min;
    if max == r {
        ((g - b) / d + if g < b { 6.0 } else { 0.0 }) * 60.0
    } else if max == g {
        ((b - r) / d + 2.0) * 60.0
    } else {
        ((r - g) / d + 4.0) * 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_diff_is_channel_mean() {
        let d = rgb_diff(&[0, 0, 0, 255], &[30, 60, 90, 255]);
        assert!((d - 60.0).abs() < 1e-12);
    }

    #[test]
    fn luma_diff_uses_bt601_weights() {
        let d = luma_diff(&[255, 0, 0, 255], &[0, 0, 0, 255]);
        assert!((d - 0.299 * 255.0).abs() < 1e-9);
    }

    #[test]
    fn hue_wraps_around_360() {
        // 350 degrees is roughly (255, 0, 42); 10 degrees roughly (255, 42, 0).
        let hue_a = rgb_to_hue(255, 0, 43);
        let hue_b = rgb_to_hue(255, 43, 0);
        assert!((hue_a - 349.88).abs() < 0.2, "got {hue_a}");
        assert!((hue_b - 10.12).abs() < 0.2, "got {hue_b}");

        let diff = (hue_a - hue_b).abs();
        let circular = diff.min(360.0 - diff);
        // 20 degrees apart across the wrap point, not 340.
        assert!((circular - 20.23).abs() < 0.5, "got {circular}");
    }

    #[test]
    fn achromatic_pixels_have_zero_hue() {
        assert_eq!(rgb_to_hue(0, 0, 0), 0.0);
        assert_eq!(rgb_to_hue(128, 128, 128), 0.0);
        assert_eq!(rgb_to_hue(255, 255, 255), 0.0);
    }
}
