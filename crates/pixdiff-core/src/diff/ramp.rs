use crate::consts::{RAMP_HIGH_STOP, RAMP_LOW_STOP};

/// Map a normalized difference (0-1) onto the blue→green→yellow→red ramp.
///
/// 0 = blue (identical), 0.33 = green, 0.67 = yellow, 1 = red. Returns
/// `[r, g, b]`; the caller supplies the (always opaque) alpha.
pub fn difference_to_color(normalized: f64) -> [u8; 3] {
    let t = normalized.clamp(0.0, 1.0);

    if t < RAMP_LOW_STOP {
        // Blue → green
        let local = t / RAMP_LOW_STOP;
        [0, (local * 255.0).round() as u8, ((1.0 - local) * 255.0).round() as u8]
    } else if t < RAMP_HIGH_STOP {
        // Green → yellow
        let local = (t - RAMP_LOW_STOP) / (RAMP_HIGH_STOP - RAMP_LOW_STOP);
        [(local * 255.0).round() as u8, 255, 0]
    } else {
        // Yellow → red
        let local = (t - RAMP_HIGH_STOP) / (1.0 - RAMP_HIGH_STOP);
        [255, ((1.0 - local) * 255.0).round() as u8, 0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_endpoints() {
        assert_eq!(difference_to_color(0.0), [0, 0, 255]);
        assert_eq!(difference_to_color(1.0), [255, 0, 0]);
    }

    #[test]
    fn ramp_clamps_out_of_range_input() {
        assert_eq!(difference_to_color(-0.5), [0, 0, 255]);
        assert_eq!(difference_to_color(2.0), [255, 0, 0]);
    }

    #[test]
    fn ramp_is_continuous_at_segment_boundaries() {
        // Shared endpoint colors: green at 0.33, yellow at 0.67.
        let below_low = difference_to_color(RAMP_LOW_STOP - 1e-6);
        let above_low = difference_to_color(RAMP_LOW_STOP + 1e-6);
        for (a, b) in below_low.iter().zip(above_low.iter()) {
            assert!((*a as i16 - *b as i16).abs() <= 1, "{below_low:?} vs {above_low:?}");
        }

        let below_high = difference_to_color(RAMP_HIGH_STOP - 1e-6);
        let above_high = difference_to_color(RAMP_HIGH_STOP + 1e-6);
        for (a, b) in below_high.iter().zip(above_high.iter()) {
            assert!((*a as i16 - *b as i16).abs() <= 1, "{below_high:?} vs {above_high:?}");
        }
    }
}
