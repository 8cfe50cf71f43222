/// Minimum pixel count (w*h) to use row-level Rayon parallelism in the diff scan.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f64 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f64 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f64 = 0.114;

/// Default diff sensitivity (the difference value that saturates the ramp).
pub const DEFAULT_SENSITIVITY: u8 = 128;

/// Heat map ramp stop between the blue→green and green→yellow segments.
pub const RAMP_LOW_STOP: f64 = 0.33;

/// Heat map ramp stop between the green→yellow and yellow→red segments.
pub const RAMP_HIGH_STOP: f64 = 0.67;

/// Minimum zoom factor (relative to the fitted display size).
pub const ZOOM_MIN: f64 = 0.1;

/// Maximum zoom factor.
pub const ZOOM_MAX: f64 = 20.0;

/// Multiplicative zoom step per wheel notch toward the viewer.
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Multiplicative zoom step per wheel notch away from the viewer.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Multiplicative zoom step for the zoom-in button.
pub const BUTTON_ZOOM_IN: f64 = 1.25;

/// Multiplicative zoom step for the zoom-out button.
pub const BUTTON_ZOOM_OUT: f64 = 0.8;

/// Annotation color palette, cycled by the color control.
pub const ANNOTATION_COLORS: [&str; 7] = [
    "#ff0000", "#00ff00", "#0088ff", "#ffff00", "#ff00ff", "#ffffff", "#000000",
];

/// Default brush size in fit-scale pixels.
pub const DEFAULT_BRUSH_SIZE: f32 = 10.0;

/// Default text annotation font size in fit-scale pixels.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Default pressure assigned to samples that carry none.
pub const DEFAULT_PRESSURE: f32 = 0.5;

/// Freehand outline thinning factor (pressure-to-radius response).
pub const STROKE_THINNING: f32 = 0.5;

/// Freehand outline smoothing factor (outline point culling distance).
pub const STROKE_SMOOTHING: f32 = 0.5;

/// Freehand input streamlining factor (input low-pass strength).
pub const STROKE_STREAMLINE: f32 = 0.5;
