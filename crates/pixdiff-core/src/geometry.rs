use std::ops::{Add, Mul, Sub};

/// 2D vector / point in screen or image space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Width/height pair in display units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Display size of `image` fitted inside `container` under object-contain
/// semantics: scaled to the largest size that fits entirely, preserving
/// aspect ratio.
pub fn contained_size(image: Size, container: Size) -> Size {
    if image.is_empty() || container.is_empty() {
        return Size::default();
    }
    let container_aspect = container.width / container.height;
    let image_aspect = image.width / image.height;
    if image_aspect > container_aspect {
        // Wider than the container: fits to width.
        Size::new(container.width, container.width / image_aspect)
    } else {
        // Taller: fits to height.
        Size::new(container.height * image_aspect, container.height)
    }
}

/// Base/fit scale: displayed width over natural width under object-contain.
pub fn fit_scale(image: Size, container: Size) -> f64 {
    if image.is_empty() || container.is_empty() {
        return 1.0;
    }
    contained_size(image, container).width / image.width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contained_size_wide_image_fits_to_width() {
        let s = contained_size(Size::new(2000.0, 500.0), Size::new(800.0, 600.0));
        assert_eq!(s, Size::new(800.0, 200.0));
    }

    #[test]
    fn contained_size_tall_image_fits_to_height() {
        let s = contained_size(Size::new(500.0, 2000.0), Size::new(800.0, 600.0));
        assert_eq!(s, Size::new(150.0, 600.0));
    }

    #[test]
    fn fit_scale_matches_contained_width() {
        let scale = fit_scale(Size::new(1600.0, 1200.0), Size::new(800.0, 600.0));
        assert!((scale - 0.5).abs() < 1e-12);
    }
}
