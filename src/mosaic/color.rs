//! RGB color value used by palettes and pixel grids.

use image::Rgb;

/// An opaque RGB color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// Ordering by this value is the same as ordering by [`Color::distance`],
    /// and it stays in exact integer arithmetic so equal distances compare equal.
    #[inline]
    pub fn distance_squared(&self, other: &Color) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Euclidean distance in RGB space.
    pub fn distance(&self, other: &Color) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb<u8>> for Color {
    fn from(px: Rgb<u8>) -> Self {
        Self::from(px.0)
    }
}

impl From<&Rgb<u8>> for Color {
    fn from(px: &Rgb<u8>) -> Self {
        Self::from(px.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let c = Color::new(12, 200, 99);
        assert_eq!(c.distance_squared(&c), 0);
    }

    #[test]
    fn test_distance_black_to_white() {
        let black = Color::new(0, 0, 0);
        let white = Color::new(255, 255, 255);
        // 3 * 255^2
        assert_eq!(black.distance_squared(&white), 195_075);
        assert!((black.distance(&white) - 441.672_955_930_063_7).abs() < 1e-9);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Color::new(10, 20, 30);
        let b = Color::new(200, 5, 90);
        assert_eq!(a.distance_squared(&b), b.distance_squared(&a));
    }

    #[test]
    fn test_from_rgb_pixel() {
        let c: Color = Rgb([1, 2, 3]).into();
        assert_eq!(c, Color::new(1, 2, 3));
        assert_eq!(c.to_array(), [1, 2, 3]);
    }
}
