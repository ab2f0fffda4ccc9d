//! Grid size calculation when only one side is requested.

/// Default glyph aspect ratio (height / width).
/// An emoji occupies two terminal columns and one row, which is close to square.
pub const DEFAULT_GLYPH_ASPECT_RATIO: f32 = 1.0;

/// Width used when neither side is requested.
pub const DEFAULT_GRID_WIDTH: u32 = 40;

/// Resolve the output grid size for an image.
///
/// - Both sides given: returned unchanged (validation happens in the reducer).
/// - One side given: the other is derived from the image aspect ratio,
///   corrected for the glyph aspect ratio, and is at least 1.
/// - Neither given: [`DEFAULT_GRID_WIDTH`] wide, height derived.
///
/// # Arguments
/// * `img_width` - Width of the source image in pixels
/// * `img_height` - Height of the source image in pixels
/// * `width` - Requested grid width in glyphs
/// * `height` - Requested grid height in glyphs
/// * `glyph_aspect` - Glyph height / width as rendered
///
/// # Example
/// ```ignore
/// // A 640x480 image at 40 glyphs wide with square glyphs is 30 rows tall
/// assert_eq!(fit_dimensions(640, 480, Some(40), None, 1.0), (40, 30));
/// ```
pub fn fit_dimensions(
    img_width: u32,
    img_height: u32,
    width: Option<i64>,
    height: Option<i64>,
    glyph_aspect: f32,
) -> (i64, i64) {
    if let (Some(w), Some(h)) = (width, height) {
        return (w, h);
    }

    // Degenerate images or aspect ratios: nothing to derive from.
    if img_width == 0 || img_height == 0 || !glyph_aspect.is_finite() || glyph_aspect <= 0.0 {
        return (width.unwrap_or(1), height.unwrap_or(1));
    }

    // Glyphs are glyph_aspect times taller than wide, so an image shown with
    // its own aspect needs glyph_aspect times fewer rows than columns would suggest.
    let target_aspect = img_width as f64 / img_height as f64 * glyph_aspect as f64;

    match (width, height) {
        (Some(w), None) => (w, derive(w, 1.0 / target_aspect)),
        (None, Some(h)) => (derive(h, target_aspect), h),
        _ => {
            let w = DEFAULT_GRID_WIDTH as i64;
            (w, derive(w, 1.0 / target_aspect))
        }
    }
}

/// Scale a requested side; a non-positive request is passed through so the
/// reducer reports it.
fn derive(given: i64, ratio: f64) -> i64 {
    if given <= 0 {
        return given;
    }
    ((given as f64 * ratio).round() as i64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_given_unchanged() {
        assert_eq!(fit_dimensions(640, 480, Some(7), Some(9), 1.0), (7, 9));
        assert_eq!(fit_dimensions(640, 480, Some(0), Some(-1), 1.0), (0, -1));
    }

    #[test]
    fn test_width_only_square_glyphs() {
        assert_eq!(fit_dimensions(640, 480, Some(40), None, 1.0), (40, 30));
    }

    #[test]
    fn test_height_only_square_glyphs() {
        assert_eq!(fit_dimensions(640, 480, None, Some(30), 1.0), (40, 30));
    }

    #[test]
    fn test_tall_glyphs_need_fewer_rows() {
        // 100x100 image, glyphs twice as tall as wide: 40 wide -> 20 rows
        assert_eq!(fit_dimensions(100, 100, Some(40), None, 2.0), (40, 20));
    }

    #[test]
    fn test_neither_given_uses_default_width() {
        let (w, h) = fit_dimensions(200, 100, None, None, DEFAULT_GLYPH_ASPECT_RATIO);
        assert_eq!(w, DEFAULT_GRID_WIDTH as i64);
        assert_eq!(h, 20);
    }

    #[test]
    fn test_derived_side_at_least_one() {
        assert_eq!(fit_dimensions(10_000, 1, Some(5), None, 1.0), (5, 1));
    }

    #[test]
    fn test_invalid_request_passed_through() {
        assert_eq!(fit_dimensions(640, 480, Some(0), None, 1.0), (0, 0));
        assert_eq!(fit_dimensions(640, 480, None, Some(-2), 1.0), (-2, -2));
    }
}
