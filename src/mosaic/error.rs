//! Error types for palette loading and image reduction.
//!
//! Each failure kind is its own type so callers can tell them apart without
//! string matching. [`ReduceError`] unifies the ones `reduce` can return.

use std::path::PathBuf;

/// Errors that can occur while loading a palette.
#[derive(Debug, thiserror::Error)]
pub enum PaletteLoadError {
    #[error("Failed to read palette file '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Palette is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Palette must be a JSON object mapping glyphs to colors")]
    NotAMapping,

    #[error("Palette contains an empty glyph")]
    EmptyGlyph,

    #[error("Palette glyph '{0}' appears more than once")]
    DuplicateGlyph(String),

    #[error("Invalid color for glyph '{glyph}': {reason}")]
    InvalidColor {
        /// Glyph whose color failed to parse
        glyph: String,
        /// What was wrong with it
        reason: String,
    },

    #[error("Palette has no entries")]
    Empty,
}

/// A nearest-color query was made against a palette with no entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot match colors against an empty palette")]
pub struct EmptyPaletteError;

/// Requested grid dimensions are not positive integers, or describe a grid
/// larger than [`MAX_GRID_CELLS`](super::reducer::MAX_GRID_CELLS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error(
    "Invalid resolution {width}x{height}: width and height must be greater than 0 \
     and the grid at most {max} cells",
    max = super::reducer::MAX_GRID_CELLS
)]
pub struct InvalidResolutionError {
    pub width: i64,
    pub height: i64,
}

/// Image bytes could not be decoded.
#[derive(Debug, thiserror::Error)]
#[error("Failed to decode image: {0}")]
pub struct ImageDecodeError(#[from] pub image::ImageError);

/// Errors that can occur while reducing an image to a glyph grid.
#[derive(Debug, thiserror::Error)]
pub enum ReduceError {
    #[error(transparent)]
    InvalidResolution(#[from] InvalidResolutionError),

    #[error(transparent)]
    ImageDecode(#[from] ImageDecodeError),

    #[error(transparent)]
    EmptyPalette(#[from] EmptyPaletteError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_resolution_display() {
        let err = InvalidResolutionError { width: 0, height: 5 };
        let msg = format!("{}", err);
        assert!(msg.contains("0x5"));
        assert!(msg.contains("greater than 0"));
    }

    #[test]
    fn test_invalid_color_names_glyph() {
        let err = PaletteLoadError::InvalidColor {
            glyph: "🟥".to_string(),
            reason: "expected 3 components, got 2".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("🟥"));
        assert!(msg.contains("expected 3 components"));
    }

    #[test]
    fn test_reduce_error_is_transparent() {
        let err: ReduceError = EmptyPaletteError.into();
        assert_eq!(format!("{}", err), format!("{}", EmptyPaletteError));
    }
}
