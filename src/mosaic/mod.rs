//! Emoji mosaic renderer: converts images to grids of emoji glyphs.
//!
//! The pipeline has three steps:
//!
//! 1. **Validation** - the target resolution is checked before any decoding
//! 2. **Resampling** - the decoded image is scaled to one pixel per glyph
//! 3. **Matching** - each pixel becomes the palette glyph of nearest RGB color
//!
//! The [`Palette`] is immutable once loaded and can be shared across threads;
//! [`Reducer`] carries only settings.

mod color;
mod dimensions;
mod error;
mod palette;
mod reducer;
mod resample;

pub use color::Color;
pub use dimensions::{fit_dimensions, DEFAULT_GLYPH_ASPECT_RATIO, DEFAULT_GRID_WIDTH};
pub use error::{
    EmptyPaletteError, ImageDecodeError, InvalidResolutionError, PaletteLoadError, ReduceError,
};
pub use palette::{Palette, PaletteEntry, PaletteSource};
pub use reducer::{
    reduce, EncodedImage, ImageFile, ImageSource, OutputGrid, Reducer, Resolution,
    MAX_GRID_CELLS,
};
pub use resample::{resample, PixelGrid, ResampleFilter};
