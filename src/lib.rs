//! emoji-mosaic library crate.
//!
//! Converts raster images into text grids of emoji whose colors best match
//! the image, one glyph per resampled pixel.

pub mod cli;
pub mod config;
pub mod mosaic;
pub mod palette_gen;
