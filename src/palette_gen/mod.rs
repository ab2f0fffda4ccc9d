//! Palette generation from emoji images.
//!
//! Each glyph's representative color is the mean RGB of its rendered image,
//! fetched from the Noto Emoji repository (or a mirror, or a local copy).
//! The result is written as a JSON palette that [`crate::mosaic::Palette`]
//! loads directly.

mod builder;
mod client;
mod glyphs;

pub use builder::{
    average_color, build_palette, write_palette_json, write_report, GeneratedEntry, PaletteBuild,
    SkippedGlyph,
};
pub use client::{EmojiImageClient, ImageStore, NOTO_EMOJI_BASE_URL};
pub use glyphs::{emoji_filename, split_glyphs};

/// Errors that can occur during palette generation.
#[derive(Debug, thiserror::Error)]
pub enum PaletteGenError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize palette: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("No glyphs found in input")]
    NoGlyphs,

    #[error("No glyph could be processed; refusing to write an empty palette")]
    NoEntries,
}
