//! Palette construction from emoji images.

use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};

use super::client::ImageStore;
use super::glyphs::emoji_filename;
use super::PaletteGenError;
use crate::mosaic::{Color, Palette, PaletteEntry, PaletteLoadError};

/// A glyph whose representative color was computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedEntry {
    pub glyph: String,
    /// Image file name the color was computed from
    pub filename: String,
    pub color: Color,
}

/// A glyph that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedGlyph {
    pub glyph: String,
    pub filename: String,
    pub reason: String,
}

/// Result of a palette build, in input order.
#[derive(Debug, Clone, Default)]
pub struct PaletteBuild {
    pub entries: Vec<GeneratedEntry>,
    pub skipped: Vec<SkippedGlyph>,
}

impl PaletteBuild {
    /// Convert the generated entries into a palette.
    pub fn to_palette(&self) -> Result<Palette, PaletteLoadError> {
        Palette::from_entries(
            self.entries
                .iter()
                .map(|e| PaletteEntry::new(e.glyph.clone(), e.color))
                .collect(),
        )
    }
}

/// Generator output record for one glyph.
#[derive(Serialize)]
struct ColorRecord<'a> {
    unicode: &'a str,
    color: [u8; 3],
}

/// Mean color of an encoded image, alpha ignored, each channel truncated.
///
/// Returns `None` if the bytes cannot be decoded or the image is empty.
pub fn average_color(image_bytes: &[u8]) -> Option<Color> {
    let rgb = image::load_from_memory(image_bytes).ok()?.to_rgb8();
    let count = rgb.width() as u64 * rgb.height() as u64;
    if count == 0 {
        return None;
    }

    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for px in rgb.pixels() {
        r += px.0[0] as u64;
        g += px.0[1] as u64;
        b += px.0[2] as u64;
    }

    Some(Color::new(
        (r / count) as u8,
        (g / count) as u8,
        (b / count) as u8,
    ))
}

/// Compute the representative color of every glyph from `store`.
///
/// Glyphs are processed one at a time in order. A glyph whose image is
/// missing, unreachable, or undecodable is recorded as skipped rather than
/// failing the whole build.
pub async fn build_palette(glyphs: &[String], store: &ImageStore) -> PaletteBuild {
    log::info!(
        "Building palette for {} glyphs from {}",
        glyphs.len(),
        store.describe()
    );

    let mut build = PaletteBuild::default();

    for glyph in glyphs {
        let filename = emoji_filename(glyph);
        let skip = |reason: String| SkippedGlyph {
            glyph: glyph.clone(),
            filename: filename.clone(),
            reason,
        };

        match store.fetch(glyph).await {
            Ok(Some(bytes)) => match average_color(&bytes) {
                Some(color) => {
                    log::debug!("Processed {} ({}): {:?}", glyph, filename, color.to_array());
                    build.entries.push(GeneratedEntry {
                        glyph: glyph.clone(),
                        filename: filename.clone(),
                        color,
                    });
                }
                None => {
                    log::debug!("Skipped {} ({}): image processing failed", glyph, filename);
                    build.skipped.push(skip("image processing failed".to_string()));
                }
            },
            Ok(None) => {
                log::debug!("Skipped {} ({}): image not found", glyph, filename);
                build.skipped.push(skip("image not found".to_string()));
            }
            Err(e) => {
                log::debug!("Error processing {} ({}): {}", glyph, filename, e);
                build.skipped.push(skip(e.to_string()));
            }
        }
    }

    log::info!(
        "Palette build finished: {} processed, {} skipped",
        build.entries.len(),
        build.skipped.len()
    );

    build
}

/// Write the build as a pretty-printed JSON palette.
///
/// The output maps each glyph to `{"unicode": <file name>, "color": [r, g, b]}`
/// and loads with [`Palette::load`].
pub fn write_palette_json<W: Write>(build: &PaletteBuild, writer: W) -> Result<(), PaletteGenError> {
    if build.entries.is_empty() {
        return Err(PaletteGenError::NoEntries);
    }

    let mut map = Map::with_capacity(build.entries.len());
    for entry in &build.entries {
        let record = ColorRecord {
            unicode: &entry.filename,
            color: entry.color.to_array(),
        };
        map.insert(entry.glyph.clone(), serde_json::to_value(record)?);
    }

    serde_json::to_writer_pretty(writer, &Value::Object(map))?;
    Ok(())
}

/// Write one line per processed glyph, then one per skipped glyph, each in
/// input order.
pub fn write_report<W: Write>(build: &PaletteBuild, mut writer: W) -> std::io::Result<()> {
    for entry in &build.entries {
        writeln!(
            writer,
            "Processed {} ({}): {:?}",
            entry.glyph,
            entry.filename,
            entry.color.to_array()
        )?;
    }
    for skipped in &build.skipped {
        writeln!(
            writer,
            "Skipped {} ({}): {}",
            skipped.glyph, skipped.filename, skipped.reason
        )?;
    }
    Ok(())
}
