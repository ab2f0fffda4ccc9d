//! Emoji palette: glyph to representative color mapping and nearest-color lookup.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::color::Color;
use super::error::{EmptyPaletteError, PaletteLoadError};

/// Palette bundled with the crate, used when no palette file is configured.
const BUILTIN_PALETTE_JSON: &str = include_str!("../../assets/emoji_colors.json");

/// One glyph and the color it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub glyph: String,
    pub color: Color,
}

impl PaletteEntry {
    pub fn new(glyph: impl Into<String>, color: Color) -> Self {
        Self {
            glyph: glyph.into(),
            color,
        }
    }
}

/// Where a palette document comes from.
#[derive(Debug, Clone)]
pub enum PaletteSource<'a> {
    /// JSON file on disk
    Path(PathBuf),
    /// JSON document already in memory
    Json(&'a str),
    /// Raw JSON bytes
    Bytes(&'a [u8]),
}

impl<'a> PaletteSource<'a> {
    pub fn path(path: impl AsRef<Path>) -> Self {
        PaletteSource::Path(path.as_ref().to_path_buf())
    }
}

/// Immutable, ordered set of glyphs with representative colors.
///
/// Entry order is fixed at load time (document order for JSON sources) and
/// decides ties in [`Palette::nearest_glyph`]: the earliest entry wins.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Load a palette from the given source.
    ///
    /// The document must be a JSON object whose values are either `[r, g, b]`
    /// or `{"color": [r, g, b], ...}`. Empty palettes are rejected.
    pub fn load(source: PaletteSource<'_>) -> Result<Self, PaletteLoadError> {
        match source {
            PaletteSource::Path(path) => {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| PaletteLoadError::Io {
                        path: path.clone(),
                        source: e,
                    })?;
                let palette = Self::from_json_str(&content)?;
                log::debug!(
                    "Loaded {} palette entries from {}",
                    palette.len(),
                    path.display()
                );
                Ok(palette)
            }
            PaletteSource::Json(text) => Self::from_json_str(text),
            PaletteSource::Bytes(bytes) => {
                let value: Value = serde_json::from_slice(bytes)?;
                Self::from_json_value(value)
            }
        }
    }

    /// Parse a palette from a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, PaletteLoadError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json_value(value)
    }

    fn from_json_value(value: Value) -> Result<Self, PaletteLoadError> {
        let Value::Object(map) = value else {
            return Err(PaletteLoadError::NotAMapping);
        };
        let entries = parse_entries(map)?;
        Self::from_entries(entries)
    }

    /// Build a palette from entries in the given order.
    ///
    /// Fails on an empty list, an empty glyph, or a repeated glyph.
    pub fn from_entries(entries: Vec<PaletteEntry>) -> Result<Self, PaletteLoadError> {
        if entries.is_empty() {
            return Err(PaletteLoadError::Empty);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.glyph.is_empty() {
                return Err(PaletteLoadError::EmptyGlyph);
            }
            if !seen.insert(entry.glyph.as_str()) {
                return Err(PaletteLoadError::DuplicateGlyph(entry.glyph.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// The palette bundled with the crate.
    pub fn builtin() -> Result<Self, PaletteLoadError> {
        Self::from_json_str(BUILTIN_PALETTE_JSON)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in load order.
    pub fn iter(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.iter()
    }

    /// Color for a glyph, if present.
    pub fn get(&self, glyph: &str) -> Option<Color> {
        self.entries
            .iter()
            .find(|e| e.glyph == glyph)
            .map(|e| e.color)
    }

    /// Entry whose color is closest to `color` by Euclidean RGB distance.
    ///
    /// Linear scan with a strict `<` so the first of several equidistant
    /// entries is kept.
    pub fn nearest_entry(&self, color: Color) -> Result<&PaletteEntry, EmptyPaletteError> {
        let mut entries = self.entries.iter();
        let mut best = entries.next().ok_or(EmptyPaletteError)?;
        let mut best_distance = best.color.distance_squared(&color);

        for entry in entries {
            if best_distance == 0 {
                break;
            }
            let distance = entry.color.distance_squared(&color);
            if distance < best_distance {
                best = entry;
                best_distance = distance;
            }
        }

        Ok(best)
    }

    /// Glyph whose color is closest to `color`.
    pub fn nearest_glyph(&self, color: Color) -> Result<&str, EmptyPaletteError> {
        self.nearest_entry(color).map(|e| e.glyph.as_str())
    }
}

fn parse_entries(map: Map<String, Value>) -> Result<Vec<PaletteEntry>, PaletteLoadError> {
    let mut entries = Vec::with_capacity(map.len());
    for (glyph, value) in map {
        if glyph.is_empty() {
            return Err(PaletteLoadError::EmptyGlyph);
        }
        let color = parse_color(&glyph, &value)?;
        entries.push(PaletteEntry { glyph, color });
    }
    Ok(entries)
}

/// Accepts `[r, g, b]` or an object carrying it under `"color"`.
fn parse_color(glyph: &str, value: &Value) -> Result<Color, PaletteLoadError> {
    let invalid = |reason: String| PaletteLoadError::InvalidColor {
        glyph: glyph.to_string(),
        reason,
    };

    let components = match value {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("color") {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(invalid("\"color\" must be an array".to_string())),
            None => return Err(invalid("missing \"color\" field".to_string())),
        },
        _ => return Err(invalid("expected an [r, g, b] array".to_string())),
    };

    if components.len() != 3 {
        return Err(invalid(format!(
            "expected 3 components, got {}",
            components.len()
        )));
    }

    let mut rgb = [0u8; 3];
    for (slot, component) in rgb.iter_mut().zip(components) {
        *slot = parse_component(component).ok_or_else(|| {
            invalid(format!(
                "component {} is not an integer in 0-255",
                component
            ))
        })?;
    }

    Ok(Color::from(rgb))
}

fn parse_component(value: &Value) -> Option<u8> {
    if let Some(n) = value.as_u64() {
        return u8::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && (0.0..=255.0).contains(&f) {
        Some(f as u8)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tone() -> Palette {
        Palette::from_json_str(r#"{"⬛": [0, 0, 0], "⬜": [255, 255, 255]}"#).unwrap()
    }

    #[test]
    fn test_load_preserves_document_order() {
        let palette =
            Palette::from_json_str(r#"{"🟩": [0,255,0], "🟥": [255,0,0], "🟦": [0,0,255]}"#)
                .unwrap();
        let glyphs: Vec<&str> = palette.iter().map(|e| e.glyph.as_str()).collect();
        assert_eq!(glyphs, vec!["🟩", "🟥", "🟦"]);
    }

    #[test]
    fn test_load_generator_shape() {
        let palette = Palette::from_json_str(
            r#"{"🟥": {"unicode": "emoji_u1f7e5.png", "color": [221, 46, 68]}}"#,
        )
        .unwrap();
        assert_eq!(palette.get("🟥"), Some(Color::new(221, 46, 68)));
    }

    #[test]
    fn test_load_accepts_whole_floats() {
        let palette = Palette::from_json_str(r#"{"🟥": [255.0, 0, 0.0]}"#).unwrap();
        assert_eq!(palette.get("🟥"), Some(Color::new(255, 0, 0)));
    }

    #[test]
    fn test_load_empty_mapping_fails() {
        let result = Palette::from_json_str("{}");
        assert!(matches!(result, Err(PaletteLoadError::Empty)));
    }

    #[test]
    fn test_load_not_a_mapping_fails() {
        let result = Palette::from_json_str("[[0, 0, 0]]");
        assert!(matches!(result, Err(PaletteLoadError::NotAMapping)));
    }

    #[test]
    fn test_load_bad_json_fails() {
        let result = Palette::from_json_str("{not json");
        assert!(matches!(result, Err(PaletteLoadError::Json(_))));
    }

    #[test]
    fn test_load_rejects_wrong_arity() {
        let result = Palette::from_json_str(r#"{"🟥": [255, 0]}"#);
        assert!(matches!(
            result,
            Err(PaletteLoadError::InvalidColor { ref glyph, .. }) if glyph == "🟥"
        ));
    }

    #[test]
    fn test_load_rejects_out_of_range() {
        for doc in [
            r#"{"a": [256, 0, 0]}"#,
            r#"{"a": [-1, 0, 0]}"#,
            r#"{"a": [1.5, 0, 0]}"#,
            r#"{"a": ["1", 0, 0]}"#,
            r#"{"a": "red"}"#,
            r#"{"a": {"unicode": "x.png"}}"#,
        ] {
            let result = Palette::from_json_str(doc);
            assert!(
                matches!(result, Err(PaletteLoadError::InvalidColor { .. })),
                "expected InvalidColor for {}",
                doc
            );
        }
    }

    #[test]
    fn test_load_rejects_empty_glyph() {
        let result = Palette::from_json_str(r#"{"": [0, 0, 0]}"#);
        assert!(matches!(result, Err(PaletteLoadError::EmptyGlyph)));
    }

    #[test]
    fn test_load_bytes_source() {
        let palette =
            Palette::load(PaletteSource::Bytes(br#"{"x": [1, 2, 3]}"#)).unwrap();
        assert_eq!(palette.len(), 1);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = Palette::load(PaletteSource::path("/nonexistent/emoji_colors.json"));
        assert!(matches!(result, Err(PaletteLoadError::Io { .. })));
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let result = Palette::from_entries(vec![
            PaletteEntry::new("a", Color::new(0, 0, 0)),
            PaletteEntry::new("a", Color::new(1, 1, 1)),
        ]);
        assert!(matches!(result, Err(PaletteLoadError::DuplicateGlyph(g)) if g == "a"));
    }

    #[test]
    fn test_nearest_exact_match() {
        let palette = two_tone();
        assert_eq!(palette.nearest_glyph(Color::new(0, 0, 0)).unwrap(), "⬛");
        assert_eq!(
            palette.nearest_glyph(Color::new(255, 255, 255)).unwrap(),
            "⬜"
        );
    }

    #[test]
    fn test_nearest_approximate() {
        let palette = two_tone();
        assert_eq!(palette.nearest_glyph(Color::new(40, 30, 50)).unwrap(), "⬛");
        assert_eq!(
            palette.nearest_glyph(Color::new(200, 220, 180)).unwrap(),
            "⬜"
        );
    }

    #[test]
    fn test_nearest_tie_prefers_earlier_entry() {
        let palette = Palette::from_entries(vec![
            PaletteEntry::new("first", Color::new(0, 0, 0)),
            PaletteEntry::new("second", Color::new(2, 0, 0)),
        ])
        .unwrap();
        for _ in 0..10 {
            assert_eq!(palette.nearest_glyph(Color::new(1, 0, 0)).unwrap(), "first");
        }

        let reversed = Palette::from_entries(vec![
            PaletteEntry::new("second", Color::new(2, 0, 0)),
            PaletteEntry::new("first", Color::new(0, 0, 0)),
        ])
        .unwrap();
        assert_eq!(reversed.nearest_glyph(Color::new(1, 0, 0)).unwrap(), "second");
    }

    #[test]
    fn test_single_entry_always_wins() {
        let palette = Palette::from_json_str(r#"{"🟥": [255, 0, 0]}"#).unwrap();
        for color in [
            Color::new(0, 0, 0),
            Color::new(0, 0, 255),
            Color::new(255, 255, 255),
        ] {
            assert_eq!(palette.nearest_glyph(color).unwrap(), "🟥");
        }
    }

    #[test]
    fn test_nearest_on_empty_palette_errors() {
        let palette = Palette { entries: Vec::new() };
        assert_eq!(
            palette.nearest_glyph(Color::new(0, 0, 0)),
            Err(EmptyPaletteError)
        );
    }

    #[test]
    fn test_builtin_palette_loads() {
        let palette = Palette::builtin().unwrap();
        assert!(palette.len() > 2);
        assert!(palette.get("⬛").is_some());
        assert!(palette.get("⬜").is_some());
    }
}
