//! Glyph list parsing and emoji image file naming.

use std::collections::HashSet;

/// Split text into glyphs, one per Unicode scalar value.
///
/// Whitespace is skipped and repeated glyphs keep their first position.
pub fn split_glyphs(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.chars()
        .filter(|c| !c.is_whitespace())
        .filter(|c| seen.insert(*c))
        .map(String::from)
        .collect()
}

/// Noto Emoji image file name for a glyph.
///
/// `"🟥"` becomes `"emoji_u1f7e5.png"`; multi-codepoint glyphs join their
/// lowercase hex code points with `_`.
pub fn emoji_filename(glyph: &str) -> String {
    let codepoints: Vec<String> = glyph.chars().map(|c| format!("{:x}", c as u32)).collect();
    format!("emoji_u{}.png", codepoints.join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_skips_whitespace() {
        assert_eq!(split_glyphs("🟥 🟦\n🟩\t"), vec!["🟥", "🟦", "🟩"]);
    }

    #[test]
    fn test_split_dedupes_keeping_first() {
        assert_eq!(split_glyphs("🟦🟥🟦"), vec!["🟦", "🟥"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_glyphs("  \n ").is_empty());
    }

    #[test]
    fn test_filename_single_codepoint() {
        assert_eq!(emoji_filename("🟥"), "emoji_u1f7e5.png");
        assert_eq!(emoji_filename("⬛"), "emoji_u2b1b.png");
    }

    #[test]
    fn test_filename_multi_codepoint() {
        assert_eq!(emoji_filename("🇯🇵"), "emoji_u1f1ef_1f1f5.png");
    }
}
