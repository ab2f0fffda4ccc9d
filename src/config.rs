//! Configuration file handling for emoji-mosaic.
//!
//! Loads configuration from `~/.config/emoji-mosaic/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::mosaic::{ResampleFilter, DEFAULT_GLYPH_ASPECT_RATIO};

/// Configuration file structure for emoji-mosaic.
/// Loaded from ~/.config/emoji-mosaic/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct PaletteConfig {
    /// Palette JSON file; the bundled palette is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub filter: Option<String>,
    pub glyph_aspect: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

fn default_true() -> bool {
    true
}

/// Default config file written by `config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# emoji-mosaic configuration

[palette]
# Palette JSON mapping glyphs to [r, g, b] (default: bundled palette)
# path = "/path/to/emoji_colors.json"

[output]
# Grid size in glyphs. If only one is set the other follows the image aspect ratio.
# width = 40
# height = 30
# Resampling filter: nearest, triangle, catmull-rom, gaussian, lanczos3, area
# filter = "triangle"
# Glyph height / width as displayed
# glyph_aspect = 1.0

[render]
# Match rows in parallel
parallel = true
"#;

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            Self::load_from_explicit(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from a path that must exist.
    pub fn load_from_explicit(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::parse(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resampling filter from `[output] filter`, if set and recognized.
    pub fn filter(&self) -> Result<Option<ResampleFilter>, ConfigError> {
        match self.output.filter.as_deref() {
            None => Ok(None),
            Some(name) => ResampleFilter::from_name(name)
                .map(Some)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "output.filter",
                    value: name.to_string(),
                }),
        }
    }

    /// Glyph aspect ratio from `[output] glyph_aspect`, or the default.
    pub fn glyph_aspect(&self) -> f32 {
        self.output
            .glyph_aspect
            .unwrap_or(DEFAULT_GLYPH_ASPECT_RATIO)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    InvalidValue {
        key: &'static str,
        value: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{}' for config key '{}'", value, key)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("emoji-mosaic").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/emoji-mosaic/config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.palette.path.is_none());
        assert!(config.output.width.is_none());
        assert!(config.render.parallel);
        assert_eq!(config.glyph_aspect(), DEFAULT_GLYPH_ASPECT_RATIO);
    }

    #[test]
    fn test_default_config_template_parses() {
        let config = Config::parse(DEFAULT_CONFIG_TOML).unwrap();
        assert!(config.render.parallel);
        assert_eq!(config.filter().unwrap(), None);
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
[palette]
path = "/tmp/palette.json"

[output]
width = 64
height = 32
filter = "lanczos3"
glyph_aspect = 2.0

[render]
parallel = false
"#,
        )
        .unwrap();
        assert_eq!(config.palette.path, Some(PathBuf::from("/tmp/palette.json")));
        assert_eq!(config.output.width, Some(64));
        assert_eq!(config.output.height, Some(32));
        assert_eq!(config.filter().unwrap(), Some(ResampleFilter::Lanczos3));
        assert_eq!(config.glyph_aspect(), 2.0);
        assert!(!config.render.parallel);
    }

    #[test]
    fn test_unknown_filter_is_error() {
        let config = Config::parse("[output]\nfilter = \"sharpest\"\n").unwrap();
        let err = config.filter().unwrap_err();
        assert!(format!("{}", err).contains("sharpest"));
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        let path = default_path();
        assert!(path.ends_with("emoji-mosaic/config.toml"));
    }
}
