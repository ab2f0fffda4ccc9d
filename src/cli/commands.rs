//! Subcommand handlers for convert, build-palette and config actions.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::args::{BuildPaletteArgs, ConfigAction, ConvertArgs};
use crate::config::{default_path as get_config_path, Config, ConfigError, DEFAULT_CONFIG_TOML};
use crate::mosaic::{
    fit_dimensions, ImageFile, ImageSource, Palette, PaletteLoadError, PaletteSource,
    ReduceError, Reducer, Resolution,
};
use crate::palette_gen::{
    build_palette, split_glyphs, write_palette_json, write_report, EmojiImageClient, ImageStore,
    PaletteGenError,
};

/// Errors reported by the command-line front end.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    PaletteLoad(#[from] PaletteLoadError),

    #[error(transparent)]
    Reduce(#[from] ReduceError),

    #[error(transparent)]
    PaletteGen(#[from] PaletteGenError),

    #[error("Failed to read '{}': {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write '{}': {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create async runtime: {0}")]
    Runtime(std::io::Error),

    #[error("Config file already exists: {}", .0.display())]
    ConfigExists(PathBuf),
}

/// Load configuration.
///
/// An explicit path must exist and parse. Without one, the default location
/// is tried and a broken file there only produces a warning.
pub fn load_config(path: Option<&Path>) -> Result<Config, CliError> {
    match path {
        Some(path) => Ok(Config::load_from_explicit(path)?),
        None => match Config::load(None) {
            Ok(config) => Ok(config),
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using default settings.", e);
                Ok(Config::default())
            }
        },
    }
}

fn load_palette(path: Option<&Path>) -> Result<Palette, PaletteLoadError> {
    match path {
        Some(path) => Palette::load(PaletteSource::path(path)),
        None => Palette::builtin(),
    }
}

/// Convert the requested image to emoji text.
///
/// Settings merge as CLI args > config file > built-in defaults. A missing
/// grid side is derived from the image aspect ratio.
pub fn convert_image(args: &ConvertArgs, config: &Config) -> Result<String, CliError> {
    let width = args.width.or(config.output.width);
    let height = args.height.or(config.output.height);

    // Reject explicit non-positive sizes before touching the image.
    Resolution::new(width.unwrap_or(1), height.unwrap_or(1)).map_err(ReduceError::from)?;

    let palette_path = args.palette.as_deref().or(config.palette.path.as_deref());
    let palette = load_palette(palette_path)?;

    let filter = match args.filter {
        Some(f) => f.into(),
        None => config.filter()?.unwrap_or_default(),
    };
    let mut reducer = Reducer::new(filter);
    if args.sequential || !config.render.parallel {
        reducer = reducer.sequential();
    }

    let source = ImageFile::new(&args.image);
    let grid_text = match (width, height) {
        (Some(w), Some(h)) => reducer.reduce(&source, w, h, &palette)?.to_text(),
        _ => {
            let decoded = source.decode().map_err(ReduceError::from)?;
            let (w, h) = fit_dimensions(
                decoded.width(),
                decoded.height(),
                width,
                height,
                config.glyph_aspect(),
            );
            log::info!("Derived grid size {}x{}", w, h);
            reducer.reduce(&*decoded, w, h, &palette)?.to_text()
        }
    };

    Ok(grid_text)
}

/// Run the convert subcommand, writing to `--output` or stdout.
pub fn run_convert(args: &ConvertArgs, config: &Config) -> Result<(), CliError> {
    let grid_text = convert_image(args, config)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &grid_text).map_err(|e| CliError::Write {
                path: path.clone(),
                source: e,
            })?;
            log::info!("Wrote emoji grid to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(grid_text.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| CliError::Write {
                    path: PathBuf::from("<stdout>"),
                    source: e,
                })?;
        }
    }

    Ok(())
}

/// Run the build-palette subcommand.
pub fn run_build_palette(args: &BuildPaletteArgs) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&args.emoji_file).map_err(|e| CliError::Read {
        path: args.emoji_file.clone(),
        source: e,
    })?;

    let glyphs = split_glyphs(&text);
    if glyphs.is_empty() {
        return Err(PaletteGenError::NoGlyphs.into());
    }

    let rt = tokio::runtime::Runtime::new().map_err(CliError::Runtime)?;
    let build = rt.block_on(async {
        let store = match (&args.dir, &args.base_url) {
            (Some(dir), _) => ImageStore::Directory(dir.clone()),
            (None, Some(url)) => ImageStore::Http(EmojiImageClient::with_base_url(url.clone())?),
            (None, None) => ImageStore::Http(EmojiImageClient::new()?),
        };
        Ok::<_, PaletteGenError>(build_palette(&glyphs, &store).await)
    })?;

    write_report(&build, std::io::stdout().lock()).map_err(|e| CliError::Write {
        path: PathBuf::from("<stdout>"),
        source: e,
    })?;

    if build.entries.is_empty() {
        return Err(PaletteGenError::NoEntries.into());
    }

    let file = std::fs::File::create(&args.output).map_err(|e| CliError::Write {
        path: args.output.clone(),
        source: e,
    })?;
    write_palette_json(&build, std::io::BufWriter::new(file))?;

    println!(
        "Processed {} glyph(s), skipped {}.",
        build.entries.len(),
        build.skipped.len()
    );
    println!("Palette saved to {}", args.output.display());
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: &ConfigAction, config_path: Option<&Path>) -> Result<(), CliError> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(get_config_path);

    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let filter = config.filter()?.unwrap_or_default();

            println!("Current configuration:");
            match &config.palette.path {
                Some(p) => println!("  Palette: {}", p.display()),
                None => println!("  Palette: (bundled)"),
            }
            println!("  Width: {}", describe_side(config.output.width));
            println!("  Height: {}", describe_side(config.output.height));
            println!("  Filter: {}", filter.name());
            println!("  Glyph aspect: {}", config.glyph_aspect());
            println!("  Parallel: {}", if config.render.parallel { "yes" } else { "no" });
            println!();

            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found)", path.display());
            }
        }
        ConfigAction::Init => {
            if path.exists() {
                return Err(CliError::ConfigExists(path));
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| CliError::Write {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }

            std::fs::write(&path, DEFAULT_CONFIG_TOML).map_err(|e| CliError::Write {
                path: path.clone(),
                source: e,
            })?;

            println!("Created config file: {}", path.display());
        }
    }

    Ok(())
}

fn describe_side(side: Option<i64>) -> String {
    side.map(|v| v.to_string())
        .unwrap_or_else(|| "auto".to_string())
}
