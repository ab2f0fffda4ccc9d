//! CLI argument parsing with clap.

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use super::enums::Filter;

/// Convert images into grids of emoji
#[derive(Parser, Debug)]
#[command(name = "emoji-mosaic")]
#[command(version, about = "Convert images into grids of emoji", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an image to an emoji grid
    Convert(ConvertArgs),
    /// Compute a palette from emoji images
    BuildPalette(BuildPaletteArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ConvertArgs {
    /// Image file (PNG, JPEG, GIF, BMP, WebP, ...)
    pub image: PathBuf,

    /// Grid width in glyphs
    #[arg(short = 'W', long, allow_negative_numbers = true)]
    pub width: Option<i64>,

    /// Grid height in glyphs
    #[arg(short = 'H', long, allow_negative_numbers = true)]
    pub height: Option<i64>,

    /// Palette JSON file (default: bundled palette)
    #[arg(short, long)]
    pub palette: Option<PathBuf>,

    /// Resampling filter
    #[arg(long)]
    pub filter: Option<Filter>,

    /// Match rows on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Write the grid to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct BuildPaletteArgs {
    /// Text file containing the emoji to include
    pub emoji_file: PathBuf,

    /// Output palette file
    #[arg(short, long, default_value = "emoji_colors.json")]
    pub output: PathBuf,

    /// Base URL to download emoji images from (default: Noto Emoji)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Read emoji images from a local directory instead of downloading
    #[arg(long, conflicts_with = "base_url")]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
