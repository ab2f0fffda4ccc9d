//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, BuildPaletteArgs, Command, ConfigAction, ConvertArgs};
pub use commands::{handle_config_action, load_config, run_build_palette, run_convert, CliError};
pub use enums::Filter;
