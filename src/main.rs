use clap::Parser;

use emoji_mosaic::cli::{self, Args, CliError, Command};

/// Install the logger: warnings by default, more with each -v.
/// `RUST_LOG` overrides the level when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let config_path = args.config.as_deref();

    match args.command {
        Command::Convert(convert) => {
            let config = cli::load_config(config_path)?;
            cli::run_convert(&convert, &config)
        }
        Command::BuildPalette(build) => cli::run_build_palette(&build),
        Command::Config { action } => cli::handle_config_action(&action, config_path),
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
