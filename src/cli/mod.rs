pub mod commands;
pub mod logging;
pub mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, LevelFilter};

use tocspy::config;

/// Run the command-line interface
pub fn run() -> ExitCode {
    let cli = types::Cli::parse();

    // Initialize logging system
    let level = logging::init_logging(cli.debug, cli.quiet);

    // Configure backtrace
    logging::configure_backtrace(cli.trace);

    let config_files = if cli.config.is_empty() { None } else { Some(cli.config.clone()) };
    let config = match config::load_config(PathBuf::from("."), config_files) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // The config can ask for debug output; --quiet still wins
    if config.debug && !cli.quiet && level < LevelFilter::Debug {
        logging::set_log_level(LevelFilter::Debug);
    }

    let result = match &cli.command {
        types::Commands::Generate { input, output, content, container } => {
            commands::handle_generate_command(
                config,
                input,
                output.as_deref(),
                content.as_deref(),
                container.as_deref(),
            )
        }
        types::Commands::Spy { input, steps, viewport_height, format, content, container } => {
            commands::handle_spy_command(
                config,
                input,
                steps,
                *viewport_height,
                *format,
                content.as_deref(),
                container.as_deref(),
            )
        }
        types::Commands::Headings { input, format, content } => {
            commands::handle_headings_command(config, input, *format, content.as_deref())
        }
        types::Commands::Slug { text } => commands::handle_slug_command(text),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
