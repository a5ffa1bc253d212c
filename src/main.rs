//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `go2web` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output
//!
//! Every outcome, including failures, is printed and the process exits normally.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use go2web::initialization::{init_crypto_provider, init_logger_with, init_resolver};
use go2web::{run, Cli};

fn main() {
    if let Err(e) = try_main() {
        println!("Error: {e:#}");
    }
}

fn try_main() -> Result<()> {
    // -h, unknown options and bad values: clap's text, normal exit
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().context("Failed to print usage")?;
            return Ok(());
        }
    };

    let Some(command) = cli.to_command() else {
        Cli::command().print_help().context("Failed to print usage")?;
        return Ok(());
    };

    let config = cli.config();
    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    init_crypto_provider();

    let resolver = init_resolver(&config).context("Failed to initialize")?;

    match run(&command, &resolver, &config) {
        Ok(output) => print!("{output}"),
        Err(e) => println!("Error: {e}"),
    }
    Ok(())
}
