mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("poskit v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let app_config = config::builder::build_config(&cli)?;
    debug!("Resolved configuration: {:?}", app_config);

    let result = match cli.command {
        Commands::Convert(args) => {
            info!("Dispatching to 'convert' command.");
            commands::convert::run(args, &app_config)
        }
        Commands::Vacuum(args) => {
            info!("Dispatching to 'vacuum' command.");
            commands::vacuum::run(args, &app_config)
        }
        Commands::Potcar(args) => {
            info!("Dispatching to 'potcar' command.");
            commands::potcar::run(args, &app_config)
        }
        Commands::Freeze(args) => {
            info!("Dispatching to 'freeze' command.");
            commands::freeze::run(args, &app_config)
        }
        Commands::Interpolate(args) => {
            info!("Dispatching to 'interpolate' command.");
            commands::interpolate::run(args, &app_config)
        }
    };

    match &result {
        Ok(()) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    result
}
