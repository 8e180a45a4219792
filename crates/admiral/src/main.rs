//! Admiral CLI - inspect a host application's admin model configuration
//!
//! This is the main entry point for the admiral command-line interface.

mod cli;
mod commands;
mod output;
mod schema;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let config_dir = cli.config.as_deref();
    match cli.command {
        Commands::Pool(args) => commands::pool::run(args, config_dir),
        Commands::Models(args) => commands::models::run(args, config_dir),
        Commands::Visible(args) => commands::visible::run(args, config_dir),
        Commands::Settings(args) => commands::settings::run(args, config_dir),
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
