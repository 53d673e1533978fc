#![warn(missing_docs)]

//! Entry point for the `hotkey-pump` binary.

#[cfg_attr(not(windows), allow(dead_code))]
mod bindings;
mod cli;
mod config;
mod error;
#[cfg(windows)]
mod pump;

use std::process;

use clap::Parser;
use tracing::{error, info};

use crate::{
    cli::{Cli, Commands, FileArgs},
    config::Config,
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli { log, command } = Cli::parse();
    logging::init(&log);

    match command {
        Commands::Check(args) => check(&args),
        Commands::Run(args) => {
            let config = Config::load(&args.config)?;
            info!(path = %args.config.display(), hotkeys = config.hotkeys.len(), "config_loaded");
            serve(&config)
        }
    }
}

/// Validate the file and print one line per hotkey.
fn check(args: &FileArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    for def in &config.hotkeys {
        println!("{}", bindings::describe(def));
    }
    println!("{}: {} hotkey(s) ok", args.config.display(), config.hotkeys.len());
    Ok(())
}

#[cfg(windows)]
fn serve(config: &Config) -> Result<()> {
    pump::run(config)
}

#[cfg(not(windows))]
fn serve(_config: &Config) -> Result<()> {
    Err(error::Error::Unsupported)
}
