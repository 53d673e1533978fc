//! Command-line interface definitions for hotkey-pump.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use logging::LogArgs;

/// Command-line interface for the `hotkey-pump` binary.
#[derive(Parser, Debug)]
#[command(
    name = "hotkey-pump",
    about = "Serve global hotkeys from a RON file",
    version
)]
pub struct Cli {
    /// Logging controls shared across workspace binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// What to do with the hotkey file.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register the hotkeys and report each one as it fires (Windows only).
    Run(FileArgs),
    /// Parse and validate the hotkey file, then print its bindings.
    Check(FileArgs),
}

/// Arguments naming a hotkey file.
#[derive(Args, Debug, Clone)]
pub struct FileArgs {
    /// Path to the hotkey file (RON).
    #[arg(value_name = "PATH")]
    pub config: PathBuf,
}
