//! Error handling for the hotkey-pump binary.

use std::{io, result};

use thiserror::Error;

/// Convenient result type for hotkey-pump operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while loading hotkeys or running the pump.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The hotkey file is not valid RON for the expected shape.
    #[error("Failed to parse hotkey file: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// The hotkey file parsed but failed validation.
    #[error("Invalid hotkey file: {0}")]
    Invalid(String),
    /// Errors surfaced by the hotkey registry.
    #[error("Hotkey error: {0}")]
    Hotkey(#[from] win_hotkey::Error),
    /// A window or message loop call failed.
    #[error("OS error: {0}")]
    Os(String),
    /// The message pump only exists on Windows.
    #[error("The message pump is only available on Windows")]
    Unsupported,
}

impl Error {
    /// Helper to build a validation error from an arbitrary message.
    pub fn invalid<M: Into<String>>(msg: M) -> Self {
        Self::Invalid(msg.into())
    }
}
