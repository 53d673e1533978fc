//! Error types and result alias for the win-hotkey crate.
use std::result::Result as StdResult;

use thiserror::Error;

use crate::Modifiers;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Error variants produced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Underlying OS call failed.
    #[error("OS error: {0}")]
    Os(String),
    /// The OS refused to register a key combination.
    #[error("Failed to register {modifiers}+{key_code:#04x}: {reason}")]
    Register {
        /// Virtual key code of the refused combination.
        key_code: u32,
        /// Modifier flags of the refused combination.
        modifiers: Modifiers,
        /// OS-provided failure description.
        reason: String,
    },
    /// One or more hotkeys failed to register while binding a window.
    #[error("{} hotkey(s) failed to register: {}", .0.len(), failed_names(.0))]
    Bind(Vec<(String, Error)>),
    /// Every registration id in the application range is in use.
    #[error("Registration ids exhausted")]
    IdsExhausted,
}

/// Comma-joined names for the `Bind` message.
fn failed_names(failures: &[(String, Error)]) -> String {
    failures
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
