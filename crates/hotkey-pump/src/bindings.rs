//! Wiring configured hotkeys into a [`Registry`].

use std::sync::Arc;

use crossbeam_channel::Sender;
use tracing::{debug, warn};
use win_hotkey::Registry;

use crate::{
    config::{Action, Config, HotkeyDef},
    error::Result,
};

/// A fired hotkey, forwarded off the pump thread for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Hotkey name.
    pub name: String,
    /// Configured action.
    pub action: Action,
}

/// Called when a `quit` hotkey fires. Runs on the pump thread.
pub type QuitFn = Arc<dyn Fn() + Send + Sync>;

/// Add every configured hotkey to `registry`.
///
/// Each callback forwards a [`Report`] to `tx`, runs `quit` for quit actions,
/// and marks the notification handled when the entry asks for suppression.
pub fn install(
    registry: &Registry,
    config: &Config,
    tx: &Sender<Report>,
    quit: &QuitFn,
) -> Result<()> {
    for def in &config.hotkeys {
        let tx = tx.clone();
        let quit = quit.clone();
        let action = def.action;
        let suppress = def.suppress;
        registry.add_or_replace_fn(def.name.as_str(), def.key, def.modifiers(), move |e| {
            if tx
                .send(Report {
                    name: e.name.clone(),
                    action,
                })
                .is_err()
            {
                warn!(name = %e.name, "reporter_gone");
            }
            if action == Action::Quit {
                quit();
            }
            e.handled = suppress;
        })?;
        debug!(name = %def.name, "hotkey_configured");
    }
    Ok(())
}

/// One-line summary of a hotkey entry.
pub fn describe(def: &HotkeyDef) -> String {
    format!(
        "{:<16} {}+{:#04x} {:?}{}",
        def.name,
        def.modifiers(),
        def.key,
        def.action,
        if def.suppress { " (suppress)" } else { "" }
    )
}
