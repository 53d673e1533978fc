//! Hotkey file format.
//!
//! ```ron
//! (hotkeys: [
//!     (name: "greet", key: 0x70, modifiers: [control, alt], suppress: true),
//!     (name: "quit", key: 0x51, modifiers: [control, alt, norepeat], action: quit),
//! ])
//! ```

use std::{collections::HashSet, fs, path::Path};

use serde::Deserialize;
use win_hotkey::Modifiers;

use crate::error::{Error, Result};

/// Largest virtual key code accepted.
const MAX_VK: u32 = 0xFE;

/// A modifier as written in the hotkey file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierName {
    /// Alt.
    Alt,
    /// Control.
    #[serde(alias = "ctrl")]
    Control,
    /// Shift.
    Shift,
    /// Windows logo key.
    Win,
    /// Suppress auto-repeat.
    NoRepeat,
}

impl From<ModifierName> for Modifiers {
    fn from(m: ModifierName) -> Self {
        match m {
            ModifierName::Alt => Self::ALT,
            ModifierName::Control => Self::CONTROL,
            ModifierName::Shift => Self::SHIFT,
            ModifierName::Win => Self::WIN,
            ModifierName::NoRepeat => Self::NO_REPEAT,
        }
    }
}

/// What happens when a hotkey fires, beyond being reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Report only.
    #[default]
    Log,
    /// Report, then stop the message pump.
    Quit,
}

/// One hotkey entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HotkeyDef {
    /// Unique name.
    pub name: String,
    /// Virtual key code.
    pub key: u32,
    /// Modifier keys.
    #[serde(default)]
    pub modifiers: Vec<ModifierName>,
    /// Action to take on firing.
    #[serde(default)]
    pub action: Action,
    /// Mark the notification handled so the pump skips default processing.
    #[serde(default)]
    pub suppress: bool,
}

impl HotkeyDef {
    /// Combined modifier flags.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
            .iter()
            .fold(Modifiers::empty(), |acc, m| acc | Modifiers::from(*m))
    }
}

/// A parsed and validated hotkey file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// All hotkeys, in file order.
    pub hotkeys: Vec<HotkeyDef>,
}

impl Config {
    /// Parse and validate RON text.
    pub fn parse(text: &str) -> Result<Self> {
        let cfg: Self = ron::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a hotkey file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Reject empty or duplicate names and out-of-range key codes.
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for def in &self.hotkeys {
            if def.name.trim().is_empty() {
                return Err(Error::invalid("hotkey name must not be empty"));
            }
            if !seen.insert(def.name.as_str()) {
                return Err(Error::invalid(format!("duplicate hotkey name {:?}", def.name)));
            }
            if def.key == 0 || def.key > MAX_VK {
                return Err(Error::invalid(format!(
                    "hotkey {:?}: key code {:#04x} outside 0x01..=0xfe",
                    def.name, def.key
                )));
            }
        }
        Ok(())
    }
}
