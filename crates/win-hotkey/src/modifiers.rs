use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Modifier flags accepted by the OS hotkey registration call.
    ///
    /// Values match the Win32 `MOD_*` constants so they can be passed through
    /// unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        /// Either Alt key.
        const ALT = 0x0001;
        /// Either Control key.
        const CONTROL = 0x0002;
        /// Either Shift key.
        const SHIFT = 0x0004;
        /// Either Windows logo key.
        const WIN = 0x0008;
        /// Suppress OS auto-repeat notifications while the chord is held.
        const NO_REPEAT = 0x4000;
    }
}

impl Modifiers {
    /// Returns the canonical lowercase name of a single flag.
    fn flag_name(self) -> &'static str {
        match self {
            Self::CONTROL => "ctrl",
            Self::ALT => "alt",
            Self::SHIFT => "shift",
            Self::WIN => "win",
            Self::NO_REPEAT => "norepeat",
            _ => "?",
        }
    }
}

/// Canonical display order for modifier names.
const DISPLAY_ORDER: [Modifiers; 5] = [
    Modifiers::CONTROL,
    Modifiers::ALT,
    Modifiers::SHIFT,
    Modifiers::WIN,
    Modifiers::NO_REPEAT,
];

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = DISPLAY_ORDER
            .iter()
            .filter(|m| self.contains(**m))
            .map(|m| m.flag_name())
            .collect();
        if parts.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", parts.join("+"))
        }
    }
}
