//! Bridge between an external message pump and the [`Registry`].
//!
//! The pump hands every message it sees to [`handle_message`]; only
//! `WM_HOTKEY` is acted on, everything else passes through untouched.

use tracing::trace;
#[cfg(windows)]
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};

use crate::{Fired, Modifiers, Registry, WindowHandle};

/// The hotkey notification message type.
pub const WM_HOTKEY: u32 = 0x0312;

/// A raw window message as seen by the pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    /// Window the message was addressed to.
    pub window: WindowHandle,
    /// Message type.
    pub message: u32,
    /// First parameter; the registration id for `WM_HOTKEY`.
    pub wparam: usize,
    /// Second parameter; modifiers (low word) and virtual key (high word) for `WM_HOTKEY`.
    pub lparam: isize,
}

impl Message {
    /// Build a `WM_HOTKEY` message for `id`.
    pub fn hotkey(window: WindowHandle, id: i32, modifiers: Modifiers, key_code: u32) -> Self {
        let lparam = ((key_code & 0xFFFF) << 16) | (modifiers.bits() & 0xFFFF);
        Self {
            window,
            message: WM_HOTKEY,
            wparam: id as usize,
            lparam: lparam as isize,
        }
    }

    /// Modifiers and virtual key packed into `lparam`.
    pub fn chord(&self) -> (Modifiers, u32) {
        let bits = self.lparam as u32;
        (
            Modifiers::from_bits_truncate(bits & 0xFFFF),
            (bits >> 16) & 0xFFFF,
        )
    }

    /// Wrap the arguments of a window procedure or a retrieved `MSG`.
    #[cfg(windows)]
    pub fn from_raw(hwnd: HWND, message: u32, wparam: WPARAM, lparam: LPARAM) -> Self {
        Self {
            window: hwnd.into(),
            message,
            wparam: wparam.0,
            lparam: lparam.0,
        }
    }
}

/// Offer one message to `registry`.
///
/// Returns the resolved hotkey when the message was a `WM_HOTKEY` for a known
/// id. If a callback ran, `handled` is overwritten with its decision;
/// otherwise it is left as the pump set it.
pub fn handle_message(registry: &Registry, msg: &Message, handled: &mut bool) -> Option<Fired> {
    if msg.message != WM_HOTKEY {
        return None;
    }
    // System ids such as IDHOT_SNAPWINDOW are negative; anything wider than
    // i32 cannot be one of ours.
    let id = i32::try_from(msg.wparam as isize).ok()?;
    let (modifiers, key_code) = msg.chord();
    trace!(window = ?msg.window, id, %modifiers, key_code, "wm_hotkey");
    let fired = registry.dispatch(msg.message, id)?;
    if fired.invoked {
        *handled = fired.handled;
    }
    Some(fired)
}
