//! Win32 implementation of the OS hotkey seam.
//!
//! `RegisterHotKey` posts `WM_HOTKEY` to the given window whenever the chord
//! is pressed, with the registration id in `wParam`. Registration fails with
//! `ERROR_HOTKEY_ALREADY_REGISTERED` when any process already owns the chord.

use std::ffi::c_void;

use tracing::warn;
use windows::Win32::{
    Foundation::HWND,
    UI::Input::KeyboardAndMouse::{HOT_KEY_MODIFIERS, RegisterHotKey, UnregisterHotKey},
};

use crate::{Error, HotkeyOs, Modifiers, Result, WindowHandle};

impl From<HWND> for WindowHandle {
    fn from(hwnd: HWND) -> Self {
        Self(hwnd.0 as isize)
    }
}

impl From<WindowHandle> for HWND {
    fn from(handle: WindowHandle) -> Self {
        Self(handle.0 as *mut c_void)
    }
}

/// Calls straight through to `user32`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32HotkeyOs;

impl HotkeyOs for Win32HotkeyOs {
    fn register(
        &self,
        window: WindowHandle,
        id: i32,
        modifiers: Modifiers,
        key_code: u32,
    ) -> Result<()> {
        // SAFETY: RegisterHotKey only reads its arguments; an invalid HWND is
        // reported as an error.
        unsafe {
            RegisterHotKey(
                Some(window.into()),
                id,
                HOT_KEY_MODIFIERS(modifiers.bits()),
                key_code,
            )
        }
        .map_err(|e| {
            warn!(id, %modifiers, key_code, error = %e, "register_hotkey_failed");
            Error::Os(e.message())
        })
    }

    fn unregister(&self, window: WindowHandle, id: i32) -> Result<()> {
        // SAFETY: UnregisterHotKey only reads its arguments.
        unsafe { UnregisterHotKey(Some(window.into()), id) }
            .map_err(|e| Error::Os(e.message()))
    }
}
