use std::{fmt, sync::Arc};

use tracing::{debug, warn};

use crate::{Error, HotkeyOs, IdAllocator, Modifiers, Result, WindowHandle};

/// Argument handed to a hotkey callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyEvent {
    /// Name the hotkey was added under.
    pub name: String,
    /// Set to `true` to tell the message pump the notification is consumed.
    pub handled: bool,
}

/// Callback invoked when a hotkey fires.
pub type HotkeyCallback = Arc<dyn Fn(&mut HotkeyEvent) + Send + Sync>;

/// A live OS registration: the id and the window that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Registration {
    /// Id passed to the OS and echoed back in notifications.
    id: i32,
    /// Window the registration was made for.
    window: WindowHandle,
}

/// One hotkey registration request plus its OS-side state.
///
/// The chord and callback are fixed at construction. The registration is
/// present exactly while the OS holds the chord for a window.
pub(crate) struct Hotkey {
    /// Virtual key code.
    key_code: u32,
    /// Modifier flags.
    modifiers: Modifiers,
    /// Optional callback.
    callback: Option<HotkeyCallback>,
    /// Present while registered.
    registration: Option<Registration>,
}

impl fmt::Debug for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hotkey")
            .field("key_code", &self.key_code)
            .field("modifiers", &self.modifiers)
            .field("callback", &self.callback.is_some())
            .field("registration", &self.registration)
            .finish()
    }
}

impl Hotkey {
    /// A new, unregistered record.
    pub(crate) fn new(
        key_code: u32,
        modifiers: Modifiers,
        callback: Option<HotkeyCallback>,
    ) -> Self {
        Self {
            key_code,
            modifiers,
            callback,
            registration: None,
        }
    }

    /// Virtual key code.
    pub(crate) fn key_code(&self) -> u32 {
        self.key_code
    }

    /// Modifier flags.
    pub(crate) fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Stored callback, if any.
    pub(crate) fn callback(&self) -> Option<&HotkeyCallback> {
        self.callback.as_ref()
    }

    /// Registration id, if currently registered.
    pub(crate) fn id(&self) -> Option<i32> {
        self.registration.map(|r| r.id)
    }

    /// Register with the OS for `window` under a fresh id.
    ///
    /// A no-op returning the existing id when already registered. On failure
    /// the id goes back to the allocator and the record stays unregistered.
    pub(crate) fn register(
        &mut self,
        os: &dyn HotkeyOs,
        ids: &dyn IdAllocator,
        window: WindowHandle,
    ) -> Result<i32> {
        if let Some(reg) = self.registration {
            debug!(id = reg.id, "hotkey_already_registered");
            return Ok(reg.id);
        }
        let id = ids.allocate()?;
        if let Err(e) = os.register(window, id, self.modifiers, self.key_code) {
            ids.release(id);
            let reason = match e {
                Error::Os(msg) => msg,
                other => other.to_string(),
            };
            return Err(Error::Register {
                key_code: self.key_code,
                modifiers: self.modifiers,
                reason,
            });
        }
        debug!(
            id,
            ?window,
            modifiers = %self.modifiers,
            key_code = self.key_code,
            "hotkey_registered"
        );
        self.registration = Some(Registration { id, window });
        Ok(id)
    }

    /// Release the OS registration, returning the former id.
    ///
    /// Safe to call when not registered. An OS failure is logged and the
    /// registration is cleared anyway.
    pub(crate) fn unregister(&mut self, os: &dyn HotkeyOs, ids: &dyn IdAllocator) -> Option<i32> {
        let reg = self.registration.take()?;
        match os.unregister(reg.window, reg.id) {
            Ok(()) => debug!(id = reg.id, window = ?reg.window, "hotkey_unregistered"),
            Err(e) => warn!(id = reg.id, window = ?reg.window, error = %e, "unregister_failed"),
        }
        ids.release(reg.id);
        Some(reg.id)
    }
}
