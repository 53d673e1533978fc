//! Named, process-wide global hotkeys bound to a message window.
//!
//! - [`Registry`]: maps caller-chosen names to OS hotkey registrations, keeps
//!   them in step with the bound message window, and routes notifications
//!   back to callbacks.
//! - [`handle_message`]: the hook the message pump calls for every message.
//! - [`HotkeyOs`]: the OS register/unregister seam; [`Win32HotkeyOs`] on
//!   Windows, [`MockHotkeyOs`] for tests.
//! - [`IdAllocator`]: registration id source; [`SequentialIds`] by default.
//!
//! Window creation, the message loop itself, and translating key names into
//! virtual key codes are left to the host.
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

mod dispatch;
mod error;
mod hotkey;
mod ids;
mod modifiers;
mod os;
mod registry;
#[cfg(windows)]
mod sys;

pub use dispatch::{Message, WM_HOTKEY, handle_message};
pub use error::{Error, Result};
pub use hotkey::{HotkeyCallback, HotkeyEvent};
pub use ids::{IdAllocator, MAX_ID, MIN_ID, SequentialIds};
pub use modifiers::Modifiers;
pub use os::{HotkeyOs, MockHotkeyOs};
pub use registry::{Fired, Registry, SuspendGuard};
#[cfg(windows)]
pub use sys::Win32HotkeyOs;

/// Opaque OS handle of the window hotkey notifications are delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);
