//! Message-only window and the Win32 message loop.

use std::{sync::Arc, thread};

use tracing::{debug, info, trace, warn};
use win_hotkey::{Message, Registry, Win32HotkeyOs, handle_message};
use windows::{
    Win32::{
        Foundation::HWND,
        UI::WindowsAndMessaging::{
            CreateWindowExW, DestroyWindow, DispatchMessageW, GetMessageW, HWND_MESSAGE, MSG,
            PostQuitMessage, TranslateMessage, WINDOW_EX_STYLE, WINDOW_STYLE,
        },
    },
    core::w,
};

use crate::{
    bindings::{self, QuitFn, Report},
    config::Config,
    error::{Error, Result},
};

/// A message-only window that owns the hotkey registrations.
struct MessageWindow {
    /// Window handle.
    hwnd: HWND,
}

impl MessageWindow {
    /// Create a hidden message-only window on the calling thread.
    fn create() -> Result<Self> {
        // SAFETY: the predefined STATIC class needs no registration; all
        // pointer arguments are either static strings or null.
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                w!("STATIC"),
                w!("hotkey-pump"),
                WINDOW_STYLE::default(),
                0,
                0,
                0,
                0,
                Some(HWND_MESSAGE),
                None,
                None,
                None,
            )
        }
        .map_err(|e| Error::Os(e.message()))?;
        debug!(hwnd = ?hwnd.0, "message_window_created");
        Ok(Self { hwnd })
    }
}

impl Drop for MessageWindow {
    fn drop(&mut self) {
        // SAFETY: the handle was created by this thread and is destroyed once.
        if let Err(e) = unsafe { DestroyWindow(self.hwnd) } {
            warn!(error = %e, "destroy_window_failed");
        }
    }
}

/// Register `config`'s hotkeys on a fresh message window and pump messages
/// until a quit hotkey fires.
pub fn run(config: &Config) -> Result<()> {
    let (tx, rx) = crossbeam_channel::unbounded::<Report>();
    let reporter = thread::spawn(move || {
        for report in rx {
            info!(name = %report.name, action = ?report.action, "hotkey_fired");
        }
    });

    let registry = Registry::new(Arc::new(Win32HotkeyOs));
    // SAFETY: PostQuitMessage only posts to the calling thread's queue, and
    // callbacks run on the pump thread.
    let quit: QuitFn = Arc::new(|| unsafe { PostQuitMessage(0) });
    bindings::install(&registry, config, &tx, &quit)?;
    drop(tx);

    let window = MessageWindow::create()?;
    if let Err(e) = registry.bind_to_window(window.hwnd.into()) {
        warn!(error = %e, "some_hotkeys_unavailable");
    }
    info!(
        registered = registry.registered(),
        pending = ?registry.pending(),
        "pump_started"
    );

    let result = pump(&registry);

    registry.dispose();
    drop(window);
    // Callbacks hold the remaining senders; release them so the reporter ends.
    for def in &config.hotkeys {
        registry.remove(&def.name);
    }
    if reporter.join().is_err() {
        warn!("reporter_panicked");
    }
    result
}

/// Run the message loop, offering every message to the registry first.
fn pump(registry: &Registry) -> Result<()> {
    let mut msg = MSG::default();
    loop {
        // SAFETY: `msg` is a valid out-pointer for the duration of the call.
        let ret = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        match ret.0 {
            0 => {
                debug!("wm_quit");
                return Ok(());
            }
            -1 => return Err(Error::Os("GetMessageW failed".into())),
            _ => {}
        }
        let mut handled = false;
        let m = Message::from_raw(msg.hwnd, msg.message, msg.wParam, msg.lParam);
        if let Some(fired) = handle_message(registry, &m, &mut handled) {
            trace!(name = %fired.name, handled, "dispatched");
        }
        if !handled {
            // SAFETY: `msg` was filled in by GetMessageW above.
            unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }
}
