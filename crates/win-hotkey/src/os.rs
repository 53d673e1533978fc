//! The seam between the registry and the OS hotkey calls.

use crate::{Modifiers, Result, WindowHandle};

/// Minimal OS hotkey API used by [`crate::Registry`].
pub trait HotkeyOs: Send + Sync {
    /// Register `(modifiers, key_code)` under `id` for `window`.
    fn register(
        &self,
        window: WindowHandle,
        id: i32,
        modifiers: Modifiers,
        key_code: u32,
    ) -> Result<()>;

    /// Release the registration `id` held by `window`.
    fn unregister(&self, window: WindowHandle, id: i32) -> Result<()>;
}

pub use mock::MockHotkeyOs;

mod mock {
    //! In-memory stand-in for the OS hotkey table.

    use std::collections::{HashMap, HashSet};

    use parking_lot::Mutex;

    use super::HotkeyOs;
    use crate::{Error, Modifiers, Result, WindowHandle};

    /// Bookkeeping for [`MockHotkeyOs`].
    #[derive(Debug, Default)]
    struct Table {
        /// Live registrations keyed by `(window, id)`.
        live: HashMap<(WindowHandle, i32), (Modifiers, u32)>,
        /// Combinations the fake OS refuses outright.
        refused: HashSet<(Modifiers, u32)>,
        /// Fail every unregister call, leaving the registration live.
        fail_unregister: bool,
        /// Total successful register calls.
        registers: usize,
        /// Total successful unregister calls.
        unregisters: usize,
    }

    /// Fake OS hotkey table.
    ///
    /// Refuses a combination that is already live (as the real OS does when
    /// another registration owns it) and any combination marked with
    /// [`MockHotkeyOs::refuse`]. Unregistering an unknown id fails, as does
    /// every unregister while [`MockHotkeyOs::fail_unregister`] is on.
    #[derive(Debug, Default)]
    pub struct MockHotkeyOs {
        /// Shared table.
        table: Mutex<Table>,
    }

    impl MockHotkeyOs {
        /// Create an empty table.
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every future registration of this combination fail.
        pub fn refuse(&self, modifiers: Modifiers, key_code: u32) {
            self.table.lock().refused.insert((modifiers, key_code));
        }

        /// Allow a previously refused combination again.
        pub fn allow(&self, modifiers: Modifiers, key_code: u32) {
            self.table.lock().refused.remove(&(modifiers, key_code));
        }

        /// Make unregister calls fail (and leave the OS entry live) while `fail` is set.
        pub fn fail_unregister(&self, fail: bool) {
            self.table.lock().fail_unregister = fail;
        }

        /// Number of live registrations.
        pub fn live(&self) -> usize {
            self.table.lock().live.len()
        }

        /// Whether `(window, id)` is currently registered.
        pub fn is_live(&self, window: WindowHandle, id: i32) -> bool {
            self.table.lock().live.contains_key(&(window, id))
        }

        /// Ids registered for `window`, sorted.
        pub fn ids_for(&self, window: WindowHandle) -> Vec<i32> {
            let mut ids: Vec<i32> = self
                .table
                .lock()
                .live
                .keys()
                .filter(|(w, _)| *w == window)
                .map(|(_, id)| *id)
                .collect();
            ids.sort_unstable();
            ids
        }

        /// Total successful register calls.
        pub fn register_calls(&self) -> usize {
            self.table.lock().registers
        }

        /// Total successful unregister calls.
        pub fn unregister_calls(&self) -> usize {
            self.table.lock().unregisters
        }
    }

    impl HotkeyOs for MockHotkeyOs {
        fn register(
            &self,
            window: WindowHandle,
            id: i32,
            modifiers: Modifiers,
            key_code: u32,
        ) -> Result<()> {
            let mut t = self.table.lock();
            if t.refused.contains(&(modifiers, key_code)) {
                return Err(Error::Os("refused".into()));
            }
            if t.live.values().any(|c| *c == (modifiers, key_code)) {
                return Err(Error::Os("hotkey already registered".into()));
            }
            if t.live.contains_key(&(window, id)) {
                return Err(Error::Os(format!("id {id} already in use")));
            }
            t.live.insert((window, id), (modifiers, key_code));
            t.registers += 1;
            Ok(())
        }

        fn unregister(&self, window: WindowHandle, id: i32) -> Result<()> {
            let mut t = self.table.lock();
            if t.fail_unregister {
                return Err(Error::Os(format!("unregister of id {id} refused")));
            }
            if t.live.remove(&(window, id)).is_none() {
                return Err(Error::Os(format!("id {id} not registered")));
            }
            t.unregisters += 1;
            Ok(())
        }
    }
}
