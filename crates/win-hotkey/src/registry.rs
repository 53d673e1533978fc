//! Thread-safe directory of named hotkeys and their binding to a message window.
//!
//! The name index and the id index are one logical table: both are only ever
//! touched together under a single lock. Callbacks run after that lock is
//! released, so they may call back into the registry.

use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use std::result::Result as StdResult;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::{
    Error, HotkeyCallback, HotkeyEvent, HotkeyOs, IdAllocator, Modifiers, Result, SequentialIds,
    WindowHandle, dispatch::WM_HOTKEY, hotkey::Hotkey,
};

/// Outcome of a dispatched hotkey notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired {
    /// Registration id carried by the notification.
    pub id: i32,
    /// Name of the hotkey that fired.
    pub name: String,
    /// Virtual key code of the hotkey.
    pub key_code: u32,
    /// Modifier flags of the hotkey.
    pub modifiers: Modifiers,
    /// Whether a callback was invoked.
    pub invoked: bool,
    /// Final value of the callback's handled flag.
    pub handled: bool,
}

/// Both indices plus the bound window.
#[derive(Debug, Default)]
struct State {
    /// Name → record.
    by_name: HashMap<String, Hotkey>,
    /// Registration id → name, for registered records only.
    by_id: HashMap<i32, String>,
    /// Window registrations are made for, when bound.
    window: Option<WindowHandle>,
}

impl State {
    /// Unregister and drop `name`. Returns whether it existed.
    fn remove(&mut self, name: &str, os: &dyn HotkeyOs, ids: &dyn IdAllocator) -> bool {
        let Some(mut hk) = self.by_name.remove(name) else {
            return false;
        };
        if let Some(id) = hk.unregister(os, ids) {
            self.by_id.remove(&id);
        }
        debug!(name, "hotkey_removed");
        true
    }

    /// Release every registration and forget the window.
    fn unbind(&mut self, os: &dyn HotkeyOs, ids: &dyn IdAllocator) {
        let Some(window) = self.window.take() else {
            return;
        };
        for hk in self.by_name.values_mut() {
            hk.unregister(os, ids);
        }
        self.by_id.clear();
        debug!(?window, hotkeys = self.by_name.len(), "registry_unbound");
    }
}

/// Everything shared between [`Registry`] clones.
struct Shared {
    /// Indices and window, under the registry lock.
    state: Mutex<State>,
    /// OS hotkey calls.
    os: Arc<dyn HotkeyOs>,
    /// Registration id source.
    ids: Arc<dyn IdAllocator>,
    /// Outstanding [`SuspendGuard`]s.
    suspended: AtomicUsize,
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.state.get_mut().unbind(&*self.os, &*self.ids);
    }
}

/// The authoritative, thread-safe directory of global hotkeys.
///
/// Cloning is cheap; clones share state. When the last clone is dropped every
/// OS registration is released. Callbacks that capture a clone keep the
/// registry alive, so owners should call [`Registry::dispose`] explicitly.
#[derive(Clone)]
pub struct Registry {
    /// Shared state.
    shared: Arc<Shared>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = self.shared.state.lock();
        f.debug_struct("Registry")
            .field("window", &st.window)
            .field("hotkeys", &st.by_name.len())
            .field("registered", &st.by_id.len())
            .finish()
    }
}

impl Registry {
    /// Create an unbound registry drawing ids from [`SequentialIds::global`].
    pub fn new(os: Arc<dyn HotkeyOs>) -> Self {
        Self::with_ids(os, Arc::new(SequentialIds::global()))
    }

    /// Create an unbound registry with an explicit id allocator.
    pub fn with_ids(os: Arc<dyn HotkeyOs>, ids: Arc<dyn IdAllocator>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                os,
                ids,
                suspended: AtomicUsize::new(0),
            }),
        }
    }

    /// Add a hotkey under `name`, replacing any existing one.
    ///
    /// An existing entry is fully removed first, so its OS registration is
    /// released even when the chord is unchanged. When a window is bound the
    /// new hotkey is registered immediately; if the OS refuses, the name is
    /// kept without an id and retried on the next [`Registry::bind_to_window`].
    pub fn add_or_replace(
        &self,
        name: impl Into<String>,
        key_code: u32,
        modifiers: Modifiers,
        callback: Option<HotkeyCallback>,
    ) -> Result<()> {
        let name = name.into();
        let sh = &*self.shared;
        let mut st = sh.state.lock();
        if st.remove(&name, &*sh.os, &*sh.ids) {
            debug!(name = %name, "hotkey_replacing");
        }
        let mut hk = Hotkey::new(key_code, modifiers, callback);
        let window = st.window;
        let res = match window {
            Some(window) => match hk.register(&*sh.os, &*sh.ids, window) {
                Ok(id) => {
                    st.by_id.insert(id, name.clone());
                    Ok(())
                }
                Err(e) => {
                    warn!(name = %name, error = %e, "hotkey_pending");
                    Err(e)
                }
            },
            None => Ok(()),
        };
        debug!(name = %name, key_code, %modifiers, "hotkey_added");
        st.by_name.insert(name, hk);
        res
    }

    /// [`Registry::add_or_replace`] with a closure callback.
    pub fn add_or_replace_fn<F>(
        &self,
        name: impl Into<String>,
        key_code: u32,
        modifiers: Modifiers,
        callback: F,
    ) -> Result<()>
    where
        F: Fn(&mut HotkeyEvent) + Send + Sync + 'static,
    {
        self.add_or_replace(name, key_code, modifiers, Some(Arc::new(callback)))
    }

    /// Remove `name`, releasing its OS registration. Absent names are ignored.
    pub fn remove(&self, name: &str) {
        let sh = &*self.shared;
        sh.state.lock().remove(name, &*sh.os, &*sh.ids);
    }

    /// Register every hotkey for `window` and make it the bound window.
    ///
    /// If a window is already bound it is unbound first. Registration
    /// continues past failures; failed names stay pending and are reported
    /// together in [`Error::Bind`]. The window is bound either way.
    pub fn bind_to_window(&self, window: WindowHandle) -> Result<()> {
        let sh = &*self.shared;
        let mut guard = sh.state.lock();
        if let Some(prev) = guard.window {
            warn!(?prev, ?window, "rebinding_without_unbind");
            guard.unbind(&*sh.os, &*sh.ids);
        }
        let State {
            by_name,
            by_id,
            window: bound,
        } = &mut *guard;
        let mut failures = Vec::new();
        for (name, hk) in by_name.iter_mut() {
            match hk.register(&*sh.os, &*sh.ids, window) {
                Ok(id) => {
                    by_id.insert(id, name.clone());
                }
                Err(e) => {
                    warn!(name = %name, error = %e, "hotkey_pending");
                    failures.push((name.clone(), e));
                }
            }
        }
        *bound = Some(window);
        debug!(
            ?window,
            registered = by_id.len(),
            failed = failures.len(),
            "registry_bound"
        );
        if failures.is_empty() {
            Ok(())
        } else {
            failures.sort_by(|a, b| a.0.cmp(&b.0));
            Err(Error::Bind(failures))
        }
    }

    /// Release every OS registration and forget the window. Never fails.
    pub fn unbind(&self) {
        let sh = &*self.shared;
        sh.state.lock().unbind(&*sh.os, &*sh.ids);
    }

    /// Tear down: equivalent to [`Registry::unbind`], safe to repeat.
    pub fn dispose(&self) {
        self.unbind();
    }

    /// Handle one incoming message.
    ///
    /// Returns `None` for non-hotkey messages, unknown ids, and while
    /// suspended. Otherwise invokes the hotkey's callback outside the lock and
    /// reports the outcome.
    pub fn dispatch(&self, message_type: u32, id: i32) -> Option<Fired> {
        if message_type != WM_HOTKEY {
            return None;
        }
        let (name, key_code, modifiers, callback) = {
            let st = self.shared.state.lock();
            let Some(name) = st.by_id.get(&id) else {
                trace!(id, "unknown_hotkey_id");
                return None;
            };
            let hk = st.by_name.get(name)?;
            (
                name.clone(),
                hk.key_code(),
                hk.modifiers(),
                hk.callback().cloned(),
            )
        };
        if self.is_suspended() {
            trace!(id, name = %name, "dispatch_suspended");
            return None;
        }
        let mut event = HotkeyEvent {
            name,
            handled: false,
        };
        let invoked = match callback {
            Some(cb) => {
                cb(&mut event);
                true
            }
            None => false,
        };
        trace!(id, name = %event.name, invoked, handled = event.handled, "hotkey_fired");
        Some(Fired {
            id,
            name: event.name,
            key_code,
            modifiers,
            invoked,
            handled: event.handled,
        })
    }

    /// Stop invoking callbacks until the returned guard is dropped.
    pub fn suspend(&self) -> SuspendGuard {
        let prev = self.shared.suspended.fetch_add(1, Ordering::SeqCst);
        debug!(depth = prev + 1, "dispatch_suspended");
        SuspendGuard {
            shared: self.shared.clone(),
        }
    }

    /// Whether any [`SuspendGuard`] is outstanding.
    pub fn is_suspended(&self) -> bool {
        self.shared.suspended.load(Ordering::SeqCst) > 0
    }

    /// Whether a window is bound.
    pub fn is_bound(&self) -> bool {
        self.shared.state.lock().window.is_some()
    }

    /// The bound window, if any.
    pub fn window(&self) -> Option<WindowHandle> {
        self.shared.state.lock().window
    }

    /// Number of named hotkeys, registered or pending.
    pub fn len(&self) -> usize {
        self.shared.state.lock().by_name.len()
    }

    /// Whether no hotkeys are known.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `name` is known.
    pub fn contains(&self, name: &str) -> bool {
        self.shared.state.lock().by_name.contains_key(name)
    }

    /// Registration id of `name`, if registered.
    pub fn registration_id(&self, name: &str) -> Option<i32> {
        self.shared.state.lock().by_name.get(name)?.id()
    }

    /// Name registered under `id`, if any.
    pub fn name_for_id(&self, id: i32) -> Option<String> {
        self.shared.state.lock().by_id.get(&id).cloned()
    }

    /// Number of entries in the id index.
    pub fn registered(&self) -> usize {
        self.shared.state.lock().by_id.len()
    }

    /// Names known but not registered, sorted.
    pub fn pending(&self) -> Vec<String> {
        let st = self.shared.state.lock();
        let mut names: Vec<String> = st
            .by_name
            .iter()
            .filter(|(_, hk)| hk.id().is_none())
            .map(|(n, _)| n.clone())
            .collect();
        names.sort();
        names
    }

    /// Snapshot of all hotkeys as sorted `(name, id)` pairs.
    pub fn bindings_snapshot(&self) -> Vec<(String, Option<i32>)> {
        let st = self.shared.state.lock();
        let mut pairs: Vec<(String, Option<i32>)> = st
            .by_name
            .iter()
            .map(|(n, hk)| (n.clone(), hk.id()))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    /// Check that the two indices agree with each other and with the window.
    pub fn check_invariants(&self) -> StdResult<(), String> {
        let st = self.shared.state.lock();
        let registered = st.by_name.values().filter(|hk| hk.id().is_some()).count();
        if st.by_id.len() != registered {
            return Err(format!(
                "id index has {} entries, {} records registered",
                st.by_id.len(),
                registered
            ));
        }
        for (name, hk) in &st.by_name {
            if let Some(id) = hk.id() {
                if st.window.is_none() {
                    return Err(format!("{name} registered while unbound"));
                }
                if st.by_id.get(&id) != Some(name) {
                    return Err(format!("{name} (id {id}) missing from id index"));
                }
            }
        }
        Ok(())
    }
}

/// Keeps dispatch suspended while alive.
#[must_use = "dispatch resumes as soon as the guard is dropped"]
pub struct SuspendGuard {
    /// Registry being suspended.
    shared: Arc<Shared>,
}

impl fmt::Debug for SuspendGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuspendGuard").finish_non_exhaustive()
    }
}

impl Drop for SuspendGuard {
    fn drop(&mut self) {
        let prev = self.shared.suspended.fetch_sub(1, Ordering::SeqCst);
        debug!(depth = prev - 1, "dispatch_resumed");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::*;
    use crate::MockHotkeyOs;

    const W1: WindowHandle = WindowHandle(0x100);
    const W2: WindowHandle = WindowHandle(0x200);

    fn registry() -> (Registry, Arc<MockHotkeyOs>, Arc<SequentialIds>) {
        let os = Arc::new(MockHotkeyOs::new());
        let ids = Arc::new(SequentialIds::new());
        let reg = Registry::with_ids(os.clone(), ids.clone());
        (reg, os, ids)
    }

    #[test]
    fn add_while_unbound_stays_pending() {
        let (reg, os, _) = registry();
        reg.add_or_replace("a", 0x41, Modifiers::CONTROL, None)
            .expect("add");
        assert_eq!(reg.registration_id("a"), None);
        assert_eq!(reg.registered(), 0);
        assert_eq!(reg.pending(), vec!["a".to_string()]);
        assert_eq!(os.register_calls(), 0);
        reg.check_invariants().unwrap();
    }

    #[test]
    fn add_while_bound_registers_immediately() {
        let (reg, os, _) = registry();
        reg.bind_to_window(W1).expect("bind");
        reg.add_or_replace("a", 0x41, Modifiers::CONTROL, None)
            .expect("add");
        let id = reg.registration_id("a").expect("registered");
        assert!(os.is_live(W1, id));
        assert_eq!(reg.name_for_id(id).as_deref(), Some("a"));
        reg.check_invariants().unwrap();
    }

    #[test]
    fn replace_releases_previous_registration() {
        let (reg, os, ids) = registry();
        reg.bind_to_window(W1).expect("bind");
        reg.add_or_replace("x", 0x41, Modifiers::ALT, None)
            .expect("first");
        let first = reg.registration_id("x").expect("id");
        // Same chord: would be refused by the OS if the first were still live.
        reg.add_or_replace("x", 0x41, Modifiers::ALT, None)
            .expect("second");
        let second = reg.registration_id("x").expect("id");
        assert_ne!(first, second);
        assert!(!os.is_live(W1, first));
        assert_eq!(os.live(), 1);
        assert_eq!(ids.live(), 1);
        assert_eq!(reg.name_for_id(first), None);
        reg.check_invariants().unwrap();
    }

    #[test]
    fn remove_missing_is_noop() {
        let (reg, os, _) = registry();
        reg.bind_to_window(W1).expect("bind");
        reg.add_or_replace("a", 0x41, Modifiers::CONTROL, None)
            .expect("add");
        let before = reg.bindings_snapshot();
        reg.remove("missing");
        assert_eq!(reg.bindings_snapshot(), before);
        assert_eq!(os.unregister_calls(), 0);
    }

    #[test]
    fn failed_add_keeps_name_pending_until_rebind() {
        let (reg, os, _) = registry();
        reg.bind_to_window(W1).expect("bind");
        os.refuse(Modifiers::CONTROL, 0x41);
        let err = reg
            .add_or_replace("a", 0x41, Modifiers::CONTROL, None)
            .expect_err("refused");
        assert!(matches!(err, Error::Register { .. }));
        assert!(reg.contains("a"));
        assert_eq!(reg.pending(), vec!["a".to_string()]);
        reg.check_invariants().unwrap();

        os.allow(Modifiers::CONTROL, 0x41);
        reg.unbind();
        reg.bind_to_window(W1).expect("rebind");
        assert!(reg.registration_id("a").is_some());
        assert!(reg.pending().is_empty());
    }

    #[test]
    fn bind_continues_past_failures() {
        let (reg, os, _) = registry();
        for (name, key) in [("a", 0x41), ("b", 0x42), ("c", 0x43)] {
            reg.add_or_replace(name, key, Modifiers::WIN, None)
                .expect("add");
        }
        os.refuse(Modifiers::WIN, 0x42);
        let err = reg.bind_to_window(W1).expect_err("partial");
        match err {
            Error::Bind(failures) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].0, "b");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(reg.window(), Some(W1));
        assert_eq!(reg.registered(), 2);
        assert_eq!(reg.pending(), vec!["b".to_string()]);
        reg.check_invariants().unwrap();
    }

    #[test]
    fn rebind_moves_registrations_to_new_window() {
        let (reg, os, _) = registry();
        reg.add_or_replace("a", 0x41, Modifiers::CONTROL, None)
            .expect("add");
        reg.add_or_replace("b", 0x42, Modifiers::CONTROL, None)
            .expect("add");
        reg.bind_to_window(W1).expect("bind");
        reg.unbind();
        assert!(os.ids_for(W1).is_empty());
        reg.bind_to_window(W2).expect("bind");
        assert_eq!(os.ids_for(W2).len(), 2);
        for name in ["a", "b"] {
            let id = reg.registration_id(name).expect("id");
            assert_eq!(reg.name_for_id(id).as_deref(), Some(name));
        }
        reg.check_invariants().unwrap();
    }

    #[test]
    fn bind_while_bound_does_not_double_register() {
        let (reg, os, ids) = registry();
        reg.add_or_replace("a", 0x41, Modifiers::CONTROL, None)
            .expect("add");
        reg.bind_to_window(W1).expect("bind");
        reg.bind_to_window(W2).expect("bind again");
        assert_eq!(os.live(), 1);
        assert_eq!(os.ids_for(W2).len(), 1);
        assert_eq!(ids.live(), 1);
    }

    #[test]
    fn dispatch_invokes_only_matching_callback() {
        let (reg, _, _) = registry();
        let a_hits = Arc::new(AtomicUsize::new(0));
        let b_hits = Arc::new(AtomicUsize::new(0));
        let a = a_hits.clone();
        reg.add_or_replace_fn("A", 0x41, Modifiers::ALT, move |_| {
            a.fetch_add(1, Ordering::SeqCst);
        })
        .expect("add");
        let b = b_hits.clone();
        reg.add_or_replace_fn("B", 0x42, Modifiers::ALT, move |e| {
            b.fetch_add(1, Ordering::SeqCst);
            e.handled = true;
        })
        .expect("add");
        reg.bind_to_window(W1).expect("bind");

        let id_b = reg.registration_id("B").expect("id");
        let fired = reg.dispatch(WM_HOTKEY, id_b).expect("fired");
        assert_eq!(fired.name, "B");
        assert!(fired.invoked);
        assert!(fired.handled);
        assert_eq!(a_hits.load(Ordering::SeqCst), 0);
        assert_eq!(b_hits.load(Ordering::SeqCst), 1);

        assert_eq!(reg.dispatch(WM_HOTKEY, 99), None);
        assert_eq!(reg.dispatch(0x0100, id_b), None);
        assert_eq!(b_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dispatch_without_callback_reports_unhandled() {
        let (reg, _, _) = registry();
        reg.bind_to_window(W1).expect("bind");
        reg.add_or_replace("quiet", 0x41, Modifiers::SHIFT, None)
            .expect("add");
        let id = reg.registration_id("quiet").expect("id");
        let fired = reg.dispatch(WM_HOTKEY, id).expect("fired");
        assert!(!fired.invoked);
        assert!(!fired.handled);
    }

    #[test]
    fn callback_may_reenter_registry() {
        let (reg, _, _) = registry();
        reg.bind_to_window(W1).expect("bind");
        let inner = reg.clone();
        reg.add_or_replace_fn("once", 0x41, Modifiers::CONTROL, move |e| {
            inner.remove(&e.name);
            inner
                .add_or_replace("added", 0x42, Modifiers::CONTROL, None)
                .expect("add from callback");
            e.handled = true;
        })
        .expect("add");
        let id = reg.registration_id("once").expect("id");
        let fired = reg.dispatch(WM_HOTKEY, id).expect("fired");
        assert!(fired.handled);
        assert!(!reg.contains("once"));
        assert!(reg.registration_id("added").is_some());
        assert_eq!(reg.dispatch(WM_HOTKEY, id), None);
        reg.check_invariants().unwrap();
        reg.dispose();
    }

    #[test]
    fn suspend_blocks_callbacks_until_guard_drops() {
        let (reg, _, _) = registry();
        reg.bind_to_window(W1).expect("bind");
        let hit = Arc::new(AtomicBool::new(false));
        let h = hit.clone();
        reg.add_or_replace_fn("a", 0x41, Modifiers::CONTROL, move |_| {
            h.store(true, Ordering::SeqCst);
        })
        .expect("add");
        let id = reg.registration_id("a").expect("id");
        {
            let _guard = reg.suspend();
            assert!(reg.is_suspended());
            assert_eq!(reg.dispatch(WM_HOTKEY, id), None);
            assert!(!hit.load(Ordering::SeqCst));
        }
        assert!(!reg.is_suspended());
        assert!(reg.dispatch(WM_HOTKEY, id).is_some());
        assert!(hit.load(Ordering::SeqCst));
    }

    #[test]
    fn dispose_is_terminal_and_repeatable() {
        let (reg, os, ids) = registry();
        reg.add_or_replace("a", 0x41, Modifiers::CONTROL, None)
            .expect("add");
        reg.bind_to_window(W1).expect("bind");
        let id = reg.registration_id("a").expect("id");
        reg.dispose();
        reg.dispose();
        assert_eq!(os.live(), 0);
        assert_eq!(ids.live(), 0);
        assert_eq!(reg.registered(), 0);
        reg.remove("a");
        reg.remove("a");
        assert_eq!(reg.dispatch(WM_HOTKEY, id), None);
        reg.check_invariants().unwrap();
    }

    #[test]
    fn dropping_last_clone_releases_registrations() {
        let (reg, os, ids) = registry();
        reg.bind_to_window(W1).expect("bind");
        reg.add_or_replace("a", 0x41, Modifiers::CONTROL, None)
            .expect("add");
        let other = reg.clone();
        drop(reg);
        assert_eq!(os.live(), 1);
        drop(other);
        assert_eq!(os.live(), 0);
        assert_eq!(ids.live(), 0);
    }

    #[test]
    fn remove_clears_indices_when_unregister_fails() {
        let (reg, os, ids) = registry();
        reg.bind_to_window(W1).expect("bind");
        reg.add_or_replace("a", 0x41, Modifiers::CONTROL, None)
            .expect("add");
        let id = reg.registration_id("a").expect("id");
        os.fail_unregister(true);
        reg.remove("a");
        assert!(!reg.contains("a"));
        assert_eq!(reg.name_for_id(id), None);
        assert_eq!(reg.registered(), 0);
        assert_eq!(ids.live(), 0);
        assert_eq!(os.unregister_calls(), 0);
        reg.check_invariants().unwrap();
    }

    #[test]
    fn replace_proceeds_when_unregister_fails() {
        let (reg, os, ids) = registry();
        reg.bind_to_window(W1).expect("bind");
        reg.add_or_replace("x", 0x41, Modifiers::ALT, None)
            .expect("first");
        let first = reg.registration_id("x").expect("id");
        os.fail_unregister(true);
        reg.add_or_replace("x", 0x42, Modifiers::ALT, None)
            .expect("second");
        let second = reg.registration_id("x").expect("id");
        assert_ne!(first, second);
        assert_eq!(reg.name_for_id(first), None);
        assert_eq!(reg.name_for_id(second).as_deref(), Some("x"));
        assert_eq!(ids.live(), 1);
        reg.check_invariants().unwrap();

        os.fail_unregister(false);
        reg.remove("x");
        assert_eq!(ids.live(), 0);
    }

    #[test]
    fn unbind_releases_everything_when_unregister_fails() {
        let (reg, os, ids) = registry();
        reg.add_or_replace("a", 0x41, Modifiers::CONTROL, None)
            .expect("add");
        reg.add_or_replace("b", 0x42, Modifiers::CONTROL, None)
            .expect("add");
        reg.bind_to_window(W1).expect("bind");
        assert_eq!(ids.live(), 2);
        os.fail_unregister(true);
        reg.unbind();
        assert!(!reg.is_bound());
        assert_eq!(reg.registered(), 0);
        assert_eq!(reg.pending(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(ids.live(), 0);
        reg.check_invariants().unwrap();
    }

    #[test]
    fn dispose_releases_everything_when_unregister_fails() {
        let (reg, os, ids) = registry();
        reg.bind_to_window(W1).expect("bind");
        reg.add_or_replace("a", 0x41, Modifiers::CONTROL, None)
            .expect("add");
        let id = reg.registration_id("a").expect("id");
        os.fail_unregister(true);
        reg.dispose();
        reg.dispose();
        assert!(!reg.is_bound());
        assert_eq!(reg.registered(), 0);
        assert_eq!(ids.live(), 0);
        assert_eq!(reg.dispatch(WM_HOTKEY, id), None);
        reg.check_invariants().unwrap();
    }

    #[test]
    fn drop_releases_ids_when_unregister_fails() {
        let (reg, os, ids) = registry();
        reg.bind_to_window(W1).expect("bind");
        reg.add_or_replace("a", 0x41, Modifiers::CONTROL, None)
            .expect("add");
        os.fail_unregister(true);
        drop(reg);
        assert_eq!(ids.live(), 0);
        assert_eq!(os.live(), 1);
    }
}
