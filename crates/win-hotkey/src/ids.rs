//! Registration id allocation.
//!
//! Win32 reserves `0xC000..=0xFFFF` for shared DLLs, so application hotkey
//! ids come from `1..=0xBFFF`. Ids must be unique among all live
//! registrations in the process, across every [`crate::Registry`].

use std::{collections::HashSet, sync::OnceLock};

use parking_lot::Mutex;
use tracing::trace;

use crate::{Error, Result};

/// Smallest id handed out.
pub const MIN_ID: i32 = 1;
/// Largest id handed out.
pub const MAX_ID: i32 = 0xBFFF;

/// Source of registration ids.
///
/// `allocate` must never return an id it issued that has not been released.
pub trait IdAllocator: Send + Sync {
    /// Reserve a fresh id.
    fn allocate(&self) -> Result<i32>;
    /// Return a previously allocated id to the pool.
    fn release(&self, id: i32);
}

/// Allocator state guarded by one lock.
#[derive(Debug)]
struct Cursor {
    /// Next candidate id.
    next: i32,
    /// Ids currently handed out.
    live: HashSet<i32>,
}

/// Monotonically advancing allocator that wraps and skips live ids.
#[derive(Debug)]
pub struct SequentialIds {
    /// Cursor and live set.
    inner: Mutex<Cursor>,
    /// Inclusive upper bound.
    max: i32,
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl SequentialIds {
    /// Create an allocator over the full application id range.
    pub fn new() -> Self {
        Self::with_max(MAX_ID)
    }

    /// Create an allocator over `MIN_ID..=max`.
    pub(crate) fn with_max(max: i32) -> Self {
        Self {
            inner: Mutex::new(Cursor {
                next: MIN_ID,
                live: HashSet::new(),
            }),
            max,
        }
    }

    /// The process-wide allocator shared by registries built with
    /// [`crate::Registry::new`].
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<SequentialIds> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Number of ids currently handed out.
    pub fn live(&self) -> usize {
        self.inner.lock().live.len()
    }
}

impl IdAllocator for SequentialIds {
    fn allocate(&self) -> Result<i32> {
        let mut cur = self.inner.lock();
        let span = (self.max - MIN_ID + 1) as usize;
        if cur.live.len() >= span {
            return Err(Error::IdsExhausted);
        }
        loop {
            let id = cur.next;
            cur.next = if id >= self.max { MIN_ID } else { id + 1 };
            if cur.live.insert(id) {
                trace!(id, "id_allocated");
                return Ok(id);
            }
        }
    }

    fn release(&self, id: i32) {
        if self.inner.lock().live.remove(&id) {
            trace!(id, "id_released");
        }
    }
}

impl<T: IdAllocator + ?Sized> IdAllocator for &'static T {
    fn allocate(&self) -> Result<i32> {
        (**self).allocate()
    }

    fn release(&self, id: i32) {
        (**self).release(id)
    }
}
