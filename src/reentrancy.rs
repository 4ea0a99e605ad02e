//! Debug-only reentrancy guard for container searches.
//!
//! Searches call user code (`ComparableTo::compare`). A `compare` that
//! searches the same container again would run against slots that the outer
//! operation is about to change. Debug builds record which operation holds
//! the guard and panic on nested entry, naming both operations. Release
//! builds compile the guard away.

use core::marker::PhantomData;

#[cfg(debug_assertions)]
use core::cell::Cell;

/// Per-container tracker. Search paths hold
/// `let _g = self.reentrancy.enter("get");` while user code may run.
#[derive(Debug)]
pub struct DebugReentrancy {
    #[cfg(debug_assertions)]
    held_by: Cell<Option<&'static str>>,
    // Containers are single-threaded: keep them !Send + !Sync.
    _nosend: PhantomData<*mut ()>,
}

impl DebugReentrancy {
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            held_by: Cell::new(None),
            _nosend: PhantomData,
        }
    }

    /// Mark `operation` as running user code until the guard drops.
    ///
    /// # Panics
    /// In debug builds, if another operation already holds the guard.
    #[inline]
    pub fn enter(&self, operation: &'static str) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(outer) = self.held_by.replace(Some(operation)) {
                panic!(
                    "reentrancy detected: `{}` called on a container while its `{}` was comparing",
                    operation, outer
                );
            }
            return ReentrancyGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = operation;
            return ReentrancyGuard { _z: PhantomData };
        }
    }

    /// Operation currently holding the guard. Always `None` in release
    /// builds.
    pub fn holder(&self) -> Option<&'static str> {
        #[cfg(debug_assertions)]
        {
            return self.held_by.get();
        }

        #[cfg(not(debug_assertions))]
        {
            return None;
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the guard on drop, unwinding included.
pub struct ReentrancyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.held_by.set(None);
    }
}
