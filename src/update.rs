//! "State changed" signal between sessions and the presentation poller.

use std::sync::atomic::{AtomicBool, Ordering};

/// Dirty flag set by every mutation and cleared by the single poller.
///
/// A burst of events between two polls collapses into one refresh.
#[derive(Debug, Default)]
pub struct PendingUpdate {
    dirty: AtomicBool,
}

impl PendingUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn set_pending(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Returns whether an update was pending, clearing the flag.
    #[inline]
    pub fn take(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    pub fn is_pending(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }
}
