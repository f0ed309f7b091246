//! Lazy, single-flight classifier initialization
//!
//! A classifier handle is loaded at most once per cell and cached for the
//! cell's lifetime. Concurrent first calls share the one in-flight load
//! instead of racing duplicates: the loading thread releases the lock
//! while it works and waiters park on a condvar. A failed load is
//! terminal until [`ClassifierCell::retry`] is explicitly requested.

use crate::classifier::DigitClassifier;
use crate::error::{RecogError, RecogResult};
use std::sync::{Arc, Condvar, Mutex};

/// Observable lifecycle of a classifier cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierState {
    /// No load attempted yet
    Uninitialized,
    /// A load is in flight
    Loading,
    /// Loaded and cached
    Ready,
    /// The load failed; terminal until an explicit retry
    Failed,
}

enum Slot {
    Uninitialized,
    Loading,
    Ready(Arc<dyn DigitClassifier>),
    Failed(String),
}

/// Holder for a lazily-initialized, shared classifier handle
pub struct ClassifierCell {
    slot: Mutex<Slot>,
    loaded: Condvar,
}

impl ClassifierCell {
    /// Create an empty cell; the first [`get_or_init`](Self::get_or_init)
    /// call runs the loader.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Uninitialized),
            loaded: Condvar::new(),
        }
    }

    /// Create a cell that is already `Ready` with the given classifier.
    pub fn ready(classifier: Arc<dyn DigitClassifier>) -> Self {
        Self {
            slot: Mutex::new(Slot::Ready(classifier)),
            loaded: Condvar::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ClassifierState {
        match &*self.slot.lock().unwrap_or_else(|e| e.into_inner()) {
            Slot::Uninitialized => ClassifierState::Uninitialized,
            Slot::Loading => ClassifierState::Loading,
            Slot::Ready(_) => ClassifierState::Ready,
            Slot::Failed(_) => ClassifierState::Failed,
        }
    }

    /// Reset a failed cell so the next call loads again. Does nothing in
    /// any other state.
    pub fn retry(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if matches!(&*slot, Slot::Failed(_)) {
            *slot = Slot::Uninitialized;
        }
    }

    /// Get the cached classifier, running `load` if this is the first call.
    ///
    /// Exactly one caller runs the loader; concurrent callers block until
    /// it settles and then share its outcome. A cached failure is replayed
    /// as [`RecogError::ClassifierUnavailable`] without re-running the
    /// loader.
    pub fn get_or_init(
        &self,
        load: impl FnOnce() -> RecogResult<Arc<dyn DigitClassifier>>,
    ) -> RecogResult<Arc<dyn DigitClassifier>> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            match &*slot {
                Slot::Ready(classifier) => return Ok(classifier.clone()),
                Slot::Failed(reason) => {
                    return Err(RecogError::ClassifierUnavailable(reason.clone()));
                }
                Slot::Loading => {
                    slot = self
                        .loaded
                        .wait(slot)
                        .unwrap_or_else(|e| e.into_inner());
                }
                Slot::Uninitialized => break,
            }
        }

        *slot = Slot::Loading;
        drop(slot);

        let outcome = load();

        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        let result = match outcome {
            Ok(classifier) => {
                *slot = Slot::Ready(classifier.clone());
                Ok(classifier)
            }
            Err(err) => {
                let reason = match &err {
                    RecogError::ClassifierUnavailable(reason) => reason.clone(),
                    other => other.to_string(),
                };
                *slot = Slot::Failed(reason);
                Err(err)
            }
        };
        self.loaded.notify_all();
        result
    }
}

impl Default for ClassifierCell {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ClassifierCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierCell")
            .field("state", &self.state())
            .finish()
    }
}
