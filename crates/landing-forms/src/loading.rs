//! Submit-button loading state and the per-form in-flight flag.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::scope::FormScope;

/// Marks a form as having a request in flight.
#[derive(Debug, Default)]
pub struct InFlight {
    active: AtomicBool,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request is currently in flight.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Claim the form and put its button in the loading state.
    ///
    /// Returns `None` if another request already holds the form.
    pub fn try_begin<'a, S: FormScope>(&'a self, scope: &'a S) -> Option<LoadingGuard<'a, S>> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        scope.set_loading(true);
        Some(LoadingGuard { flag: self, scope })
    }
}

/// Releases the form and clears the loading state when dropped.
///
/// Dropping covers every exit: success, failure, and a cancelled future.
#[must_use = "the form is released as soon as the guard is dropped"]
pub struct LoadingGuard<'a, S: FormScope> {
    flag: &'a InFlight,
    scope: &'a S,
}

impl<S: FormScope> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        self.scope.set_loading(false);
        self.flag.active.store(false, Ordering::Release);
    }
}
