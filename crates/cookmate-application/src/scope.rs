//! Lifetime of a mounted view.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag telling async work whether its view is still mounted.
///
/// Requests are never cancelled. When a response arrives after the view closed,
/// the handler checks the scope and drops the result instead of touching state.
#[derive(Debug, Clone)]
pub struct ViewScope {
    active: Arc<AtomicBool>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Marks the view as unmounted. Idempotent.
    pub fn close(&self) {
        self.active.store(false, Ordering::Release);
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}
