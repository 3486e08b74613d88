//! Page-wide submission guard
//!
//! Only one form on a page may be submitting at a time. Every controller on
//! the page holds a clone of the same guard; the permit is released when it is
//! dropped.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Shared single-slot guard for in-flight submissions
#[derive(Debug, Clone)]
pub struct SubmitGuard {
    slot: Arc<Semaphore>,
}

/// Proof that the holder owns the page's submission slot
#[derive(Debug)]
pub struct SubmitPermit {
    _permit: OwnedSemaphorePermit,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// Take the slot if no submission is in flight
    pub fn try_acquire(&self) -> Option<SubmitPermit> {
        Arc::clone(&self.slot)
            .try_acquire_owned()
            .ok()
            .map(|permit| SubmitPermit { _permit: permit })
    }

    pub fn is_busy(&self) -> bool {
        self.slot.available_permits() == 0
    }
}

impl Default for SubmitGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_permit() {
        let guard = SubmitGuard::new();
        let permit = guard.try_acquire();
        assert!(permit.is_some());
        assert!(guard.is_busy());
        assert!(guard.try_acquire().is_none());
    }

    #[test]
    fn test_drop_releases_slot() {
        let guard = SubmitGuard::new();
        let permit = guard.try_acquire();
        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn test_clones_share_the_slot() {
        let page = SubmitGuard::new();
        let other_form = page.clone();
        let _permit = page.try_acquire().unwrap();
        assert!(other_form.is_busy());
        assert!(other_form.try_acquire().is_none());
    }
}
