use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Mutual-exclusion flag for move-applying operations
///
/// A human move and an AI move must never overlap, and neither may run while
/// another is still in flight. [`ProcessingGuard::try_acquire`] hands out at
/// most one [`ProcessingToken`] at a time; the flag is cleared when that token
/// is dropped, so every exit path (early return, `?`, panic unwinding)
/// releases it.
#[derive(Debug, Default, Clone)]
pub struct ProcessingGuard {
    busy: Arc<AtomicBool>,
}

/// Proof that the holder is the only operation applying a move
#[derive(Debug)]
#[must_use = "the guard is released as soon as the token is dropped"]
pub struct ProcessingToken {
    busy: Arc<AtomicBool>,
}

impl ProcessingGuard {
    pub fn try_acquire(&self) -> Option<ProcessingToken> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ProcessingToken {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for ProcessingToken {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
