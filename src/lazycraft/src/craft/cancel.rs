//! Cancellation flag shared between the craft loop and a stop-key watcher

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable stop flag. Every clone observes the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    stopped: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. Safe to call from any thread, any number of times.
    pub fn cancel(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Clear a stop left over from a previous run.
    pub fn reset(&self) {
        self.stopped.store(false, Ordering::SeqCst);
    }
}
