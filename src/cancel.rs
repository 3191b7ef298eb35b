//! Cancellation tokens for resolution runs.
//!
//! A token is a cheaply clonable shared flag. Every clone observes the same
//! flag, so a host can hand one clone to a resolution and keep another to
//! signal it. Evaluation checks the token before each candidate it considers,
//! so a signalled token stops the run within one enumeration step.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cancellation token for terminating a resolution early.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a new, unsignalled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals the token. All clones observe the signal.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns true if the token has been signalled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
