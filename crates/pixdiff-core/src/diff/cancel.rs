use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{PixdiffError, Result};

/// Cooperative cancellation token for in-flight diff computations.
///
/// The host creates one token per request and cancels it when a newer
/// request supersedes it; the computation checks the token between stages
/// so a stale result is never surfaced.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Fail with [`PixdiffError::Cancelled`] if the token has been cancelled.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(PixdiffError::Cancelled)
        } else {
            Ok(())
        }
    }
}
