use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::DetectionError;

/// Cooperative cancellation flag for a running detection.
///
/// A token belongs to one generation of a shared counter; it reads as
/// cancelled as soon as the counter moves past that generation. Clones
/// share the counter.
#[derive(Debug, Clone)]
pub struct CancelToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// Creates a token that stays live until [`CancelToken::cancel`] is called.
    #[must_use]
    pub fn new() -> Self {
        Self::for_generation(0, Arc::new(AtomicU64::new(0)))
    }

    pub(crate) fn for_generation(generation: u64, current: Arc<AtomicU64>) -> Self {
        Self {
            generation,
            current,
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancels this token and every clone of it.
    pub fn cancel(&self) {
        self.current.fetch_add(1, Ordering::AcqRel);
    }

    /// Returns `true` once the token has been superseded.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.generation
    }

    /// Fails with [`DetectionError::Cancelled`] if the token is cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`DetectionError::Cancelled`] once superseded.
    pub fn check(&self) -> Result<(), DetectionError> {
        if self.is_cancelled() {
            Err(DetectionError::Cancelled)
        } else {
            Ok(())
        }
    }
}
