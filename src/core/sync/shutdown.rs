/*!
 * Shutdown Flag
 *
 * One-way cooperative completion flag. Tasks poll it at their own safe
 * points and wind down; nothing is ever torn down mid-operation.
 */

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct ShutdownFlag {
    requested: AtomicBool,
}

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag
    ///
    /// Returns `true` for the caller that raised it first.
    pub fn request(&self) -> bool {
        !self.requested.swap(true, Ordering::AcqRel)
    }

    #[inline]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}
