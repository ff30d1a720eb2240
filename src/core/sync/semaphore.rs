/*!
 * Counting Semaphore
 *
 * Condvar-backed counting signal with an explicit end-of-stream close.
 * `post` never blocks; `wait` blocks until a permit is available or the
 * semaphore is closed with no permits left.
 */

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use thiserror::Error;

/// Result type for wait operations
pub type WaitResult<T> = Result<T, WaitError>;

/// Wait operation errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitError {
    #[error("Signal closed with no pending posts")]
    Closed,

    #[error("Wait was cancelled")]
    Cancelled,
}

#[derive(Debug, Default)]
struct State {
    permits: usize,
    closed: bool,
    posted: u64,
}

/// Counting semaphore
///
/// The mutex release in `post` and acquire in `wait` give the
/// happens-before edge between the poster's prior writes and the waiter.
#[derive(Debug, Default)]
pub struct Semaphore {
    state: Mutex<State>,
    condvar: Condvar,
}

impl Semaphore {
    /// Create a semaphore holding `permits` initial permits
    pub fn new(permits: usize) -> Self {
        Self {
            state: Mutex::new(State {
                permits,
                ..State::default()
            }),
            condvar: Condvar::new(),
        }
    }

    /// Add one permit and wake one waiter
    ///
    /// Posting after `close` is rejected: the stream is already over.
    pub fn post(&self) -> WaitResult<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(WaitError::Closed);
        }
        state.permits += 1;
        state.posted += 1;
        drop(state);

        self.condvar.notify_one();
        Ok(())
    }

    /// Block until a permit is available, then take it
    ///
    /// Pending permits are still handed out after `close`; only a closed
    /// semaphore with zero permits reports `Closed`.
    pub fn wait(&self) -> WaitResult<()> {
        let mut state = self.state.lock();
        loop {
            if state.permits > 0 {
                state.permits -= 1;
                return Ok(());
            }
            if state.closed {
                return Err(WaitError::Closed);
            }
            self.condvar.wait(&mut state);
        }
    }

    /// Mark end of stream and wake every waiter
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        drop(state);

        self.condvar.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Total successful posts since creation
    pub fn posted(&self) -> u64 {
        self.state.lock().posted
    }

    /// Async-compatible wait using tokio::spawn_blocking
    ///
    /// Keeps the blocking condvar wait off the async worker threads.
    pub async fn wait_async(self: &Arc<Self>) -> WaitResult<()> {
        let semaphore = Arc::clone(self);
        tokio::task::spawn_blocking(move || semaphore.wait())
            .await
            .map_err(|_| WaitError::Cancelled)?
    }
}
