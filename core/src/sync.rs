use std::sync::{Condvar, Mutex, PoisonError};

/// A condition-guarded wait queue.
///
/// Waiters block until their predicate holds; wakers flip the shared state
/// first and then call [`WaitQueue::notify_all`]. Because the notification
/// takes the same internal lock the waiter holds while checking its
/// predicate, a wakeup can never be lost, and spurious wakeups only cause
/// a re-check.
pub struct WaitQueue {
    lock: Mutex<()>,
    condvar: Condvar,
}

impl WaitQueue {
    pub const fn new() -> Self {
        Self {
            lock: Mutex::new(()),
            condvar: Condvar::new(),
        }
    }

    /// Block the calling thread until `condition` returns true.
    ///
    /// The condition is evaluated under the queue's internal lock, so it
    /// must not itself block on this queue.
    pub fn wait_until<F: FnMut() -> bool>(&self, mut condition: F) {
        let mut guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        while !condition() {
            guard = self
                .condvar
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Wake every thread currently blocked in [`WaitQueue::wait_until`].
    pub fn notify_all(&self) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.condvar.notify_all();
    }
}

impl Default for WaitQueue {
    fn default() -> Self {
        Self::new()
    }
}
