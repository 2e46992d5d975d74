//! One-shot binary semaphore

use std::sync::{Condvar, Mutex};

/// Binary notifier for parking a single worker thread.
///
/// `wait()` blocks until the ready flag is set, then consumes it;
/// `notify()` sets the flag and wakes the waiter. Notifications issued
/// while the flag is already set collapse into one. Exactly one thread
/// waits on a given semaphore at a time.
#[derive(Default)]
pub struct Semaphore {
    ready: Mutex<bool>,
    cv: Condvar,
}

impl Semaphore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wake the waiter, or let the next `wait()` return immediately
    pub fn notify(&self) {
        let mut ready = self.ready.lock().unwrap();
        *ready = true;
        drop(ready);
        self.cv.notify_one();
    }

    /// Block until notified, consuming the notification
    pub fn wait(&self) {
        let mut ready = self.ready.lock().unwrap();
        while !*ready {
            ready = self.cv.wait(ready).unwrap();
        }
        *ready = false;
    }
}
