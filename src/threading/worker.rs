//! Long-lived worker thread

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use super::Semaphore;

/// A thread bound to one target closure for its whole life.
///
/// The worker parks on a semaphore; each `notify()` runs the target once
/// and parks again. The target and everything it captures are moved into
/// the thread at construction, so nothing on the caller's stack is
/// referenced after `new` returns. `join()` (also run on drop) raises the
/// exit flag, wakes the thread, and joins it.
pub struct Worker {
    exit: Arc<AtomicBool>,
    sema: Arc<Semaphore>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawn the worker with its target load
    pub fn new<F>(mut target: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let exit = Arc::new(AtomicBool::new(false));
        let sema = Arc::new(Semaphore::new());

        let handle = {
            let exit = Arc::clone(&exit);
            let sema = Arc::clone(&sema);
            std::thread::spawn(move || loop {
                sema.wait();
                if exit.load(Ordering::Acquire) {
                    break;
                }
                target();
            })
        };

        Self {
            exit,
            sema,
            handle: Some(handle),
        }
    }

    /// Run the target once
    pub fn notify(&self) {
        self.sema.notify();
    }

    /// Stop the run loop and join the thread
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.exit.store(true, Ordering::Release);
            self.sema.notify();
            // a worker thread only ends via the exit flag, so join
            // failure means the target panicked, which is a caller bug
            handle.join().expect("worker target panicked");
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.join();
    }
}
