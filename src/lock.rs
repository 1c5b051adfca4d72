use crate::{
    config::ReadMode,
    sync::{Condvar, Mutex},
};
use derive_more::Debug;
use tracing::warn;

/// Reader/writer lock that owns no data and only serializes access to it.
///
/// Acquisition and release are explicit calls reporting success as `bool`,
/// so the lock can sit next to the data it protects instead of wrapping it.
/// [`RwLock::read`] and [`RwLock::write`] pair an acquisition with a
/// [`LockGuard`] that releases on drop, including during unwinding.
///
/// Guarantees:
/// - at most one writer holds the lock at a time;
/// - a writer and a reader never hold it simultaneously;
/// - under [`ReadMode::Shared`] any number of readers may hold it together.
///
/// There is no writer preference: a steady stream of readers can delay a
/// waiting writer. Blocked acquisitions wait indefinitely.
#[derive(Debug)]
pub struct RwLock {
    read_mode: ReadMode,
    #[debug(skip)]
    state: Mutex<LockState>,
    #[debug(skip)]
    released: Condvar,
}

#[derive(Default)]
struct LockState {
    /// Number of readers currently holding the lock.
    readers: usize,
    /// Whether a writer currently holds the lock.
    writer: bool,
}

impl Default for RwLock {
    fn default() -> Self {
        Self::new()
    }
}

impl RwLock {
    /// Create an unlocked lock with [`ReadMode::Shared`].
    pub fn new() -> Self {
        Self::with_read_mode(ReadMode::Shared)
    }

    /// Create an unlocked lock with the given read mode.
    pub fn with_read_mode(read_mode: ReadMode) -> Self {
        Self {
            read_mode,
            state: Mutex::new(LockState::default()),
            released: Condvar::new(),
        }
    }

    /// How this lock serves read acquisitions.
    #[must_use]
    pub fn read_mode(&self) -> ReadMode {
        self.read_mode
    }

    /// Block until the lock is held for reading.
    ///
    /// Under [`ReadMode::Exclusive`] this is [`RwLock::acquire_write`].
    /// Returns `false` if the underlying primitive failed.
    pub fn acquire_read(&self) -> bool {
        if self.read_mode == ReadMode::Exclusive {
            return self.acquire_write();
        }
        let Ok(mut state) = self.state.lock() else {
            return false;
        };
        while state.writer {
            state = match self.released.wait(state) {
                Ok(state) => state,
                Err(_) => return false,
            };
        }
        state.readers += 1;
        true
    }

    /// Block until the lock is held for writing.
    ///
    /// Returns `false` if the underlying primitive failed.
    pub fn acquire_write(&self) -> bool {
        let Ok(mut state) = self.state.lock() else {
            return false;
        };
        while state.writer || state.readers != 0 {
            state = match self.released.wait(state) {
                Ok(state) => state,
                Err(_) => return false,
            };
        }
        state.writer = true;
        true
    }

    /// Release one hold on the lock: the writer if there is one, otherwise one
    /// reader.
    ///
    /// Returns `false` if the lock was not held or the underlying primitive
    /// failed.
    pub fn release(&self) -> bool {
        let Ok(mut state) = self.state.lock() else {
            return false;
        };
        if state.writer {
            state.writer = false;
        } else if state.readers != 0 {
            state.readers -= 1;
            if state.readers != 0 {
                return true;
            }
        } else {
            return false;
        }
        drop(state);
        self.released.notify_all();
        true
    }

    /// Acquire for reading and return a guard releasing on drop.
    ///
    /// # Panics
    /// If the underlying primitive failed to acquire.
    pub fn read(&self) -> LockGuard<'_> {
        assert!(self.acquire_read(), "RwLock::read: acquisition failed");
        LockGuard { lock: self }
    }

    /// Acquire for writing and return a guard releasing on drop.
    ///
    /// # Panics
    /// If the underlying primitive failed to acquire.
    pub fn write(&self) -> LockGuard<'_> {
        assert!(self.acquire_write(), "RwLock::write: acquisition failed");
        LockGuard { lock: self }
    }
}

/// Releases its [`RwLock`] hold when dropped.
#[must_use = "the lock is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct LockGuard<'a> {
    lock: &'a RwLock,
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        if !self.lock.release() {
            warn!(lock = ?self.lock, "failed to release rwlock");
        }
    }
}

#[cfg(all(test, not(feature = "loom")))]
mod tests {
    use super::*;
    use std::{
        sync::{
            Arc,
            atomic::{AtomicBool, AtomicUsize, Ordering},
        },
        thread,
        time::Duration,
    };

    #[test]
    fn release_without_hold_reports_failure() {
        let lock = RwLock::new();
        assert!(!lock.release());
        assert!(lock.acquire_write());
        assert!(lock.release());
        assert!(!lock.release());
    }

    #[test]
    fn shared_readers_stack() {
        let lock = RwLock::new();
        assert!(lock.acquire_read());
        assert!(lock.acquire_read());
        assert!(lock.release());
        assert!(lock.release());
        assert!(!lock.release());
    }

    #[test]
    fn writer_waits_for_reader() {
        let lock = Arc::new(RwLock::new());
        let written = Arc::new(AtomicBool::new(false));
        let reader = lock.read();

        let handle = {
            let lock = Arc::clone(&lock);
            let written = Arc::clone(&written);
            thread::spawn(move || {
                let _guard = lock.write();
                written.store(true, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(50));
        assert!(!written.load(Ordering::SeqCst));
        drop(reader);
        handle.join().unwrap();
        assert!(written.load(Ordering::SeqCst));
    }

    #[test]
    fn exclusive_read_mode_serializes_readers() {
        let lock = Arc::new(RwLock::with_read_mode(ReadMode::Exclusive));
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lock = Arc::clone(&lock);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let _guard = lock.read();
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_inside.fetch_max(now, Ordering::SeqCst);
                        thread::yield_now();
                        inside.fetch_sub(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn guard_releases_on_panic() {
        let lock = Arc::new(RwLock::new());
        let result = {
            let lock = Arc::clone(&lock);
            thread::spawn(move || {
                let _guard = lock.write();
                panic!("boom");
            })
            .join()
        };
        assert!(result.is_err());
        assert!(lock.acquire_write());
        assert!(lock.release());
    }
}
