use crate::sync::UnsafeCell;
use derive_more::{Deref, DerefMut};
use std::sync::Arc;

/// A minimal `UnsafeCell` wrapper that is `Sync` when `T: Send + Sync`.
///
/// Used by `ConcurrentVec` to hold its elements. Correctness is ensured by the
/// container's lock: shared access only under a read acquisition, exclusive
/// access only under a write acquisition.
#[derive(Debug, Deref, DerefMut)]
#[repr(transparent)]
pub(crate) struct SyncUnsafeCell<T>(UnsafeCell<T>);

unsafe impl<T: Send + Sync> Sync for SyncUnsafeCell<T> {}

impl<T> SyncUnsafeCell<T> {
    pub(crate) fn new(val: T) -> Self {
        Self(UnsafeCell::new(val))
    }
}

/// Scheduling priority of a task. Lower values are meant to run earlier.
pub type Priority = i64;

/// The deferred work carried by a `TaskItem`.
///
/// Reference-counted so that cloning a task (and with it, its dependency tree)
/// shares the action instead of requiring it to be `Clone`. Sharing is why the
/// closure must be `Fn + Sync`: stateful actions keep their state behind a
/// `Mutex` or an atomic.
pub type Action = Arc<dyn Fn() + Send + Sync>;
