mod compare;
mod mutate;
mod observe;

#[cfg(not(feature = "loom"))]
use crate::sync::LoomUnsafeCellCompat;
use crate::{config::ReadMode, lock::RwLock, types::SyncUnsafeCell};
use core::fmt;

/// Ordered, index-addressable sequence shared across threads behind one
/// [`RwLock`].
///
/// Every observation (`len`, `get`, searches, folds, ...) holds the lock in
/// read mode for the duration of the call; every structural or in-place
/// mutation holds it in write mode. The lock is released on every exit path,
/// including unwinding out of a user-supplied closure.
///
/// Operations that need to find a position and then mutate at it
/// ([`ConcurrentVec::insert_all_before_first`],
/// [`ConcurrentVec::insert_all_after_last`],
/// [`ConcurrentVec::with_vec_mut`]) do both under a single write acquisition.
///
/// # Index invalidation
///
/// Indices are plain zero-based positions. Any insertion or removal at or
/// before a position shifts what that index refers to, and other threads may
/// perform such mutations between two calls. An index obtained from one call
/// is therefore only a hint for the next one; combine the lookup and the
/// mutation in one call when the position must stay accurate.
///
/// User closures run while the lock is held. Calling back into the same
/// container from inside a closure deadlocks on write paths (and on read
/// paths under [`ReadMode::Exclusive`]).
pub struct ConcurrentVec<T> {
    items: SyncUnsafeCell<Vec<T>>,
    lock: RwLock,
}

impl<T> ConcurrentVec<T> {
    /// Create an empty container with a [`ReadMode::Shared`] lock.
    #[must_use]
    pub fn new() -> Self {
        Self::from_vec(Vec::new(), ReadMode::Shared)
    }

    /// Create an empty container whose lock uses `read_mode`.
    #[must_use]
    pub fn with_read_mode(read_mode: ReadMode) -> Self {
        Self::from_vec(Vec::new(), read_mode)
    }

    /// Create an empty container with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity), ReadMode::Shared)
    }

    /// Create a container holding `count` clones of `value`.
    #[must_use]
    pub fn from_elem(value: T, count: usize) -> Self
    where
        T: Clone,
    {
        Self::from(vec![value; count])
    }

    /// Wrap an existing vector, guarding it with a lock that uses `read_mode`.
    #[must_use]
    pub fn from_vec(items: Vec<T>, read_mode: ReadMode) -> Self {
        Self {
            items: SyncUnsafeCell::new(items),
            lock: RwLock::with_read_mode(read_mode),
        }
    }

    /// Read mode of the lock guarding this container.
    #[must_use]
    pub fn read_mode(&self) -> ReadMode {
        self.lock.read_mode()
    }

    /// Take the elements out, consuming the container.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.items.with_mut(|ptr| {
            // SAFETY: `self` is owned, so no other thread can hold the lock.
            let items = unsafe { &mut *ptr };
            core::mem::take(items)
        })
    }

    /// Run `f` on the elements under a read acquisition.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&Vec<T>) -> R) -> R {
        let _guard = self.lock.read();
        // SAFETY: The read acquisition excludes writers until `_guard` drops,
        // so no `&mut` to the vector exists while this shared borrow lives.
        self.items.with(|ptr| f(unsafe { &*ptr }))
    }

    /// Run `f` on the elements under a write acquisition.
    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let _guard = self.lock.write();
        // SAFETY: The write acquisition excludes every other reader and writer
        // until `_guard` drops, so this is the only borrow of the vector.
        self.items.with_mut(|ptr| f(unsafe { &mut *ptr }))
    }

    /// Address used to order lock acquisitions across instances.
    fn lock_order_key(&self) -> usize {
        core::ptr::from_ref(self).addr()
    }
}

impl<T> Default for ConcurrentVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for ConcurrentVec<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items, ReadMode::Shared)
    }
}

impl<T> FromIterator<T> for ConcurrentVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: Clone> Clone for ConcurrentVec<T> {
    /// Snapshot the elements into a new container with its own lock of the
    /// same read mode.
    fn clone(&self) -> Self {
        Self::from_vec(self.to_vec(), self.read_mode())
    }
}

impl<T: fmt::Debug> fmt::Debug for ConcurrentVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read(|items| f.debug_list().entries(items.iter()).finish())
    }
}
