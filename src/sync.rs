#[cfg(feature = "loom")]
mod imp {
    pub(crate) use loom::{
        cell::UnsafeCell,
        sync::{Condvar, Mutex},
    };
}

#[cfg(not(feature = "loom"))]
mod imp {
    pub(crate) use core::cell::UnsafeCell;
    pub(crate) use std::sync::{Condvar, Mutex};

    /// Gives `core::cell::UnsafeCell` the closure-based access API of
    /// `loom::cell::UnsafeCell`, so call sites compile unchanged under both.
    pub(crate) trait LoomUnsafeCellCompat<T> {
        fn with<R>(&self, f: impl FnOnce(*const T) -> R) -> R;
        fn with_mut<R>(&self, f: impl FnOnce(*mut T) -> R) -> R;
    }

    impl<T> LoomUnsafeCellCompat<T> for UnsafeCell<T> {
        #[inline]
        fn with<R>(&self, f: impl FnOnce(*const T) -> R) -> R {
            f(self.get())
        }

        #[inline]
        fn with_mut<R>(&self, f: impl FnOnce(*mut T) -> R) -> R {
            f(self.get())
        }
    }
}

pub(crate) use imp::*;
