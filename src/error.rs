use thiserror::Error;

/// Recoverable failure of a [`ConcurrentVec`](crate::container::ConcurrentVec)
/// operation.
///
/// Absence ("no such element", "queue empty") is never an error and is
/// reported through `Option` instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// An index did not address an element (or, for insertion, the end).
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Container length at the time of the call.
        len: usize,
    },
    /// A range was inverted or reached past the end.
    #[error("range {start}..{end} is out of bounds for length {len}")]
    RangeOutOfBounds {
        /// Inclusive start of the offending range.
        start: usize,
        /// Exclusive end of the offending range.
        end: usize,
        /// Container length at the time of the call.
        len: usize,
    },
}

/// Result alias for container operations.
pub type Result<T> = core::result::Result<T, Error>;
