use super::ConcurrentVec;
use crate::{
    error::Result,
    utils::{RangeBoundsCheck, check_index},
};
use core::{cmp::Ordering, ops::RangeBounds};

/// Read-mode operations. Each call holds one read acquisition for its whole
/// duration.
impl<T> ConcurrentVec<T> {
    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read(Vec::len)
    }

    /// Whether the container holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read(Vec::is_empty)
    }

    /// Clone of the element at `index`.
    ///
    /// # Errors
    /// [`Error::IndexOutOfBounds`](crate::error::Error::IndexOutOfBounds) if
    /// `index >= len`.
    pub fn get(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        self.read(|items| {
            check_index(index, items.len())?;
            Ok(items[index].clone())
        })
    }

    /// Clone of the first element.
    #[must_use]
    pub fn first(&self) -> Option<T>
    where
        T: Clone,
    {
        self.read(|items| items.first().cloned())
    }

    /// Clone of the last element.
    #[must_use]
    pub fn last(&self) -> Option<T>
    where
        T: Clone,
    {
        self.read(|items| items.last().cloned())
    }

    /// Clones of the elements in `range`.
    ///
    /// # Errors
    /// [`Error::RangeOutOfBounds`](crate::error::Error::RangeOutOfBounds) if the
    /// range is inverted or reaches past the end.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.read(|items| {
            let range = range.checked_range(items.len())?;
            Ok(items[range].to_vec())
        })
    }

    /// Snapshot of all elements.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.read(|items| items.clone())
    }

    /// Run `f` on the elements as a slice.
    ///
    /// Use this to combine several observations into one consistent view.
    pub fn with_slice<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        self.read(|items| f(items.as_slice()))
    }

    /// Clone of the first element matching `predicate`.
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<T>
    where
        T: Clone,
    {
        self.read(|items| items.iter().find(|item| predicate(item)).cloned())
    }

    /// Clone of the last element matching `predicate`.
    pub fn find_last(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<T>
    where
        T: Clone,
    {
        self.read(|items| items.iter().rev().find(|item| predicate(item)).cloned())
    }

    /// Index of the first element matching `predicate`.
    pub fn position(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.read(|items| items.iter().position(predicate))
    }

    /// Index of the last element matching `predicate`.
    pub fn rposition(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.read(|items| items.iter().rposition(predicate))
    }

    /// Whether any element matches `predicate`.
    pub fn any(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        self.read(|items| items.iter().any(predicate))
    }

    /// Whether every element matches `predicate`. `true` when empty.
    pub fn all(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        self.read(|items| items.iter().all(predicate))
    }

    /// Number of elements matching `predicate`.
    pub fn count_where(&self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        self.read(|items| items.iter().filter(|item| predicate(item)).count())
    }

    /// Fold the elements front to back.
    pub fn fold<B>(&self, init: B, f: impl FnMut(B, &T) -> B) -> B {
        self.read(|items| items.iter().fold(init, f))
    }

    /// Call `f` on every element front to back.
    pub fn for_each(&self, f: impl FnMut(&T)) {
        self.read(|items| items.iter().for_each(f));
    }

    /// Collect `f` applied to every element.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Vec<U> {
        self.read(|items| items.iter().map(f).collect())
    }

    /// Clones of the elements matching `predicate`.
    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<T>
    where
        T: Clone,
    {
        self.read(|items| {
            items
                .iter()
                .filter(|item| predicate(item))
                .cloned()
                .collect()
        })
    }

    /// Collect the `Some` results of `f` applied to every element.
    pub fn filter_map<U>(&self, f: impl FnMut(&T) -> Option<U>) -> Vec<U> {
        self.read(|items| items.iter().filter_map(f).collect())
    }

    /// Clone of the minimum element under `compare`; the first one on ties.
    pub fn min_by(&self, mut compare: impl FnMut(&T, &T) -> Ordering) -> Option<T>
    where
        T: Clone,
    {
        self.read(|items| items.iter().min_by(|a, b| compare(a, b)).cloned())
    }

    /// Clone of the maximum element under `compare`; the last one on ties.
    pub fn max_by(&self, mut compare: impl FnMut(&T, &T) -> Ordering) -> Option<T>
    where
        T: Clone,
    {
        self.read(|items| items.iter().max_by(|a, b| compare(a, b)).cloned())
    }

    /// Sorted (stable) copy of the elements. The container is left untouched.
    pub fn sorted_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Vec<T>
    where
        T: Clone,
    {
        let mut sorted = self.to_vec();
        sorted.sort_by(compare);
        sorted
    }

    /// Sorted (stable) copy of the elements, ordered by `key`.
    pub fn sorted_by_key<K: Ord>(&self, key: impl FnMut(&T) -> K) -> Vec<T>
    where
        T: Clone,
    {
        let mut sorted = self.to_vec();
        sorted.sort_by_key(key);
        sorted
    }

    /// Copy of the elements in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.read(|items| items.iter().rev().cloned().collect())
    }
}
