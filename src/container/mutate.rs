use super::ConcurrentVec;
use crate::{
    error::{Error, Result},
    utils::{RangeBoundsCheck, check_index, check_insert_index},
};
use core::{cmp::Ordering, ops::RangeBounds};

/// Write-mode operations. Each call holds one write acquisition for its whole
/// duration.
impl<T> ConcurrentVec<T> {
    /// Append `value` at the end.
    pub fn push(&self, value: T) {
        self.write(|items| items.push(value));
    }

    /// Append every element of `iter` at the end, in order.
    ///
    /// The iterator is drained before the lock is taken.
    pub fn extend(&self, iter: impl IntoIterator<Item = T>) {
        let mut new_items = iter.into_iter().collect::<Vec<_>>();
        self.write(|items| items.append(&mut new_items));
    }

    /// Insert `value` at `index`, shifting later elements back.
    ///
    /// # Errors
    /// [`Error::IndexOutOfBounds`] if `index > len`.
    pub fn insert(&self, index: usize, value: T) -> Result<()> {
        self.write(|items| {
            check_insert_index(index, items.len())?;
            items.insert(index, value);
            Ok(())
        })
    }

    /// Insert every element of `iter` starting at `index`, preserving their
    /// order.
    ///
    /// # Errors
    /// [`Error::IndexOutOfBounds`] if `index > len`.
    pub fn insert_all(&self, index: usize, iter: impl IntoIterator<Item = T>) -> Result<()> {
        let new_items = iter.into_iter().collect::<Vec<_>>();
        self.write(|items| {
            check_insert_index(index, items.len())?;
            items.splice(index..index, new_items);
            Ok(())
        })
    }

    /// Insert `new_items` immediately before the first element matching
    /// `predicate`, or at the end if none matches.
    ///
    /// The search and the insertion share one write acquisition, so the
    /// position cannot go stale in between. Returns the index of the first
    /// inserted element.
    pub fn insert_all_before_first(
        &self,
        new_items: impl IntoIterator<Item = T>,
        predicate: impl FnMut(&T) -> bool,
    ) -> usize {
        let new_items = new_items.into_iter().collect::<Vec<_>>();
        self.write(|items| {
            let index = items.iter().position(predicate).unwrap_or(items.len());
            items.splice(index..index, new_items);
            index
        })
    }

    /// Insert `new_items` immediately after the last element matching
    /// `predicate`, or at the end if none matches.
    ///
    /// Like [`ConcurrentVec::insert_all_before_first`], search and insertion
    /// share one write acquisition. Returns the index of the first inserted
    /// element.
    pub fn insert_all_after_last(
        &self,
        new_items: impl IntoIterator<Item = T>,
        predicate: impl FnMut(&T) -> bool,
    ) -> usize {
        let new_items = new_items.into_iter().collect::<Vec<_>>();
        self.write(|items| {
            let index = items
                .iter()
                .rposition(predicate)
                .map_or(items.len(), |found| found + 1);
            items.splice(index..index, new_items);
            index
        })
    }

    /// Replace the element at `index`, returning the previous one.
    ///
    /// # Errors
    /// [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn set(&self, index: usize, value: T) -> Result<T> {
        self.write(|items| {
            check_index(index, items.len())?;
            Ok(core::mem::replace(&mut items[index], value))
        })
    }

    /// Replace the elements in `range` with those of `replace_with`, returning
    /// the removed ones. The lengths need not match.
    ///
    /// # Errors
    /// [`Error::RangeOutOfBounds`] if the range is inverted or reaches past the
    /// end.
    pub fn replace_range(
        &self,
        range: impl RangeBounds<usize>,
        replace_with: impl IntoIterator<Item = T>,
    ) -> Result<Vec<T>> {
        let replace_with = replace_with.into_iter().collect::<Vec<_>>();
        self.write(|items| {
            let range = range.checked_range(items.len())?;
            Ok(items.splice(range, replace_with).collect())
        })
    }

    /// Swap the elements at `a` and `b`.
    ///
    /// # Errors
    /// [`Error::IndexOutOfBounds`] if either index is `>= len`.
    pub fn swap(&self, a: usize, b: usize) -> Result<()> {
        self.write(|items| {
            check_index(a, items.len())?;
            check_index(b, items.len())?;
            items.swap(a, b);
            Ok(())
        })
    }

    /// Remove and return the element at `index`, shifting later elements
    /// forward.
    ///
    /// # Errors
    /// [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn remove(&self, index: usize) -> Result<T> {
        self.write(|items| {
            check_index(index, items.len())?;
            Ok(items.remove(index))
        })
    }

    /// Remove and return the elements in `range`.
    ///
    /// # Errors
    /// [`Error::RangeOutOfBounds`] if the range is inverted or reaches past the
    /// end.
    pub fn remove_range(&self, range: impl RangeBounds<usize>) -> Result<Vec<T>> {
        self.write(|items| {
            let range = range.checked_range(items.len())?;
            Ok(items.drain(range).collect())
        })
    }

    /// Remove every element matching `predicate`, returning how many were
    /// removed. Survivors keep their relative order.
    pub fn remove_where(&self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        self.write(|items| {
            let before = items.len();
            items.retain(|item| !predicate(item));
            before - items.len()
        })
    }

    /// Remove and return the first element, or `None` when empty.
    pub fn pop_first(&self) -> Option<T> {
        self.write(|items| (!items.is_empty()).then(|| items.remove(0)))
    }

    /// Remove and return the last element, or `None` when empty.
    pub fn pop_last(&self) -> Option<T> {
        self.write(Vec::pop)
    }

    /// Remove and return the first element.
    ///
    /// # Errors
    /// [`Error::IndexOutOfBounds`] when empty.
    pub fn remove_first(&self) -> Result<T> {
        self.pop_first()
            .ok_or(Error::IndexOutOfBounds { index: 0, len: 0 })
    }

    /// Remove and return the last element.
    ///
    /// # Errors
    /// [`Error::IndexOutOfBounds`] when empty.
    pub fn remove_last(&self) -> Result<T> {
        self.pop_last()
            .ok_or(Error::IndexOutOfBounds { index: 0, len: 0 })
    }

    /// Remove and return the first `count` elements.
    ///
    /// # Errors
    /// [`Error::RangeOutOfBounds`] if fewer than `count` elements are present;
    /// nothing is removed in that case.
    pub fn remove_first_n(&self, count: usize) -> Result<Vec<T>> {
        self.remove_range(..count)
    }

    /// Remove the longest prefix whose elements all match `predicate`,
    /// returning how many were removed.
    pub fn trim_prefix_while(&self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        self.write(|items| {
            let count = items
                .iter()
                .position(|item| !predicate(item))
                .unwrap_or(items.len());
            items.drain(..count);
            count
        })
    }

    /// Remove every element, keeping the allocated capacity.
    pub fn clear(&self) {
        self.write(Vec::clear);
    }

    /// Reserve room for at least `additional` more elements.
    pub fn reserve(&self, additional: usize) {
        self.write(|items| items.reserve(additional));
    }

    /// Release unused capacity.
    pub fn shrink_to_fit(&self) {
        self.write(Vec::shrink_to_fit);
    }

    /// Sort in place (stable).
    pub fn sort_by(&self, compare: impl FnMut(&T, &T) -> Ordering) {
        self.write(|items| items.sort_by(compare));
    }

    /// Sort in place (stable) by `key`.
    pub fn sort_by_key<K: Ord>(&self, key: impl FnMut(&T) -> K) {
        self.write(|items| items.sort_by_key(key));
    }

    /// Reverse the order of the elements in place.
    pub fn reverse(&self) {
        self.write(|items| items.reverse());
    }

    /// Run `f` on the underlying vector under one write acquisition.
    ///
    /// Use this for read-modify-write sequences that must not interleave with
    /// other threads.
    pub fn with_vec_mut<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        self.write(f)
    }
}
