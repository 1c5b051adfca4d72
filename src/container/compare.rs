use super::ConcurrentVec;
#[cfg(not(feature = "loom"))]
use crate::sync::LoomUnsafeCellCompat;

/// Operations observing two containers at once.
///
/// Both locks are taken in read mode, always in ascending order of instance
/// address. Two threads comparing `a` with `b` and `b` with `a` therefore
/// acquire in the same order and cannot deadlock, even when read acquisitions
/// are exclusive. Comparing an instance with itself takes its lock once.
impl<T> ConcurrentVec<T> {
    /// Whether both containers hold the same number of elements and `eq`
    /// holds for every pair at the same index.
    pub fn elements_eq_by<U>(
        &self,
        other: &ConcurrentVec<U>,
        mut eq: impl FnMut(&T, &U) -> bool,
    ) -> bool {
        self.read_pair(other, |lhs, rhs| {
            lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(a, b)| eq(a, b))
        })
    }

    /// Whether `self` orders strictly before `other` lexicographically under
    /// the strict weak ordering `less`.
    ///
    /// The first pair where one element is less than the other decides; if
    /// one sequence is a prefix of the other, the shorter one precedes.
    pub fn lexicographically_precedes_by(
        &self,
        other: &ConcurrentVec<T>,
        mut less: impl FnMut(&T, &T) -> bool,
    ) -> bool {
        self.read_pair(other, |lhs, rhs| {
            for (a, b) in lhs.iter().zip(rhs) {
                if less(a, b) {
                    return true;
                }
                if less(b, a) {
                    return false;
                }
            }
            lhs.len() < rhs.len()
        })
    }

    fn read_pair<U, R>(
        &self,
        other: &ConcurrentVec<U>,
        f: impl FnOnce(&Vec<T>, &Vec<U>) -> R,
    ) -> R {
        let (self_key, other_key) = (self.lock_order_key(), other.lock_order_key());
        let _guards = if self_key == other_key {
            (self.lock.read(), None)
        } else if self_key < other_key {
            let first = self.lock.read();
            (first, Some(other.lock.read()))
        } else {
            let first = other.lock.read();
            (first, Some(self.lock.read()))
        };
        self.items.with(|lhs| {
            other.items.with(|rhs| {
                // SAFETY: Both containers are read-locked until `_guards` drops
                // (one lock when they are the same instance), so no writer can
                // alias either vector while these shared borrows live.
                let (lhs, rhs) = unsafe { (&*lhs, &*rhs) };
                f(lhs, rhs)
            })
        })
    }
}
