use crate::error::{Error, Result};
use core::ops::{Bound, Range, RangeBounds};

pub(crate) trait RangeBoundsCheck {
    /// Resolve the bounds against `len`, rejecting inverted ranges and ranges
    /// that reach past the end.
    fn checked_range(&self, len: usize) -> Result<Range<usize>>;
}

impl<R: RangeBounds<usize>> RangeBoundsCheck for R {
    #[inline]
    fn checked_range(&self, len: usize) -> Result<Range<usize>> {
        let start = match self.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match self.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        };
        if start > end || end > len {
            return Err(Error::RangeOutOfBounds { start, end, len });
        }
        Ok(start..end)
    }
}

#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfBounds { index, len })
    }
}

/// Like [`check_index`], but also accepts `len` (the insertion point past the
/// last element).
#[inline]
pub(crate) fn check_insert_index(index: usize, len: usize) -> Result<()> {
    if index <= len {
        Ok(())
    } else {
        Err(Error::IndexOutOfBounds { index, len })
    }
}
