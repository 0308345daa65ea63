//! Split cursor for divide-and-conquer traversal of a [`RandomAccess`] sequence.
//!
//! A `SplitCursor` covers the half-open range `[index, fence)`. The fence is
//! unknown until first use, at which point it is fixed to the sequence's
//! length and the generation is snapshotted. A cursor created before the
//! sequence is fully built therefore reflects the length at first *use*.
//!
//! Splitting hands the lower half of the remaining range to a new cursor and
//! keeps the upper half, so both can be consumed independently (e.g. on
//! scoped threads when the sequence is `Sync`).

use std::ops::BitOr;

use tracing::debug;

use crate::error::{Result, SeqError};
use crate::sequence::{Generation, RandomAccess};

/// Traversal properties a split cursor reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Characteristics(u8);

impl Characteristics {
    /// Elements are visited in index order.
    pub const ORDERED: Characteristics = Characteristics(1 << 0);
    /// `estimate_size` is exact.
    pub const SIZED: Characteristics = Characteristics(1 << 1);
    /// Every cursor produced by splitting is also `SIZED`.
    pub const SUBSIZED: Characteristics = Characteristics(1 << 2);

    #[inline]
    pub const fn contains(self, other: Characteristics) -> bool {
        return self.0 & other.0 == other.0;
    }
}

impl BitOr for Characteristics {
    type Output = Characteristics;

    fn bitor(self, rhs: Characteristics) -> Characteristics {
        return Characteristics(self.0 | rhs.0);
    }
}

pub struct SplitCursor<'a, S: RandomAccess + ?Sized> {
    seq: &'a S,
    /// Next index to visit.
    index: usize,
    /// One past the last index, fixed on first use.
    fence: Option<usize>,
    expected: Generation,
    /// Raised by `check` when the fence was fixed.
    stale: Option<SeqError>,
}

impl<'a, S: RandomAccess + ?Sized> SplitCursor<'a, S> {
    pub fn new(seq: &'a S) -> SplitCursor<'a, S> {
        return SplitCursor {
            seq,
            index: 0,
            fence: None,
            expected: seq.generation(),
            stale: None,
        };
    }

    fn fence(&mut self) -> usize {
        if let Some(fence) = self.fence {
            return fence;
        }
        if let Err(err) = self.seq.check() {
            self.stale = Some(err);
            self.fence = Some(self.index);
            return self.index;
        }
        self.expected = self.seq.generation();
        let fence = self.seq.len();
        self.fence = Some(fence);
        return fence;
    }

    fn check_generation(&self) -> Result<()> {
        self.seq.check()?;
        let actual = self.seq.generation();
        if actual != self.expected {
            debug!(expected = self.expected.get(), actual = actual.get(), "split cursor saw a structural change");
            return Err(SeqError::ConcurrentModification);
        }
        return Ok(());
    }

    fn read(&self, index: usize) -> Result<S::Item> {
        return match self.seq.get(index) {
            Ok(item) => Ok(item),
            Err(SeqError::OutOfRange { .. }) => Err(SeqError::ConcurrentModification),
            Err(err) => Err(err),
        };
    }

    /// Split off the lower half of the remaining range.
    ///
    /// Returns `None` once fewer than two elements remain.
    pub fn try_split(&mut self) -> Option<SplitCursor<'a, S>> {
        let hi = self.fence();
        let lo = self.index;
        let mid = lo + (hi - lo) / 2;
        if lo >= mid {
            return None;
        }
        self.index = mid;
        return Some(SplitCursor {
            seq: self.seq,
            index: lo,
            fence: Some(mid),
            expected: self.expected,
            stale: None,
        });
    }

    /// Visit the next element, if any. Returns whether one was visited.
    pub fn try_advance<F>(&mut self, mut visit: F) -> Result<bool>
    where
        F: FnMut(S::Item),
    {
        let hi = self.fence();
        if let Some(err) = self.stale.clone() {
            return Err(err);
        }
        let i = self.index;
        if i >= hi {
            return Ok(false);
        }
        self.index = i + 1;
        visit(self.read(i)?);
        self.check_generation()?;
        return Ok(true);
    }

    /// Visit every remaining element, checking the generation once at the end.
    pub fn for_each_remaining<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(S::Item),
    {
        let hi = self.fence();
        if let Some(err) = self.stale.clone() {
            return Err(err);
        }
        let lo = self.index;
        self.index = hi;
        for i in lo..hi {
            visit(self.read(i)?);
        }
        return self.check_generation();
    }

    /// Exact number of elements not yet visited.
    pub fn estimate_size(&mut self) -> usize {
        let hi = self.fence();
        return hi.saturating_sub(self.index);
    }

    pub fn characteristics(&self) -> Characteristics {
        return Characteristics::ORDERED | Characteristics::SIZED | Characteristics::SUBSIZED;
    }
}
