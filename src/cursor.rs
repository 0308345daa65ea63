//! Fail-fast cursors over any [`Sequence`].
//!
//! Both cursor kinds only use the `Sequence` trait, so they behave the same
//! over a root sequence and over a [`View`](crate::View).
//!
//! A cursor sits *between* elements: `next` returns the element at the
//! cursor position and moves right, `previous` moves left and returns the
//! element it stepped over. Before every step the cursor compares the
//! sequence's [`Generation`] with the one it last observed; a mismatch means
//! the sequence was structurally modified through some other path and the
//! step fails with `ConcurrentModification`. Mutations made through the
//! cursor itself re-snapshot the generation and do not trip the check.

use std::iter::FusedIterator;

use tracing::debug;

use crate::error::{check_position, Result, SeqError};
use crate::sequence::{Generation, Sequence};

#[inline]
fn check_generation(expected: Generation, actual: Generation) -> Result<()> {
    if expected != actual {
        debug!(expected = expected.get(), actual = actual.get(), "generation mismatch");
        return Err(SeqError::ConcurrentModification);
    }
    return Ok(());
}

/// Bidirectional cursor that can also mutate the sequence at its position.
pub struct Cursor<'a, S: Sequence + ?Sized> {
    seq: &'a mut S,
    /// Index of the element the next forward step returns.
    cursor: usize,
    /// Index of the element returned by the most recent step.
    last_returned: Option<usize>,
    expected: Generation,
}

impl<'a, S: Sequence + ?Sized> Cursor<'a, S> {
    /// Create a cursor positioned before the element at `index`.
    ///
    /// `index` may equal `len()`, which places the cursor after the last element.
    pub fn new(seq: &'a mut S, index: usize) -> Result<Cursor<'a, S>> {
        seq.check()?;
        check_position(index, seq.len())?;
        let expected = seq.generation();
        return Ok(Cursor { seq, cursor: index, last_returned: None, expected });
    }

    /// Create a cursor before the first element.
    ///
    /// A stale sequence is reported by the first step instead.
    pub fn front(seq: &'a mut S) -> Cursor<'a, S> {
        let expected = seq.generation();
        return Cursor { seq, cursor: 0, last_returned: None, expected };
    }

    #[inline]
    fn check_generation(&self) -> Result<()> {
        self.seq.check()?;
        return check_generation(self.expected, self.seq.generation());
    }

    pub fn has_next(&self) -> bool {
        return self.cursor != self.seq.len();
    }

    pub fn has_previous(&self) -> bool {
        return self.cursor != 0;
    }

    pub fn next_index(&self) -> usize {
        return self.cursor;
    }

    /// Index of the element a backward step would return, `None` at the front.
    pub fn previous_index(&self) -> Option<usize> {
        return self.cursor.checked_sub(1);
    }

    /// Step forward. Running off the end is `Exhausted`, not
    /// `ConcurrentModification`, unless the generation moved.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<S::Item> {
        self.check_generation()?;
        let i = self.cursor;
        match self.seq.get(i) {
            Ok(item) => {
                self.last_returned = Some(i);
                self.cursor = i + 1;
                return Ok(item);
            }
            Err(SeqError::OutOfRange { .. }) => {
                // A short read is only a real end if nothing moved underneath us.
                self.check_generation()?;
                return Err(SeqError::Exhausted);
            }
            Err(err) => return Err(err),
        }
    }

    pub fn previous(&mut self) -> Result<S::Item> {
        self.check_generation()?;
        let Some(i) = self.cursor.checked_sub(1) else {
            return Err(SeqError::Exhausted);
        };
        match self.seq.get(i) {
            Ok(item) => {
                self.cursor = i;
                self.last_returned = Some(i);
                return Ok(item);
            }
            Err(SeqError::OutOfRange { .. }) => {
                self.check_generation()?;
                return Err(SeqError::Exhausted);
            }
            Err(err) => return Err(err),
        }
    }

    /// Remove the element returned by the last step.
    pub fn remove(&mut self) -> Result<S::Item> {
        let last = self.last_returned.ok_or(SeqError::InvalidState)?;
        self.check_generation()?;

        let removed = match self.seq.remove_at(last) {
            Ok(item) => item,
            Err(SeqError::OutOfRange { .. }) => return Err(SeqError::ConcurrentModification),
            Err(err) => return Err(err),
        };
        if last < self.cursor {
            self.cursor -= 1;
        }
        self.last_returned = None;
        self.expected = self.seq.generation();
        return Ok(removed);
    }

    /// Replace the element returned by the last step, returning the old value.
    pub fn set(&mut self, value: S::Item) -> Result<S::Item> {
        let last = self.last_returned.ok_or(SeqError::InvalidState)?;
        self.check_generation()?;

        let previous = match self.seq.set(last, value) {
            Ok(item) => item,
            Err(SeqError::OutOfRange { .. }) => return Err(SeqError::ConcurrentModification),
            Err(err) => return Err(err),
        };
        self.expected = self.seq.generation();
        return Ok(previous);
    }

    /// Insert before the cursor; a following `next` is unaffected.
    pub fn insert(&mut self, value: S::Item) -> Result<()> {
        self.check_generation()?;
        let i = self.cursor;
        match self.seq.insert(i, value) {
            Ok(()) => {}
            Err(SeqError::OutOfRange { .. }) => return Err(SeqError::ConcurrentModification),
            Err(err) => return Err(err),
        }
        self.last_returned = None;
        self.cursor = i + 1;
        self.expected = self.seq.generation();
        return Ok(());
    }
}

/// Read-only, double-ended, fail-fast iterator.
///
/// Yields `Err` at most once and then ends.
pub struct Iter<'a, S: Sequence + ?Sized> {
    seq: &'a S,
    front: usize,
    back: usize,
    expected: Generation,
    /// Raised by `check` at creation, yielded as the first item.
    pending: Option<SeqError>,
    failed: bool,
}

impl<'a, S: Sequence + ?Sized> Iter<'a, S> {
    pub fn new(seq: &'a S) -> Iter<'a, S> {
        return Iter {
            seq,
            front: 0,
            back: seq.len(),
            expected: seq.generation(),
            pending: seq.check().err(),
            failed: false,
        };
    }

    fn read(&mut self, index: usize) -> Result<S::Item> {
        check_generation(self.expected, self.seq.generation())?;
        return match self.seq.get(index) {
            Ok(item) => Ok(item),
            Err(SeqError::OutOfRange { .. }) => Err(SeqError::ConcurrentModification),
            Err(err) => Err(err),
        };
    }

    fn fail(&mut self, err: SeqError) -> Option<Result<S::Item>> {
        self.failed = true;
        return Some(Err(err));
    }
}

impl<'a, S: Sequence + ?Sized> Iterator for Iter<'a, S> {
    type Item = Result<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.take() {
            return self.fail(err);
        }
        if self.failed || self.front >= self.back {
            return None;
        }
        match self.read(self.front) {
            Ok(item) => {
                self.front += 1;
                return Some(Ok(item));
            }
            Err(err) => return self.fail(err),
        }
    }
}

impl<'a, S: Sequence + ?Sized> DoubleEndedIterator for Iter<'a, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.take() {
            return self.fail(err);
        }
        if self.failed || self.front >= self.back {
            return None;
        }
        match self.read(self.back - 1) {
            Ok(item) => {
                self.back -= 1;
                return Some(Ok(item));
            }
            Err(err) => return self.fail(err),
        }
    }
}

impl<'a, S: Sequence + ?Sized> FusedIterator for Iter<'a, S> {}
