//! The capability contract a concrete sequence type implements.
//!
//! Only [`Sequence::get`] and [`Sequence::len`] are required. Every mutating
//! primitive is optional and defaults to [`SeqError::Unsupported`]; a type
//! that overrides one advertises it through [`Sequence::capabilities`] so
//! bulk operations can refuse up front instead of failing half way through.
//!
//! Structural mutations (insert, remove) must bump the [`Generation`] the
//! sequence reports. Cursors and views compare it against the value they
//! last observed and fail fast on mismatch.

use std::ops::BitOr;

use crate::cursor::Cursor;
use crate::error::{check_index, check_position, check_range, Operation, Result, SeqError};

/// Structural modification counter.
///
/// Bumped exactly once per insertion or removal, never on replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub const fn new() -> Generation {
        return Generation(0);
    }

    #[inline]
    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    #[inline]
    pub fn get(self) -> u64 {
        return self.0;
    }
}

/// The set of optional primitives a sequence implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const READ_ONLY: Capabilities = Capabilities(0);
    pub const SET: Capabilities = Capabilities(1 << 0);
    pub const INSERT: Capabilities = Capabilities(1 << 1);
    /// Covers both `remove_at` and `remove_range`.
    pub const REMOVE: Capabilities = Capabilities(1 << 2);
    pub const ALL: Capabilities = Capabilities(0b111);

    #[inline]
    pub const fn union(self, other: Capabilities) -> Capabilities {
        return Capabilities(self.0 | other.0);
    }

    #[inline]
    pub const fn contains(self, other: Capabilities) -> bool {
        return self.0 & other.0 == other.0;
    }
}

impl BitOr for Capabilities {
    type Output = Capabilities;

    fn bitor(self, rhs: Capabilities) -> Capabilities {
        return self.union(rhs);
    }
}

/// An ordered, index-addressable container.
pub trait Sequence {
    type Item;

    /// The element at `index`, or `OutOfRange` if `index >= len()`.
    fn get(&self, index: usize) -> Result<Self::Item>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        return self.len() == 0;
    }

    /// The current structural generation. Sequences that never report
    /// structural changes keep the default and are never detected as stale.
    fn generation(&self) -> Generation {
        return Generation::new();
    }

    fn capabilities(&self) -> Capabilities {
        return Capabilities::READ_ONLY;
    }

    /// Fail if this sequence cannot currently be read consistently.
    ///
    /// Iterators, cursors and `equals` call this before answering, so a
    /// sequence that can go stale without ever reaching `get` (an empty
    /// view, say) still reports it.
    fn check(&self) -> Result<()> {
        return Ok(());
    }

    /// Address of the underlying storage, when two handles can alias it.
    fn identity(&self) -> Option<*const ()> {
        return None;
    }

    /// Replace the element at `index`, returning the previous one.
    fn set(&mut self, index: usize, value: Self::Item) -> Result<Self::Item> {
        let _ = (index, value);
        return Err(SeqError::Unsupported(Operation::Set));
    }

    /// Insert `value` at `index`, shifting later elements right.
    fn insert(&mut self, index: usize, value: Self::Item) -> Result<()> {
        let _ = (index, value);
        return Err(SeqError::Unsupported(Operation::Insert));
    }

    /// Remove and return the element at `index`, shifting later elements left.
    fn remove_at(&mut self, index: usize) -> Result<Self::Item> {
        let _ = index;
        return Err(SeqError::Unsupported(Operation::RemoveAt));
    }

    /// Insert every value at successive positions starting at `index`.
    ///
    /// Returns whether anything was inserted. Refuses with `Unsupported`
    /// before inserting anything if the sequence lacks `insert`.
    fn insert_all<I>(&mut self, index: usize, values: I) -> Result<bool>
    where
        I: IntoIterator<Item = Self::Item>,
        Self: Sized,
    {
        if !self.capabilities().contains(Capabilities::INSERT) {
            return Err(SeqError::Unsupported(Operation::Insert));
        }
        check_position(index, self.len())?;

        let mut index = index;
        let mut modified = false;
        for value in values {
            self.insert(index, value)?;
            index += 1;
            modified = true;
        }
        return Ok(modified);
    }

    /// Remove the elements in `[from, to)`.
    ///
    /// The default walks a cursor to `from` and removes one element at a
    /// time, which is quadratic when `remove_at` is linear. Types with a
    /// cheaper bulk removal should override this, not `clear`.
    fn remove_range(&mut self, from: usize, to: usize) -> Result<()> {
        if !self.capabilities().contains(Capabilities::REMOVE) {
            return Err(SeqError::Unsupported(Operation::RemoveRange));
        }
        check_range(from, to, self.len())?;

        let mut cursor = Cursor::new(self, from)?;
        for _ in from..to {
            cursor.next()?;
            cursor.remove()?;
        }
        return Ok(());
    }
}

/// Marker for sequences with O(1) (or near) indexed access.
///
/// Split cursors are only offered over these; over a linear-access sequence
/// splitting and traversal degrade to quadratic.
pub trait RandomAccess: Sequence {}

impl<T: Clone> Sequence for [T] {
    type Item = T;

    fn get(&self, index: usize) -> Result<T> {
        check_index(index, <[T]>::len(self))?;
        return Ok(self[index].clone());
    }

    fn len(&self) -> usize {
        return <[T]>::len(self);
    }

    fn capabilities(&self) -> Capabilities {
        return Capabilities::SET;
    }

    fn set(&mut self, index: usize, value: T) -> Result<T> {
        check_index(index, <[T]>::len(self))?;
        return Ok(std::mem::replace(&mut self[index], value));
    }
}

impl<T: Clone> RandomAccess for [T] {}
