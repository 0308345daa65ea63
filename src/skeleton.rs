//! Behaviors derived from the [`Sequence`] primitives alone.
//!
//! Each operation is a free function so it can be reused by types that
//! override part of the contract, and [`SequenceExt`] exposes all of them as
//! methods on every sequence.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::cursor::{Cursor, Iter};
use crate::error::Result;
use crate::sequence::{RandomAccess, Sequence};
use crate::split::SplitCursor;

const HASH_SEED: u64 = 1;
const HASH_MULTIPLIER: u64 = 31;

/// Append `value` at the end. Always returns `true` on success.
pub fn append<S: Sequence + ?Sized>(seq: &mut S, value: S::Item) -> Result<bool> {
    let end = seq.len();
    seq.insert(end, value)?;
    return Ok(true);
}

/// Position of the first element equal to `value`.
pub fn index_of<S>(seq: &S, value: &S::Item) -> Result<Option<usize>>
where
    S: Sequence + ?Sized,
    S::Item: PartialEq,
{
    for (i, item) in Iter::new(seq).enumerate() {
        if item? == *value {
            return Ok(Some(i));
        }
    }
    return Ok(None);
}

/// Position of the last element equal to `value`.
pub fn last_index_of<S>(seq: &S, value: &S::Item) -> Result<Option<usize>>
where
    S: Sequence + ?Sized,
    S::Item: PartialEq,
{
    let len = seq.len();
    for (k, item) in Iter::new(seq).rev().enumerate() {
        if item? == *value {
            return Ok(Some(len - 1 - k));
        }
    }
    return Ok(None);
}

/// Remove every element through [`Sequence::remove_range`].
pub fn clear<S: Sequence + ?Sized>(seq: &mut S) -> Result<()> {
    let len = seq.len();
    return seq.remove_range(0, len);
}

/// Element-wise equality between two sequences of possibly different types.
///
/// Two handles aliasing the same storage are equal without a scan.
pub fn equals<A, B>(a: &A, b: &B) -> Result<bool>
where
    A: Sequence + ?Sized,
    B: Sequence + ?Sized,
    A::Item: PartialEq<B::Item>,
{
    a.check()?;
    b.check()?;
    if let (Some(x), Some(y)) = (a.identity(), b.identity()) {
        if x == y {
            return Ok(true);
        }
    }
    if a.len() != b.len() {
        return Ok(false);
    }
    for (x, y) in Iter::new(a).zip(Iter::new(b)) {
        if x? != y? {
            return Ok(false);
        }
    }
    return Ok(true);
}

/// Hash of a single element.
///
/// `FxHasher` is unseeded, so the value is stable across runs, and `None`
/// hashes to 0.
pub fn element_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    return hasher.finish();
}

/// `h = 31 * h + hash(e)` over the elements in order, starting from 1.
///
/// Equal sequences hash equally regardless of their concrete type.
pub fn hash_code<S>(seq: &S) -> Result<u64>
where
    S: Sequence + ?Sized,
    S::Item: Hash,
{
    let mut hash = HASH_SEED;
    for item in Iter::new(seq) {
        hash = hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(element_hash(&item?));
    }
    return Ok(hash);
}

/// The derived operations as methods, implemented for every [`Sequence`].
pub trait SequenceExt: Sequence {
    fn append(&mut self, value: Self::Item) -> Result<bool> {
        return append(self, value);
    }

    fn index_of(&self, value: &Self::Item) -> Result<Option<usize>>
    where
        Self::Item: PartialEq,
    {
        return index_of(self, value);
    }

    fn last_index_of(&self, value: &Self::Item) -> Result<Option<usize>>
    where
        Self::Item: PartialEq,
    {
        return last_index_of(self, value);
    }

    fn contains(&self, value: &Self::Item) -> Result<bool>
    where
        Self::Item: PartialEq,
    {
        return Ok(index_of(self, value)?.is_some());
    }

    fn clear(&mut self) -> Result<()> {
        return clear(self);
    }

    fn iter(&self) -> Iter<'_, Self> {
        return Iter::new(self);
    }

    fn cursor(&mut self) -> Cursor<'_, Self> {
        return Cursor::front(self);
    }

    fn cursor_at(&mut self, index: usize) -> Result<Cursor<'_, Self>> {
        return Cursor::new(self, index);
    }

    fn equals<O>(&self, other: &O) -> Result<bool>
    where
        O: Sequence + ?Sized,
        Self::Item: PartialEq<O::Item>,
    {
        return equals(self, other);
    }

    fn hash_code(&self) -> Result<u64>
    where
        Self::Item: Hash,
    {
        return hash_code(self);
    }

    fn split_cursor(&self) -> SplitCursor<'_, Self>
    where
        Self: RandomAccess,
    {
        return SplitCursor::new(self);
    }

    fn to_vec(&self) -> Result<Vec<Self::Item>> {
        return Iter::new(self).collect();
    }
}

impl<S: Sequence + ?Sized> SequenceExt for S {}
