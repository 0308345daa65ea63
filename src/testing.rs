//! Minimal concrete sequences for unit tests.

use crate::error::{check_index, check_position, check_range, Result};
use crate::sequence::{Capabilities, Generation, RandomAccess, Sequence};

/// Vec-backed sequence implementing every primitive.
#[derive(Debug, Clone, Default)]
pub struct ArraySeq<T> {
    items: Vec<T>,
    generation: Generation,
}

impl<T: Clone> ArraySeq<T> {
    pub fn new() -> ArraySeq<T> {
        return ArraySeq { items: Vec::new(), generation: Generation::new() };
    }

    pub fn to_vec(&self) -> Vec<T> {
        return self.items.clone();
    }
}

impl<T> From<Vec<T>> for ArraySeq<T> {
    fn from(items: Vec<T>) -> ArraySeq<T> {
        return ArraySeq { items, generation: Generation::new() };
    }
}

impl<T: Clone> Sequence for ArraySeq<T> {
    type Item = T;

    fn get(&self, index: usize) -> Result<T> {
        check_index(index, self.items.len())?;
        return Ok(self.items[index].clone());
    }

    fn len(&self) -> usize {
        return self.items.len();
    }

    fn generation(&self) -> Generation {
        return self.generation;
    }

    fn capabilities(&self) -> Capabilities {
        return Capabilities::ALL;
    }

    fn set(&mut self, index: usize, value: T) -> Result<T> {
        check_index(index, self.items.len())?;
        return Ok(std::mem::replace(&mut self.items[index], value));
    }

    fn insert(&mut self, index: usize, value: T) -> Result<()> {
        check_position(index, self.items.len())?;
        self.items.insert(index, value);
        self.generation.bump();
        return Ok(());
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        check_index(index, self.items.len())?;
        let removed = self.items.remove(index);
        self.generation.bump();
        return Ok(removed);
    }
}

impl<T: Clone> RandomAccess for ArraySeq<T> {}

/// Sequence that only implements the required primitives.
#[derive(Debug, Clone)]
pub struct ReadOnly<T> {
    items: Vec<T>,
}

impl<T> ReadOnly<T> {
    pub fn new(items: Vec<T>) -> ReadOnly<T> {
        return ReadOnly { items };
    }
}

impl<T: Clone> Sequence for ReadOnly<T> {
    type Item = T;

    fn get(&self, index: usize) -> Result<T> {
        check_index(index, self.items.len())?;
        return Ok(self.items[index].clone());
    }

    fn len(&self) -> usize {
        return self.items.len();
    }
}

/// Sequence with a cheap bulk removal, counting how often it is used.
#[derive(Debug, Clone, Default)]
pub struct BulkSeq {
    pub items: Vec<u32>,
    pub generation: Generation,
    pub bulk_removals: usize,
}

impl Sequence for BulkSeq {
    type Item = u32;

    fn get(&self, index: usize) -> Result<u32> {
        check_index(index, self.items.len())?;
        return Ok(self.items[index]);
    }

    fn len(&self) -> usize {
        return self.items.len();
    }

    fn generation(&self) -> Generation {
        return self.generation;
    }

    fn capabilities(&self) -> Capabilities {
        return Capabilities::INSERT | Capabilities::REMOVE;
    }

    fn insert(&mut self, index: usize, value: u32) -> Result<()> {
        check_position(index, self.items.len())?;
        self.items.insert(index, value);
        self.generation.bump();
        return Ok(());
    }

    fn remove_at(&mut self, index: usize) -> Result<u32> {
        check_index(index, self.items.len())?;
        self.generation.bump();
        return Ok(self.items.remove(index));
    }

    fn remove_range(&mut self, from: usize, to: usize) -> Result<()> {
        check_range(from, to, self.items.len())?;
        self.items.drain(from..to);
        self.generation.bump();
        self.bulk_removals += 1;
        return Ok(());
    }
}
