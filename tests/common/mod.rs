//! Concrete sequences used by the integration tests.

#![allow(dead_code)]

use std::collections::LinkedList;

use seqview::{Capabilities, Generation, RandomAccess, SeqError, Sequence};

fn out_of_range(index: usize, len: usize) -> SeqError {
    return SeqError::OutOfRange { index, len };
}

/// Growable array with every primitive.
#[derive(Debug, Clone, Default)]
pub struct ArrayList<T> {
    items: Vec<T>,
    generation: Generation,
}

impl<T: Clone> ArrayList<T> {
    pub fn new() -> ArrayList<T> {
        return ArrayList { items: Vec::new(), generation: Generation::new() };
    }

    pub fn items(&self) -> &[T] {
        return &self.items;
    }
}

impl<T> From<Vec<T>> for ArrayList<T> {
    fn from(items: Vec<T>) -> ArrayList<T> {
        return ArrayList { items, generation: Generation::new() };
    }
}

impl<T: Clone> Sequence for ArrayList<T> {
    type Item = T;

    fn get(&self, index: usize) -> Result<T, SeqError> {
        return self.items.get(index).cloned().ok_or(out_of_range(index, self.items.len()));
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

    fn set(&mut self, index: usize, value: T) -> Result<T, SeqError> {
        let len = self.items.len();
        let slot = self.items.get_mut(index).ok_or(out_of_range(index, len))?;
        return Ok(std::mem::replace(slot, value));
    }

    fn insert(&mut self, index: usize, value: T) -> Result<(), SeqError> {
        if index > self.items.len() {
            return Err(out_of_range(index, self.items.len()));
        }
        self.items.insert(index, value);
        self.generation.bump();
        return Ok(());
    }

    fn remove_at(&mut self, index: usize) -> Result<T, SeqError> {
        if index >= self.items.len() {
            return Err(out_of_range(index, self.items.len()));
        }
        self.generation.bump();
        return Ok(self.items.remove(index));
    }

    fn remove_range(&mut self, from: usize, to: usize) -> Result<(), SeqError> {
        if to > self.items.len() {
            return Err(out_of_range(to, self.items.len()));
        }
        if from > to {
            return Err(SeqError::IllegalArgument { from, to });
        }
        self.items.drain(from..to);
        self.generation.bump();
        return Ok(());
    }
}

impl<T: Clone> RandomAccess for ArrayList<T> {}

/// Doubly linked list: linear indexed access, not `RandomAccess`.
#[derive(Debug, Clone, Default)]
pub struct LinkedSeq<T> {
    items: LinkedList<T>,
    generation: Generation,
}

impl<T: Clone> LinkedSeq<T> {
    pub fn from_vec(items: Vec<T>) -> LinkedSeq<T> {
        return LinkedSeq { items: items.into_iter().collect(), generation: Generation::new() };
    }
}

impl<T: Clone> Sequence for LinkedSeq<T> {
    type Item = T;

    fn get(&self, index: usize) -> Result<T, SeqError> {
        return self.items.iter().nth(index).cloned().ok_or(out_of_range(index, self.items.len()));
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

    fn insert(&mut self, index: usize, value: T) -> Result<(), SeqError> {
        if index > self.items.len() {
            return Err(out_of_range(index, self.items.len()));
        }
        let mut tail = self.items.split_off(index);
        self.items.push_back(value);
        self.items.append(&mut tail);
        self.generation.bump();
        return Ok(());
    }

    fn remove_at(&mut self, index: usize) -> Result<T, SeqError> {
        if index >= self.items.len() {
            return Err(out_of_range(index, self.items.len()));
        }
        let mut tail = self.items.split_off(index);
        let removed = tail.pop_front().ok_or(out_of_range(index, index))?;
        self.items.append(&mut tail);
        self.generation.bump();
        return Ok(removed);
    }
}
