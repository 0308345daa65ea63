//! Seqview - a list skeleton with fail-fast cursors, nested views and split
//! cursors.
//!
//! A concrete container implements [`Sequence`] (`get` and `len`, plus any
//! mutating primitives it supports) and gets, for free:
//!
//! - forward and bidirectional cursors that detect structural interference,
//! - search, bulk insertion, range removal, equality and hashing,
//! - zero-copy views over a live root, nestable to any depth,
//! - a split cursor for divide-and-conquer traversal.
//!
//! # Quick Start
//!
//! ```
//! use seqview::{Generation, Sequence, SequenceExt, Shared, SeqError, Capabilities};
//!
//! struct Numbers {
//!     items: Vec<u32>,
//!     generation: Generation,
//! }
//!
//! impl Sequence for Numbers {
//!     type Item = u32;
//!
//!     fn get(&self, index: usize) -> Result<u32, SeqError> {
//!         self.items.get(index).copied().ok_or(SeqError::OutOfRange { index, len: self.items.len() })
//!     }
//!
//!     fn len(&self) -> usize {
//!         self.items.len()
//!     }
//!
//!     fn generation(&self) -> Generation {
//!         self.generation
//!     }
//!
//!     fn capabilities(&self) -> Capabilities {
//!         Capabilities::INSERT
//!     }
//!
//!     fn insert(&mut self, index: usize, value: u32) -> Result<(), SeqError> {
//!         if index > self.items.len() {
//!             return Err(SeqError::OutOfRange { index, len: self.items.len() });
//!         }
//!         self.items.insert(index, value);
//!         self.generation.bump();
//!         Ok(())
//!     }
//! }
//!
//! let mut root = Shared::new(Numbers { items: vec![1, 2, 3, 4], generation: Generation::new() });
//! let mut middle = root.view(1, 3).unwrap();
//! middle.insert(1, 10).unwrap();
//! assert_eq!(root.to_vec().unwrap(), vec![1, 2, 10, 3, 4]);
//!
//! // Mutating the root directly makes the view stale.
//! root.append(5).unwrap();
//! assert_eq!(middle.get(0), Err(SeqError::ConcurrentModification));
//! ```

pub mod cursor;
pub mod error;
pub mod sequence;
pub mod skeleton;
pub mod split;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use cursor::{Cursor, Iter};
pub use error::{Operation, Result, SeqError};
pub use sequence::{Capabilities, Generation, RandomAccess, Sequence};
pub use skeleton::SequenceExt;
pub use split::{Characteristics, SplitCursor};
pub use view::{Shared, View};
