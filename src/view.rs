//! Zero-copy views over a live root sequence.
//!
//! A root sequence is shared through a [`Shared`] handle. [`Shared::view`]
//! and [`View::view`] produce windows `[offset, offset + size)` expressed in
//! root coordinates, so a view of a view never goes through its parent to
//! reach an element: offsets compose additively at construction time.
//!
//! Each view carries the chain of frames from the outermost view down to
//! itself. A frame holds the absolute offset, the cached size and the root
//! generation last observed by that view. Structural mutation *through* a
//! view walks the chain, adjusting every size by the same delta and
//! re-snapshotting every generation, so the view and all its ancestors stay
//! valid. Mutation through any other path (the root handle, a sibling view)
//! is not propagated: the next access to this view sees a generation
//! mismatch and fails with `ConcurrentModification`.
//!
//! Views hold a weak reference to the root. Once every [`Shared`] handle is
//! dropped, every access to a remaining view fails with `Detached`.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::error::{check_index, check_position, check_range, Operation, Result, SeqError};
use crate::sequence::{Capabilities, Generation, RandomAccess, Sequence};

/// Frames stored inline before the chain spills to the heap.
const INLINE_DEPTH: usize = 4;

/// One link of a view chain.
#[derive(Debug)]
struct Frame {
    /// Absolute position of local index 0 within the root.
    offset: usize,
    size: Cell<usize>,
    generation: Cell<Generation>,
}

fn read<S>(root: &RefCell<S>) -> Result<Ref<'_, S>> {
    return root.try_borrow().map_err(|_| SeqError::ConcurrentModification);
}

fn write<S>(root: &RefCell<S>) -> Result<RefMut<'_, S>> {
    return root.try_borrow_mut().map_err(|_| SeqError::ConcurrentModification);
}

/// Shared handle to a root sequence.
///
/// Cloning the handle aliases the same root. Every handle and every view may
/// mutate it; the generation counter tells the others.
pub struct Shared<S> {
    root: Rc<RefCell<S>>,
}

impl<S> Clone for Shared<S> {
    fn clone(&self) -> Shared<S> {
        return Shared { root: Rc::clone(&self.root) };
    }
}

impl<S: Sequence> Shared<S> {
    pub fn new(seq: S) -> Shared<S> {
        return Shared { root: Rc::new(RefCell::new(seq)) };
    }

    /// Borrow the root directly.
    pub fn borrow(&self) -> Result<Ref<'_, S>> {
        return read(&self.root);
    }

    /// Mutably borrow the root directly, bypassing every view.
    pub fn borrow_mut(&self) -> Result<RefMut<'_, S>> {
        return write(&self.root);
    }

    /// Whether both handles alias the same root.
    pub fn ptr_eq(&self, other: &Shared<S>) -> bool {
        return Rc::ptr_eq(&self.root, &other.root);
    }

    /// Recover the root if this is the last handle.
    pub fn try_unwrap(self) -> std::result::Result<S, Shared<S>> {
        return match Rc::try_unwrap(self.root) {
            Ok(cell) => Ok(cell.into_inner()),
            Err(root) => Err(Shared { root }),
        };
    }

    /// A view over `[from, to)` of the root.
    pub fn view(&self, from: usize, to: usize) -> Result<View<S>> {
        let root = read(&self.root)?;
        check_range(from, to, root.len())?;
        let generation = root.generation();
        trace!(offset = from, size = to - from, "view over root");
        return Ok(View {
            root: Rc::downgrade(&self.root),
            frame: Rc::new(Frame {
                offset: from,
                size: Cell::new(to - from),
                generation: Cell::new(generation),
            }),
            ancestors: SmallVec::new(),
        });
    }
}

impl<S: Sequence> Sequence for Shared<S> {
    type Item = S::Item;

    fn get(&self, index: usize) -> Result<S::Item> {
        return read(&self.root)?.get(index);
    }

    /// While the root is mutably borrowed elsewhere, `len`, `generation` and
    /// `capabilities` fall back to 0, the initial generation and read-only.
    /// [`Sequence::check`] reports the conflict, and every cursor calls it.
    fn len(&self) -> usize {
        return self.root.try_borrow().map_or(0, |root| root.len());
    }

    fn generation(&self) -> Generation {
        return self.root.try_borrow().map_or(Generation::new(), |root| root.generation());
    }

    fn capabilities(&self) -> Capabilities {
        return self.root.try_borrow().map_or(Capabilities::READ_ONLY, |root| root.capabilities());
    }

    fn check(&self) -> Result<()> {
        return read(&self.root)?.check();
    }

    fn identity(&self) -> Option<*const ()> {
        return Some(Rc::as_ptr(&self.root) as *const ());
    }

    fn set(&mut self, index: usize, value: S::Item) -> Result<S::Item> {
        return write(&self.root)?.set(index, value);
    }

    fn insert(&mut self, index: usize, value: S::Item) -> Result<()> {
        return write(&self.root)?.insert(index, value);
    }

    fn remove_at(&mut self, index: usize) -> Result<S::Item> {
        return write(&self.root)?.remove_at(index);
    }

    fn insert_all<I>(&mut self, index: usize, values: I) -> Result<bool>
    where
        I: IntoIterator<Item = S::Item>,
    {
        // Drain the source first: it may read from this same root.
        let values: Vec<S::Item> = values.into_iter().collect();
        return write(&self.root)?.insert_all(index, values);
    }

    fn remove_range(&mut self, from: usize, to: usize) -> Result<()> {
        return write(&self.root)?.remove_range(from, to);
    }
}

impl<S: RandomAccess> RandomAccess for Shared<S> {}

impl<S: fmt::Debug> fmt::Debug for Shared<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self.root.try_borrow() {
            Ok(root) => f.debug_tuple("Shared").field(&*root).finish(),
            Err(_) => f.write_str("Shared(<borrowed>)"),
        };
    }
}

/// A window over a contiguous range of a root sequence.
pub struct View<S> {
    root: Weak<RefCell<S>>,
    frame: Rc<Frame>,
    /// Enclosing views, outermost first.
    ancestors: SmallVec<[Rc<Frame>; INLINE_DEPTH]>,
}

impl<S: Sequence> View<S> {
    fn root(&self) -> Result<Rc<RefCell<S>>> {
        return self.root.upgrade().ok_or_else(|| {
            debug!(offset = self.frame.offset, "view used after its root was dropped");
            SeqError::Detached
        });
    }

    /// The root, provided it has not changed since this view last saw it.
    fn checked_root(&self) -> Result<Rc<RefCell<S>>> {
        let root = self.root()?;
        let actual = read(&root)?.generation();
        let expected = self.frame.generation.get();
        if actual != expected {
            debug!(
                expected = expected.get(),
                actual = actual.get(),
                offset = self.frame.offset,
                "view is stale"
            );
            return Err(SeqError::ConcurrentModification);
        }
        return Ok(root);
    }

    /// Apply a size change made through this view to the whole chain.
    fn resize_chain(&self, grown: usize, shrunk: usize, generation: Generation) {
        for frame in self.ancestors.iter().chain(std::iter::once(&self.frame)) {
            frame.size.set(frame.size.get() + grown - shrunk);
            frame.generation.set(generation);
        }
        trace!(
            grown,
            shrunk,
            depth = self.depth(),
            generation = generation.get(),
            "propagated size change"
        );
    }

    /// Absolute position of this view's first element within the root.
    pub fn offset(&self) -> usize {
        return self.frame.offset;
    }

    /// Number of views in the chain, this one included.
    pub fn depth(&self) -> usize {
        return self.ancestors.len() + 1;
    }

    /// Current length, failing if the root changed behind this view.
    pub fn size(&self) -> Result<usize> {
        self.checked_root()?;
        return Ok(self.frame.size.get());
    }

    /// A view over `[from, to)` of this view.
    pub fn view(&self, from: usize, to: usize) -> Result<View<S>> {
        let root = self.checked_root()?;
        check_range(from, to, self.frame.size.get())?;
        let generation = read(&root)?.generation();

        let mut ancestors = self.ancestors.clone();
        ancestors.push(Rc::clone(&self.frame));
        let offset = self.frame.offset + from;
        trace!(offset, size = to - from, depth = ancestors.len() + 1, "nested view");
        return Ok(View {
            root: self.root.clone(),
            frame: Rc::new(Frame {
                offset,
                size: Cell::new(to - from),
                generation: Cell::new(generation),
            }),
            ancestors,
        });
    }
}

impl<S: Sequence> Sequence for View<S> {
    type Item = S::Item;

    fn get(&self, index: usize) -> Result<S::Item> {
        let root = self.checked_root()?;
        check_index(index, self.frame.size.get())?;
        return read(&root)?.get(self.frame.offset + index);
    }

    /// The cached size, without a staleness check. See [`View::size`].
    fn len(&self) -> usize {
        return self.frame.size.get();
    }

    fn generation(&self) -> Generation {
        return match self.root.upgrade() {
            Some(root) => root.try_borrow().map_or(self.frame.generation.get(), |r| r.generation()),
            None => self.frame.generation.get(),
        };
    }

    fn capabilities(&self) -> Capabilities {
        return match self.root.upgrade() {
            Some(root) => root.try_borrow().map_or(Capabilities::READ_ONLY, |r| r.capabilities()),
            None => Capabilities::READ_ONLY,
        };
    }

    fn check(&self) -> Result<()> {
        self.checked_root()?;
        return Ok(());
    }

    fn set(&mut self, index: usize, value: S::Item) -> Result<S::Item> {
        let root = self.checked_root()?;
        check_index(index, self.frame.size.get())?;
        return write(&root)?.set(self.frame.offset + index, value);
    }

    fn insert(&mut self, index: usize, value: S::Item) -> Result<()> {
        let root = self.checked_root()?;
        check_position(index, self.frame.size.get())?;
        let generation = {
            let mut root = write(&root)?;
            root.insert(self.frame.offset + index, value)?;
            root.generation()
        };
        self.resize_chain(1, 0, generation);
        return Ok(());
    }

    fn remove_at(&mut self, index: usize) -> Result<S::Item> {
        let root = self.checked_root()?;
        check_index(index, self.frame.size.get())?;
        let (removed, generation) = {
            let mut root = write(&root)?;
            let removed = root.remove_at(self.frame.offset + index)?;
            (removed, root.generation())
        };
        self.resize_chain(0, 1, generation);
        return Ok(removed);
    }

    fn insert_all<I>(&mut self, index: usize, values: I) -> Result<bool>
    where
        I: IntoIterator<Item = S::Item>,
    {
        let root = self.checked_root()?;
        if !read(&root)?.capabilities().contains(Capabilities::INSERT) {
            return Err(SeqError::Unsupported(Operation::Insert));
        }
        check_position(index, self.frame.size.get())?;

        let values: Vec<S::Item> = values.into_iter().collect();
        let count = values.len();
        if count == 0 {
            return Ok(false);
        }
        let generation = {
            let mut root = write(&root)?;
            root.insert_all(self.frame.offset + index, values)?;
            root.generation()
        };
        self.resize_chain(count, 0, generation);
        return Ok(true);
    }

    fn remove_range(&mut self, from: usize, to: usize) -> Result<()> {
        let root = self.checked_root()?;
        check_range(from, to, self.frame.size.get())?;
        let offset = self.frame.offset;
        let generation = {
            let mut root = write(&root)?;
            root.remove_range(offset + from, offset + to)?;
            root.generation()
        };
        self.resize_chain(0, to - from, generation);
        return Ok(());
    }
}

impl<S: RandomAccess> RandomAccess for View<S> {}

impl<S> fmt::Debug for View<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_struct("View")
            .field("offset", &self.frame.offset)
            .field("size", &self.frame.size.get())
            .field("depth", &(self.ancestors.len() + 1))
            .field("attached", &(self.root.strong_count() > 0))
            .finish();
    }
}
