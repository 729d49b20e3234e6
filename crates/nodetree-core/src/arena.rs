//! Append-only typed storage for snapshot records.
//!
//! An [`Arena`] owns every record of one kind (nodes, sockets, links) for the
//! lifetime of a tree. Records are never freed individually: the arena is
//! dropped as a whole together with the tree that owns it. Records are
//! addressed by dense typed ids implementing [`ArenaId`], so cross references
//! between records are plain `Copy` indices instead of pointers.
//!
//! [`Span`] describes a contiguous run of ids or pool entries, which is how
//! nodes refer to their sockets and sockets to their link lists.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::marker::PhantomData;
use core::ops::{Index, IndexMut};

/// A dense index type usable as an [`Arena`] key.
pub trait ArenaId: Copy {
    /// Builds the id for the record stored at `index`.
    fn from_index(index: usize) -> Self;

    /// Returns the position of the record this id refers to.
    fn to_index(self) -> usize;
}

/// Append-only store of `T` records addressed by `I`.
///
/// Allocation never fails softly: exceeding `u32::MAX` records or running out
/// of memory aborts the build, consistent with treating allocation failure as
/// fatal.
pub struct Arena<I, T> {
    items: Vec<T>,
    _id: PhantomData<fn() -> I>,
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _id: PhantomData,
        }
    }

    /// Creates an empty arena with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            _id: PhantomData,
        }
    }

    /// Stores `value` and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` records.
    pub fn alloc(&mut self, value: T) -> I {
        let id = self.next_id();
        self.items.push(value);
        id
    }

    /// Returns the id the next [`alloc()`](Self::alloc) will hand out.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX` records.
    pub fn next_id(&self) -> I {
        assert!(
            self.items.len() < u32::MAX as usize,
            "arena capacity exceeded ({} records)",
            self.items.len()
        );
        I::from_index(self.items.len())
    }

    /// Returns the record for `id`, or `None` if it was not allocated here.
    pub fn get(&self, id: I) -> Option<&T> {
        self.items.get(id.to_index())
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no record was allocated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over records in allocation order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterates over `(id, record)` pairs in allocation order.
    pub fn iter_with_ids(&self) -> impl ExactSizeIterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (I::from_index(index), item))
    }

    /// Returns all records as a slice, indexable by [`ArenaId::to_index`].
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        &self.items[id.to_index()]
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.to_index()]
    }
}

impl<I, T: core::fmt::Debug> core::fmt::Debug for Arena<I, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

/// A contiguous run `start..start + len` of ids or pool entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: u32,
    len: u32,
}

impl Span {
    /// The empty span.
    pub const EMPTY: Span = Span { start: 0, len: 0 };

    /// Creates a span covering `start..start + len`.
    #[inline]
    pub const fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// First position covered by the span.
    #[inline]
    pub const fn start(self) -> u32 {
        self.start
    }

    /// Number of positions covered.
    #[inline]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    /// Returns true if the span covers nothing.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Returns the absolute position of the `offset`-th element.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is out of bounds.
    #[inline]
    pub fn at(self, offset: usize) -> u32 {
        assert!(
            offset < self.len as usize,
            "index {offset} out of bounds for span of length {}",
            self.len
        );
        self.start + offset as u32
    }

    /// Positions covered by the span, in order.
    #[inline]
    pub fn positions(self) -> core::ops::Range<u32> {
        self.start..self.start + self.len
    }

    /// The span as a `usize` range, for slicing pools.
    #[inline]
    pub fn range(self) -> core::ops::Range<usize> {
        self.start as usize..(self.start + self.len) as usize
    }
}
