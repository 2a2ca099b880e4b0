//! An always-ordered skiplist of unique elements.

use std::{
    cmp::Ordering,
    fmt, iter,
    sync::atomic::{self, AtomicUsize},
};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    comparator::{Comparator, Natural},
    level_generator::{Geometric, GeometricError, LevelGenerator},
    skipnode::{Arena, HEAD, SkipNode},
};

/// The greatest number of levels a skiplist may be configured with.
pub const MAX_LEVELS: usize = 32;

/// The number of levels used by [`SkipList::default`].
pub const DEFAULT_LEVELS: usize = 16;

/// The promotion probability used by [`SkipList::default`].
pub const DEFAULT_P: f64 = 0.5;

/// Source of the process-unique list identifiers carried by node handles.
static NEXT_LIST_ID: AtomicUsize = AtomicUsize::new(1);

// ////////////////////////////////////////////////////////////////////////////
// Errors
// ////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
/// Errors that can occur when creating a [`SkipList`].
#[non_exhaustive]
pub enum SkipListError {
    /// The number of levels must be in `[2, 32]`.
    #[error("max_level must be in [2, 32], got {0}.")]
    InvalidMaxLevel(usize),
    /// The level generator could not be created.
    #[error(transparent)]
    Generator(#[from] GeometricError),
}

// ////////////////////////////////////////////////////////////////////////////
// NodeHandle
// ////////////////////////////////////////////////////////////////////////////

/// A reference to a node of a particular [`SkipList`].
///
/// Handles are plain values: they do not borrow the list, and they remain
/// valid until the node they refer to is removed. Passing a handle to a list
/// other than the one which created it, or passing a handle to a removed node,
/// panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    list: usize,
    index: usize,
    generation: u32,
}

// ////////////////////////////////////////////////////////////////////////////
// SkipList
// ////////////////////////////////////////////////////////////////////////////

/// The skiplist stores its elements in the order given by its comparator and
/// provides expected `O(log(n))` search, insertion and removal.
///
/// Conceptually, a skiplist resembles something like:
///
/// ```text
/// <head> ----------> [2] --------------------------------------------------> [9] ---------->
/// <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
/// <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
/// <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
/// ```
///
/// where each node `[x]` has links to nodes further down the list, allowing
/// the search to effectively skip ahead. The bottom chain is doubly linked so
/// the list can be walked in both directions.
///
/// Elements are unique under the comparator: inserting an element which
/// compares equal to one already present leaves the list unchanged and drops
/// the new element.
///
/// Each list owns its level generator and therefore its random stream. With a
/// seeded generator, the shape of the list is fully determined by the sequence
/// of operations applied to it.
pub struct SkipList<T, C = Natural, G = Geometric> {
    id: usize,
    nodes: Arena<T>,
    tail: Option<usize>,
    len: usize,
    compare: C,
    level_generator: G,
}

/// The result of a search: the rightmost node visited at each level, and
/// whether the search stopped on an element equal to the one sought.
struct Path {
    /// `nodes[0]` is where the bottom chain search stopped (the last node
    /// comparing less than or equal to the target). `nodes[i + 1]` is the last
    /// node comparing less than the target on skip level `i`.
    nodes: [usize; MAX_LEVELS],
    exact: bool,
}

// ///////////////////////////////////////////////
// Constructors
// ///////////////////////////////////////////////

impl<T> SkipList<T>
where
    T: Ord,
{
    /// Create a new skiplist ordered by `T`'s natural ordering, with
    /// `max_level` levels and a promotion probability of `p`.
    ///
    /// # Errors
    ///
    /// `max_level` must be in `[2, 32]` and `p` in `(0, 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipbloom::SkipList;
    ///
    /// let mut skiplist: SkipList<i64> = SkipList::new(10, 0.5).unwrap();
    /// skiplist.insert(3);
    /// assert_eq!(skiplist.len(), 1);
    /// ```
    #[inline]
    pub fn new(max_level: usize, p: f64) -> Result<Self, SkipListError> {
        Self::with_comparator(max_level, p, Natural)
    }

    /// Create a new skiplist ordered by `T`'s natural ordering whose level
    /// assignment is driven by a random stream seeded with `seed`.
    ///
    /// # Errors
    ///
    /// See [`SkipList::new`].
    #[inline]
    pub fn with_seed(max_level: usize, p: f64, seed: u64) -> Result<Self, SkipListError> {
        Self::with_comparator_and_seed(max_level, p, Natural, seed)
    }
}

impl<T, C> SkipList<T, C>
where
    C: Comparator<T>,
{
    /// Create a new skiplist using the provided comparator to determine the
    /// ordering of elements within the list.
    ///
    /// # Errors
    ///
    /// See [`SkipList::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use skipbloom::SkipList;
    ///
    /// let mut skiplist = SkipList::with_comparator(8, 0.25, |a: &u32, b: &u32| b.cmp(a)).unwrap();
    /// skiplist.extend([1, 3, 2]);
    /// assert!(skiplist.iter().eq(&[3, 2, 1]));
    /// ```
    #[inline]
    pub fn with_comparator(max_level: usize, p: f64, compare: C) -> Result<Self, SkipListError> {
        Self::check_max_level(max_level)?;
        Self::with_generator(compare, Geometric::new(max_level, p)?)
    }

    /// Create a new skiplist using the provided comparator, whose level
    /// assignment is driven by a random stream seeded with `seed`.
    ///
    /// # Errors
    ///
    /// See [`SkipList::new`].
    #[inline]
    pub fn with_comparator_and_seed(
        max_level: usize,
        p: f64,
        compare: C,
        seed: u64,
    ) -> Result<Self, SkipListError> {
        Self::check_max_level(max_level)?;
        Self::with_generator(compare, Geometric::with_seed(max_level, p, seed)?)
    }
}

impl<T, C, G> SkipList<T, C, G>
where
    C: Comparator<T>,
    G: LevelGenerator,
{
    /// Create a new skiplist from a comparator and a level generator. The
    /// number of levels of the list is the generator's
    /// [`total`][LevelGenerator::total].
    ///
    /// # Errors
    ///
    /// The generator's total must be in `[2, 32]`.
    #[inline]
    pub fn with_generator(compare: C, level_generator: G) -> Result<Self, SkipListError> {
        let max_level = level_generator.total();
        Self::check_max_level(max_level)?;
        let id = NEXT_LIST_ID.fetch_add(1, atomic::Ordering::Relaxed);
        debug!(list = id, max_level, "Created skiplist");
        Ok(SkipList {
            id,
            nodes: Arena::new(max_level),
            tail: None,
            len: 0,
            compare,
            level_generator,
        })
    }

    fn check_max_level(max_level: usize) -> Result<(), SkipListError> {
        if (2..=MAX_LEVELS).contains(&max_level) {
            Ok(())
        } else {
            Err(SkipListError::InvalidMaxLevel(max_level))
        }
    }
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T, C, G> SkipList<T, C, G> {
    /// Returns the number of elements in the skiplist.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipbloom::SkipList;
    ///
    /// let mut skiplist = SkipList::new(10, 0.5).unwrap();
    /// skiplist.extend(0..10);
    /// assert_eq!(skiplist.len(), 10);
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the skiplist contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels of the skiplist.
    #[inline]
    #[must_use]
    pub fn max_level(&self) -> usize {
        self.nodes[HEAD].level
    }

    /// Clears the skiplist, removing all values. Every outstanding handle
    /// becomes stale.
    #[inline]
    pub fn clear(&mut self) {
        let max_level = self.max_level();
        self.nodes.reset(max_level);
        self.tail = None;
        self.len = 0;
    }

    /// The first node of the list, or `None` if the list is empty.
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<NodeHandle> {
        self.nodes[HEAD].next.map(|index| self.handle(index))
    }

    /// The last node of the list, or `None` if the list is empty.
    #[inline]
    #[must_use]
    pub fn tail(&self) -> Option<NodeHandle> {
        self.tail.map(|index| self.handle(index))
    }

    /// The node following `node`, or `None` if `node` is the last one.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this list or has been removed.
    #[inline]
    #[must_use]
    pub fn next(&self, node: NodeHandle) -> Option<NodeHandle> {
        let index = self.resolve(node);
        self.nodes[index].next.map(|next| self.handle(next))
    }

    /// The node preceding `node`, or `None` if `node` is the first one.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this list or has been removed.
    #[inline]
    #[must_use]
    pub fn prev(&self, node: NodeHandle) -> Option<NodeHandle> {
        let index = self.resolve(node);
        self.nodes[index]
            .prev
            .filter(|&prev| prev != HEAD)
            .map(|prev| self.handle(prev))
    }

    /// The element held by `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this list or has been removed.
    #[inline]
    #[must_use]
    pub fn get(&self, node: NodeHandle) -> &T {
        self.nodes[self.resolve(node)].value()
    }

    /// Provides a reference to the front element, or `None` if the skiplist is
    /// empty.
    #[inline]
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.nodes[HEAD].next.map(|index| self.nodes[index].value())
    }

    /// Provides a reference to the back element, or `None` if the skiplist is
    /// empty.
    #[inline]
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|index| self.nodes[index].value())
    }

    /// Creates an iterator over the elements of the skiplist, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipbloom::SkipList;
    ///
    /// let mut skiplist = SkipList::new(10, 0.5).unwrap();
    /// skiplist.extend([3, 1, 2]);
    /// assert_eq!(skiplist.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// assert_eq!(skiplist.iter().rev().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.nodes[HEAD].next,
            back: self.tail,
            size: self.len,
        }
    }

    /// Removes `node` from the list and returns its element.
    ///
    /// The predecessors of the node on each of its levels are recovered by
    /// walking backwards along the bottom chain: on level `i`, the predecessor
    /// is the nearest preceding node which reaches above level `i`.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this list or has been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipbloom::SkipList;
    ///
    /// let mut skiplist = SkipList::new(10, 0.5).unwrap();
    /// skiplist.extend(0..5);
    /// let first = skiplist.head().unwrap();
    /// assert_eq!(skiplist.remove(first), 0);
    /// assert_eq!(skiplist.front(), Some(&1));
    /// ```
    pub fn remove(&mut self, node: NodeHandle) -> T {
        let index = self.resolve(node);
        let level = self.nodes[index].level;

        let mut path = [HEAD; MAX_LEVELS];
        let mut i = 1;
        let mut current = self.nodes[index].prev;
        while i < level {
            let Some(candidate) = current else {
                unreachable!("The head node reaches every level.");
            };
            let reach = self.nodes[candidate].level;
            while i < reach && i < level {
                path[i] = candidate;
                i += 1;
            }
            current = self.nodes[candidate].prev;
        }

        trace!(list = self.id, index, level, "Removing node");
        self.unlink(index, &path)
    }

    /// Unlinks the node in slot `index` from every chain it belongs to and
    /// frees its slot. `path[i + 1]` must be its predecessor on skip level `i`.
    fn unlink(&mut self, index: usize, path: &[usize; MAX_LEVELS]) -> T {
        let node = self.nodes.remove(index);
        let Some(prev) = node.prev else {
            unreachable!("Only the head node has no predecessor.");
        };

        self.nodes[prev].next = node.next;
        match node.next {
            Some(next) => self.nodes[next].prev = Some(prev),
            None => self.tail = (prev != HEAD).then_some(prev),
        }

        for (level, &link) in node.links.iter().enumerate() {
            let pred = path[level + 1];
            debug_assert_eq!(self.nodes[pred].links[level], Some(index));
            self.nodes[pred].links[level] = link;
        }

        self.len -= 1;
        match node.into_inner() {
            Some(value) => value,
            None => unreachable!("The head node is never unlinked."),
        }
    }

    /// Builds the handle of the node in slot `index`.
    fn handle(&self, index: usize) -> NodeHandle {
        NodeHandle {
            list: self.id,
            index,
            generation: self.nodes.generation(index),
        }
    }

    /// Checks that `node` refers to a live node of this list, returning its
    /// slot.
    fn resolve(&self, node: NodeHandle) -> usize {
        assert_eq!(
            node.list, self.id,
            "Node handle does not belong to this skiplist."
        );
        assert!(
            node.index != HEAD && self.nodes.is_live(node.index, node.generation),
            "Node handle refers to a removed node."
        );
        node.index
    }
}

impl<T, C, G> SkipList<T, C, G>
where
    C: Comparator<T>,
{
    /// Walks down from the top level towards `value`.
    ///
    /// On every skip level, links are followed while the next element
    /// compares less than `value`. On the bottom chain they are followed while
    /// it compares less than or equal, so that a single descent finds both the
    /// insertion point and an equal element.
    fn find_path(&self, value: &T) -> Path {
        let mut nodes = [HEAD; MAX_LEVELS];
        let mut current = HEAD;
        let mut last = None;

        for level in (0..self.nodes[HEAD].links.len()).rev() {
            while let Some(next) = self.nodes[current].links[level] {
                let ord = self.compare.compare(self.nodes[next].value(), value);
                if ord != Ordering::Less {
                    break;
                }
                current = next;
                last = Some(ord);
            }
            nodes[level + 1] = current;
        }

        while let Some(next) = self.nodes[current].next {
            let ord = self.compare.compare(self.nodes[next].value(), value);
            if ord == Ordering::Greater {
                break;
            }
            current = next;
            last = Some(ord);
        }
        nodes[0] = current;

        Path {
            nodes,
            exact: last == Some(Ordering::Equal),
        }
    }

    /// Looks up `value`.
    ///
    /// With `exact`, returns the node whose element compares equal to `value`.
    /// Otherwise, returns the node with the greatest element less than or
    /// equal to `value` (a floor lookup), or `None` if `value` is smaller
    /// than every element.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipbloom::SkipList;
    ///
    /// let mut skiplist = SkipList::new(10, 0.5).unwrap();
    /// skiplist.extend([10, 20, 30]);
    /// assert!(skiplist.find(&25, true).is_none());
    /// let floor = skiplist.find(&25, false).unwrap();
    /// assert_eq!(skiplist.get(floor), &20);
    /// assert!(skiplist.find(&5, false).is_none());
    /// ```
    #[must_use]
    pub fn find(&self, value: &T, exact: bool) -> Option<NodeHandle> {
        let path = self.find_path(value);
        let found = if exact {
            path.exact
        } else {
            path.nodes[0] != HEAD
        };
        found.then(|| self.handle(path.nodes[0]))
    }

    /// Returns `true` if an element comparing equal to `value` is in the list.
    #[inline]
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.find_path(value).exact
    }

    /// Removes the element comparing equal to `value` and returns it, or
    /// returns `None` if there is no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipbloom::SkipList;
    ///
    /// let mut skiplist = SkipList::new(10, 0.5).unwrap();
    /// skiplist.extend(0..10);
    /// assert_eq!(skiplist.remove_value(&4), Some(4));
    /// assert!(skiplist.remove_value(&4).is_none());
    /// ```
    pub fn remove_value(&mut self, value: &T) -> Option<T> {
        let path = self.find_path(value);
        if !path.exact {
            return None;
        }
        let index = path.nodes[0];
        trace!(list = self.id, index, "Removing value");
        Some(self.unlink(index, &path.nodes))
    }
}

impl<T, C, G> SkipList<T, C, G>
where
    C: Comparator<T>,
    G: LevelGenerator,
{
    /// Insert the element into the skiplist, returning the node holding it.
    ///
    /// If an element comparing equal is already present, the list is left
    /// unchanged, `value` is dropped, and the existing node is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipbloom::SkipList;
    ///
    /// let mut skiplist = SkipList::new(10, 0.5).unwrap();
    /// let node = skiplist.insert(5);
    /// assert_eq!(skiplist.insert(5), node);
    /// assert_eq!(skiplist.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> NodeHandle {
        let path = self.find_path(&value);
        if path.exact {
            trace!(list = self.id, "Discarding duplicate element");
            return self.handle(path.nodes[0]);
        }

        let level = self.level_generator.level();
        debug_assert!((1..=self.max_level()).contains(&level));
        let (index, generation) = self.nodes.insert(SkipNode::new(value, level));

        let prev = path.nodes[0];
        let next = self.nodes[prev].next;
        self.nodes[index].prev = Some(prev);
        self.nodes[index].next = next;
        self.nodes[prev].next = Some(index);
        match next {
            Some(next) => self.nodes[next].prev = Some(index),
            None => self.tail = Some(index),
        }

        for skip in 0..level - 1 {
            let pred = path.nodes[skip + 1];
            self.nodes[index].links[skip] = self.nodes[pred].links[skip];
            self.nodes[pred].links[skip] = Some(index);
        }

        self.len += 1;
        NodeHandle {
            list: self.id,
            index,
            generation,
        }
    }

    /// Creates an independent list with the same configuration holding
    /// clones of every element.
    ///
    /// The copy gets its own level generator (forked from this list's) and
    /// its elements are re-inserted in order, so its levels are drawn afresh
    /// rather than mirroring this list's layout.
    #[must_use]
    pub fn copy(&self) -> Self
    where
        T: Clone,
        C: Clone,
    {
        let Ok(mut copy) = Self::with_generator(self.compare.clone(), self.level_generator.fork())
        else {
            unreachable!("The configuration was validated when this list was created.");
        };
        debug!(list = self.id, copy = copy.id, len = self.len, "Copying skiplist");
        copy.extend(self.iter().cloned());
        copy
    }
}

impl<T, C, G> SkipList<T, C, G>
where
    C: Comparator<T>,
    G: LevelGenerator,
{
    /// Checks the integrity of the skiplist.
    #[cfg(test)]
    fn check(&self) {
        let head = &self.nodes[HEAD];
        assert!(head.is_head());
        assert!(head.prev.is_none());
        assert_eq!(head.links.len(), head.level - 1);

        // Bottom chain: ordered, doubly linked, and ending at the tail.
        let mut order = Vec::with_capacity(self.len);
        let mut prev = HEAD;
        let mut current = head.next;
        while let Some(index) = current {
            let node = &self.nodes[index];
            assert!(!node.is_head());
            assert_eq!(node.prev, Some(prev));
            assert!((1..=self.max_level()).contains(&node.level));
            assert_eq!(node.links.len(), node.level - 1);
            if prev != HEAD {
                assert_eq!(
                    self.compare
                        .compare(self.nodes[prev].value(), node.value()),
                    Ordering::Less
                );
            }
            order.push(index);
            prev = index;
            current = node.next;
        }
        assert_eq!(order.len(), self.len);
        assert_eq!(self.tail, order.last().copied());

        // Every skip link points at the next node reaching high enough.
        for skip in 0..head.links.len() {
            let mut expected = order
                .iter()
                .copied()
                .filter(|&index| self.nodes[index].level > skip + 1);
            let mut current = HEAD;
            loop {
                let link = self.nodes[current].links[skip];
                assert_eq!(link, expected.next());
                match link {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T> Default for SkipList<T>
where
    T: Ord,
{
    #[expect(clippy::expect_used, reason = "The default configuration is valid")]
    fn default() -> Self {
        SkipList::new(DEFAULT_LEVELS, DEFAULT_P).expect("Default configuration is valid.")
    }
}

impl<T, C, G> Clone for SkipList<T, C, G>
where
    T: Clone,
    C: Comparator<T> + Clone,
    G: LevelGenerator,
{
    #[inline]
    fn clone(&self) -> Self {
        self.copy()
    }
}

/// This implementation of PartialEq only checks that the *values* are equal;
/// it does not check for equivalence of other features (such as the comparator
/// and the node levels). Furthermore, this uses `T`'s implementation of
/// PartialEq and *does not* use the owning skiplist's comparator.
impl<A, B, CA, CB, GA, GB> PartialEq<SkipList<B, CB, GB>> for SkipList<A, CA, GA>
where
    A: PartialEq<B>,
{
    #[inline]
    fn eq(&self, other: &SkipList<B, CB, GB>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T, C, G> Extend<T> for SkipList<T, C, G>
where
    C: Comparator<T>,
    G: LevelGenerator,
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for element in iterable {
            self.insert(element);
        }
    }
}

impl<T> iter::FromIterator<T> for SkipList<T>
where
    T: Ord,
{
    #[inline]
    fn from_iter<I>(iter: I) -> SkipList<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut skiplist = SkipList::default();
        skiplist.extend(iter);
        skiplist
    }
}

impl<T, C, G> fmt::Debug for SkipList<T, C, G>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C, G> fmt::Display for SkipList<T, C, G>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;

        for (i, entry) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{entry}")?;
        }
        write!(f, "]")
    }
}

impl<'a, T, C, G> IntoIterator for &'a SkipList<T, C, G> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Iterator
// ////////////////////////////////////////////////////////////////////////////

/// An iterator over the elements of a [`SkipList`], in order.
pub struct Iter<'a, T> {
    nodes: &'a Arena<T>,
    front: Option<usize>,
    back: Option<usize>,
    size: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.size == 0 {
            return None;
        }
        let node = &self.nodes[self.front?];
        self.front = node.next;
        self.size -= 1;
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.size == 0 {
            return None;
        }
        let node = &self.nodes[self.back?];
        self.back = node.prev;
        self.size -= 1;
        Some(node.value())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> iter::FusedIterator for Iter<'_, T> {}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
