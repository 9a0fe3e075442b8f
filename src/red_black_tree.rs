use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::raw::{Handle, RawRedBlackTree};

mod capacity;
mod neighbors;

/// An ordered set based on a red-black tree.
///
/// Elements are kept in ascending [`Ord`] order with no duplicates. Every
/// insertion and removal rebalances the tree so that its height never
/// exceeds `2·log2(n + 1)`, which bounds point lookups, insertion, removal
/// and neighbor queries at O(log n).
///
/// Nodes live in an arena owned by the set and refer to each other through
/// indices, so the structure is free of `unsafe` code. Cloning produces a
/// fully independent copy with the same shape and coloring.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `RedBlackTree` that observed the logic error and not result in undefined behavior.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use crimson_tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// assert!(tree.insert(42));
/// assert!(tree.insert(71));
/// assert!(tree.insert(13));
/// assert!(!tree.insert(42));
///
/// assert!(tree.remove(&13));
/// assert!(tree.search(&42));
/// assert_eq!(tree.search_range(&50, &100), [71]);
/// assert_eq!(tree.values(), [42, 71]);
/// assert_eq!(tree.closest_less(&12), None);
/// assert_eq!(tree.closest_greater(&91), None);
/// assert_eq!(tree.size(), 2);
/// ```
pub struct RedBlackTree<T> {
    raw: RawRedBlackTree<T>,
}

/// An iterator over the items of a `RedBlackTree`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`RedBlackTree`].
///
/// [`iter`]: RedBlackTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    tree: Option<&'a RawRedBlackTree<T>>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the items of a `RedBlackTree` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`RedBlackTree`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: RedBlackTree#method.into_iter
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> RedBlackTree<T> {
    /// Makes a new, empty `RedBlackTree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> RedBlackTree<T> {
        RedBlackTree {
            raw: RawRedBlackTree::new(),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns the number of elements in the set. Same as [`len`](Self::len).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every element, releasing all nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::from([1, 2, 3]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Gets an iterator that visits the elements in ascending order.
    ///
    /// The iterator walks parent links, so it needs no allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let tree = RedBlackTree::from([3, 1, 2]);
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next_back(), Some(&3));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; each step is O(1) amortized.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: Some(&self.raw),
            front: self.raw.first_handle(),
            back: self.raw.last_handle(),
            remaining: self.raw.len(),
        }
    }

    /// Returns the minimum element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.first(), None);
    /// tree.insert(2);
    /// tree.insert(1);
    /// assert_eq!(tree.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first()
    }

    /// Returns the maximum element, if any.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last()
    }

    /// Returns the number of nodes on the longest path from the root to a
    /// leaf. Never more than `2·log2(len + 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = (0..1000).collect();
    /// assert!(tree.height() <= 20);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Checks the coloring invariants and returns the tree's black-height:
    /// the number of black nodes on every path from the root to an absent
    /// child.
    ///
    /// Returns `None` if the root is red, if a red node has a red child, or
    /// if two paths disagree. That cannot happen through the public API;
    /// this exists as a diagnostic.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let empty: RedBlackTree<i32> = RedBlackTree::new();
    /// assert_eq!(empty.black_height(), Some(0));
    ///
    /// let tree = RedBlackTree::from([1, 2, 3]);
    /// assert_eq!(tree.black_height(), Some(1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn black_height(&self) -> Option<usize> {
        self.raw.black_height()
    }
}

impl<T: Ord> RedBlackTree<T> {
    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. If an equal value is
    /// already present the set is left unchanged and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.insert(2), true);
    /// assert_eq!(tree.insert(2), false);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) -> bool {
        self.raw.insert(value)
    }

    /// Removes a value from the set. Returns whether the value was present.
    ///
    /// The value may be any borrowed form of the set's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(2);
    /// assert_eq!(tree.remove(&2), true);
    /// assert_eq!(tree.remove(&2), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(value).is_some()
    }

    /// Removes and returns the value in the set, if any, that is equal to
    /// the given one.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::from([String::from("a"), String::from("b")]);
    /// assert_eq!(tree.take("a"), Some(String::from("a")));
    /// assert_eq!(tree.take("a"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(value)
    }

    /// Returns `true` if the set contains a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let tree = RedBlackTree::from([1, 2, 3]);
    /// assert_eq!(tree.contains(&1), true);
    /// assert_eq!(tree.contains(&4), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains(value)
    }

    /// Point search. Same as [`contains`](Self::contains).
    pub fn search<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains(value)
    }

    /// Returns a reference to the value in the set, if any, that is equal to the given value.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(value)
    }
}

impl<T: Clone> RedBlackTree<T> {
    /// Returns every element in ascending order.
    ///
    /// Each call takes a fresh snapshot; use [`iter`](Self::iter) to avoid
    /// the copies.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Ord + Clone> RedBlackTree<T> {
    /// Returns, in ascending order, every element between `a` and `b`
    /// inclusive. The bounds may be given in either order.
    ///
    /// Subtrees that lie entirely outside the bounds are never visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let tree = RedBlackTree::from([10, 20, 30, 40]);
    /// assert_eq!(tree.search_range(&15, &30), [20, 30]);
    /// assert_eq!(tree.search_range(&30, &15), [20, 30]);
    /// assert!(tree.search_range(&41, &99).is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n + k) for k returned elements.
    #[must_use]
    pub fn search_range(&self, a: &T, b: &T) -> Vec<T> {
        let (low, high) = if a > b { (b, a) } else { (a, b) };
        let mut found = Vec::new();
        self.raw.collect_range(low, high, &mut found);
        found.into_iter().cloned().collect()
    }
}

impl<T: Hash> Hash for RedBlackTree<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: PartialEq> PartialEq for RedBlackTree<T> {
    fn eq(&self, other: &RedBlackTree<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RedBlackTree<T> {}

impl<T: PartialOrd> PartialOrd for RedBlackTree<T> {
    fn partial_cmp(&self, other: &RedBlackTree<T>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for RedBlackTree<T> {
    fn cmp(&self, other: &RedBlackTree<T>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Clone> Clone for RedBlackTree<T> {
    /// Deep-copies the tree: same values, colors and shape, no shared nodes.
    fn clone(&self) -> Self {
        RedBlackTree { raw: self.raw.clone() }
    }

    /// Releases `self`'s nodes before copying `source` into it, reusing the
    /// allocation.
    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from(&source.raw);
    }
}

impl<T: fmt::Debug> fmt::Debug for RedBlackTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for RedBlackTree<T> {
    fn default() -> Self {
        RedBlackTree::new()
    }
}

impl<T: Ord> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for RedBlackTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for RedBlackTree<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RedBlackTree<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for RedBlackTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `RedBlackTree`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let tree = RedBlackTree::from([4, 2, 3, 1]);
    /// let v: Vec<_> = tree.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree?;
        let handle = self.front?;
        self.remaining -= 1;
        self.front = tree.next_handle(handle);
        Some(tree.value(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree?;
        let handle = self.back?;
        self.remaining -= 1;
        self.back = tree.prev_handle(handle);
        Some(tree.value(handle))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Default for Iter<'_, T> {
    /// Creates an empty `red_black_tree::Iter`.
    ///
    /// ```
    /// # use crimson_tree::red_black_tree;
    /// let iter: red_black_tree::Iter<'_, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            tree: None,
            front: None,
            back: None,
            remaining: 0,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner.as_slice()).finish()
    }
}

impl<T> Default for IntoIter<T> {
    fn default() -> Self {
        IntoIter {
            inner: Vec::new().into_iter(),
        }
    }
}
