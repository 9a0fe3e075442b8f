use super::RedBlackTree;
use crate::raw::RawRedBlackTree;

impl<T> RedBlackTree<T> {
    /// Creates an empty set with room for at least `capacity` elements
    /// before the node arena reallocates.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = RedBlackTree::with_capacity(16);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RedBlackTree {
            raw: RawRedBlackTree::with_capacity(capacity),
        }
    }

    /// Returns how many elements the set can hold before the node arena
    /// reallocates. Slots freed by removals are reused first.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Shrinks the node arena to fit, when no freed slots are outstanding.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let mut tree: RedBlackTree<i32> = RedBlackTree::with_capacity(100);
    /// tree.extend([1, 2, 3]);
    /// tree.shrink_to_fit();
    /// assert!(tree.capacity() >= 3);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        self.raw.shrink_to_fit();
    }
}
