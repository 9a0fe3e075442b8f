use core::borrow::Borrow;

use super::RedBlackTree;

impl<T: Ord> RedBlackTree<T> {
    /// Returns the largest element strictly less than `value`, or `None` if
    /// there is none.
    ///
    /// `value` itself need not be in the set, and an element equal to it is
    /// never returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let tree = RedBlackTree::from([-44, -10, 0, 4, 36, 78, 92]);
    /// assert_eq!(tree.closest_less(&-9), Some(&-10));
    /// assert_eq!(tree.closest_less(&4), Some(&0));
    /// assert_eq!(tree.closest_less(&-44), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn closest_less<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.closest_less(value)
    }

    /// Returns the smallest element strictly greater than `value`, or `None`
    /// if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let tree = RedBlackTree::from([-44, -10, 0, 4, 36, 78, 92]);
    /// assert_eq!(tree.closest_greater(&44), Some(&78));
    /// assert_eq!(tree.closest_greater(&-123), Some(&-44));
    /// assert_eq!(tree.closest_greater(&92), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn closest_greater<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.closest_greater(value)
    }
}

impl<T: Ord + Clone> RedBlackTree<T> {
    /// Like [`closest_less`](Self::closest_less), but hands `value` back
    /// when no smaller element exists.
    ///
    /// A result equal to `value` therefore means "none": no element is both
    /// smaller than `value` and equal to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let tree = RedBlackTree::from([42, 71]);
    /// assert_eq!(tree.closest_less_or(50), 42);
    /// assert_eq!(tree.closest_less_or(12), 12);
    /// ```
    #[must_use]
    pub fn closest_less_or(&self, value: T) -> T {
        self.closest_less(&value).cloned().unwrap_or(value)
    }

    /// Like [`closest_greater`](Self::closest_greater), but hands `value`
    /// back when no greater element exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use crimson_tree::RedBlackTree;
    ///
    /// let tree = RedBlackTree::from([42, 71]);
    /// assert_eq!(tree.closest_greater_or(50), 71);
    /// assert_eq!(tree.closest_greater_or(91), 91);
    /// ```
    #[must_use]
    pub fn closest_greater_or(&self, value: T) -> T {
        self.closest_greater(&value).cloned().unwrap_or(value)
    }
}
