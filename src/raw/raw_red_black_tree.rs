use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use log::{debug, trace};
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};

/// The red-black tree backing `RedBlackTree`.
///
/// Invariants, holding whenever no `&mut self` method is running:
/// - in-order traversal is strictly ascending;
/// - the root, if any, is black;
/// - no red node has a red child;
/// - every path from a node down to an absent child crosses the same number
///   of black nodes;
/// - `len` is the number of nodes reachable from `root`.
pub(crate) struct RawRedBlackTree<T> {
    /// Arena owning every node of the tree.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of elements in the tree.
    len: usize,
}

impl<T> RawRedBlackTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    /// Drops every node.
    pub(crate) fn clear(&mut self) {
        debug!("clearing red-black tree of {} nodes", self.len);
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    #[inline]
    fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.nodes.get_mut(handle)
    }

    /// Returns the value stored at `handle`.
    #[inline]
    pub(crate) fn value(&self, handle: Handle) -> &T {
        self.node(handle).value()
    }

    /// Absent links count as black.
    #[inline]
    fn is_red(&self, link: Option<Handle>) -> bool {
        link.is_some_and(|handle| self.node(handle).is_red())
    }

    fn set_color(&mut self, handle: Handle, color: Color) {
        self.node_mut(handle).set_color(color);
    }

    /// Which side of `parent` the node `child` hangs on.
    fn side_of(&self, parent: Handle, child: Handle) -> Side {
        if self.node(parent).left() == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points whatever referenced `old` (its parent or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(parent, old);
                self.node_mut(parent).set_child(side, new);
            }
        }
    }

    /// Rotates `x` down towards `side`, promoting its child on the opposite
    /// side. `rotate(x, Side::Left)` is a left rotation.
    ///
    /// Only links change; colors and `len` are untouched and the in-order
    /// sequence is preserved.
    fn rotate(&mut self, x: Handle, side: Side) {
        let y = self
            .node(x)
            .child(side.opposite())
            .expect("`RawRedBlackTree::rotate()` - promoted child is missing!");
        trace!("rotate {side:?} at {x:?}, promoting {y:?}");

        let inner = self.node(y).child(side);
        self.node_mut(x).set_child(side.opposite(), inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(x));
        }

        let parent = self.node(x).parent();
        self.node_mut(y).set_parent(parent);
        self.replace_child(parent, x, Some(y));

        self.node_mut(y).set_child(side, Some(x));
        self.node_mut(x).set_parent(Some(y));
    }

    /// Returns the left-most node under `handle`.
    fn min_from(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.node(handle).left() {
            handle = left;
        }
        handle
    }

    /// Returns the right-most node under `handle`.
    fn max_from(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.node(handle).right() {
            handle = right;
        }
        handle
    }

    /// Handle of the smallest element.
    pub(crate) fn first_handle(&self) -> Option<Handle> {
        self.root.map(|root| self.min_from(root))
    }

    /// Handle of the largest element.
    pub(crate) fn last_handle(&self) -> Option<Handle> {
        self.root.map(|root| self.max_from(root))
    }

    /// In-order successor, found through child and parent links.
    pub(crate) fn next_handle(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.node(handle).right() {
            return Some(self.min_from(right));
        }
        let mut child = handle;
        let mut parent = self.node(child).parent();
        while let Some(p) = parent {
            if self.node(p).left() == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.node(p).parent();
        }
        None
    }

    /// In-order predecessor, found through child and parent links.
    pub(crate) fn prev_handle(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.node(handle).left() {
            return Some(self.max_from(left));
        }
        let mut child = handle;
        let mut parent = self.node(child).parent();
        while let Some(p) = parent {
            if self.node(p).right() == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.node(p).parent();
        }
        None
    }

    pub(crate) fn first(&self) -> Option<&T> {
        self.first_handle().map(|handle| self.value(handle))
    }

    pub(crate) fn last(&self) -> Option<&T> {
        self.last_handle().map(|handle| self.value(handle))
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: SmallVec<[(Handle, usize); 64]> = SmallVec::new();
        stack.extend(self.root.map(|root| (root, 1)));
        while let Some((handle, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = self.node(handle);
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }
        deepest
    }

    /// Black-height of the whole tree, or `None` if the root is red, a red
    /// node has a red child, or two paths disagree on their black count.
    pub(crate) fn black_height(&self) -> Option<usize> {
        if self.is_red(self.root) {
            return None;
        }
        self.subtree_black_height(self.root)
    }

    fn subtree_black_height(&self, link: Option<Handle>) -> Option<usize> {
        let Some(handle) = link else {
            return Some(0);
        };
        let node = self.node(handle);
        if node.is_red() && (self.is_red(node.left()) || self.is_red(node.right())) {
            return None;
        }
        let left = self.subtree_black_height(node.left())?;
        let right = self.subtree_black_height(node.right())?;
        if left != right {
            return None;
        }
        Some(left + usize::from(!node.is_red()))
    }

    /// Empties the tree, returning its elements in ascending order.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.first_handle();
        while let Some(handle) = current {
            order.push(handle);
            current = self.next_handle(handle);
        }

        let values: Vec<T> = order.into_iter().map(|handle| self.nodes.take(handle).into_value()).collect();
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        values
    }
}

impl<T: Ord> RawRedBlackTree<T> {
    /// Finds the node holding `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            current = match key.cmp(node.value().borrow()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return Some(handle),
            };
        }
        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|handle| self.value(handle))
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Inserts `value` unless an equal element is present.
    /// Returns whether the value was inserted.
    pub(crate) fn insert(&mut self, value: T) -> bool {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(handle) = current {
            side = match value.cmp(self.value(handle)) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => return false,
            };
            parent = Some(handle);
            current = self.node(handle).child(side);
        }

        let handle = self.nodes.alloc(Node::new(value));
        self.node_mut(handle).set_parent(parent);
        match parent {
            None => self.root = Some(handle),
            Some(parent) => self.node_mut(parent).set_child(side, Some(handle)),
        }
        self.len += 1;
        debug_assert_eq!(self.nodes.len(), self.len);

        self.insert_fixup(handle);
        true
    }

    /// Restores the red-black invariants after `node` was attached red.
    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(parent) = self.node(node).parent() {
            if !self.node(node).is_red() || !self.node(parent).is_red() {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let grandparent = self
                .node(parent)
                .parent()
                .expect("`RawRedBlackTree::insert_fixup()` - red `parent` has no parent!");
            let side = self.side_of(grandparent, parent);
            let uncle = self.node(grandparent).child(side.opposite());

            if let Some(uncle) = uncle.filter(|&uncle| self.node(uncle).is_red()) {
                trace!("insert fixup at {node:?}: red uncle, pushing up");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.node(parent).child(side.opposite()) == Some(node) {
                trace!("insert fixup at {node:?}: inner child, straightening");
                self.rotate(parent, side);
                core::mem::swap(&mut node, &mut parent);
            }

            trace!("insert fixup at {node:?}: outer child, rotating grandparent");
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Removes the element equal to `key`, returning it.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let target = self.search(key)?;

        // A node with two children keeps its place and takes its
        // predecessor's value; the predecessor is spliced out instead.
        let removed = match (self.node(target).left(), self.node(target).right()) {
            (Some(left), Some(_)) => self.max_from(left),
            _ => target,
        };

        let child = self.node(removed).left().or(self.node(removed).right());
        let parent = self.node(removed).parent();
        if let Some(child) = child {
            self.node_mut(child).set_parent(parent);
        }
        let side = match parent {
            Some(parent) => self.side_of(parent, removed),
            None => Side::Left,
        };
        self.replace_child(parent, removed, child);

        let node = self.nodes.take(removed);
        let color = node.color();
        let value = if removed == target {
            node.into_value()
        } else {
            self.node_mut(target).replace_value(node.into_value())
        };
        self.len -= 1;
        debug_assert_eq!(self.nodes.len(), self.len);

        if color == Color::Black {
            self.remove_fixup(child, parent, side);
        }
        Some(value)
    }

    /// Restores equal black-height after a black node was spliced out.
    ///
    /// `node` is the child that took its place (possibly absent), hanging on
    /// `side` of `parent`.
    fn remove_fixup(&mut self, mut node: Option<Handle>, mut parent: Option<Handle>, mut side: Side) {
        while node != self.root && !self.is_red(node) {
            let p = parent.expect("`RawRedBlackTree::remove_fixup()` - non-root `node` has no parent!");
            let mut sibling = self.sibling(p, side);

            if self.node(sibling).is_red() {
                trace!("remove fixup under {p:?}: red sibling");
                self.set_color(sibling, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                sibling = self.sibling(p, side);
            }

            let near = self.node(sibling).child(side);
            let far = self.node(sibling).child(side.opposite());
            if !self.is_red(near) && !self.is_red(far) {
                trace!("remove fixup under {p:?}: black nephews, pushing up");
                self.set_color(sibling, Color::Red);
                node = Some(p);
                parent = self.node(p).parent();
                if let Some(grandparent) = parent {
                    side = self.side_of(grandparent, p);
                }
                continue;
            }

            if !self.is_red(far) {
                trace!("remove fixup under {p:?}: red near nephew");
                if let Some(near) = near {
                    self.set_color(near, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, side.opposite());
                sibling = self.sibling(p, side);
            }

            trace!("remove fixup under {p:?}: red far nephew");
            let parent_color = self.node(p).color();
            self.set_color(sibling, parent_color);
            self.set_color(p, Color::Black);
            if let Some(far) = self.node(sibling).child(side.opposite()) {
                self.set_color(far, Color::Black);
            }
            self.rotate(p, side);
            node = self.root;
            parent = None;
        }

        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }

    /// The child of `parent` opposite to `side`. While a black-height deficit
    /// sits on `side`, the other side is at least one black node deep.
    fn sibling(&self, parent: Handle, side: Side) -> Handle {
        self.node(parent)
            .child(side.opposite())
            .expect("`RawRedBlackTree::remove_fixup()` - `sibling` is missing!")
    }

    /// Appends, in ascending order, every element in `[low, high]`.
    /// Subtrees entirely outside the bounds are never visited.
    pub(crate) fn collect_range<'a>(&'a self, low: &T, high: &T, out: &mut Vec<&'a T>) {
        self.collect_range_from(self.root, low, high, out);
    }

    fn collect_range_from<'a>(&'a self, link: Option<Handle>, low: &T, high: &T, out: &mut Vec<&'a T>) {
        let Some(handle) = link else {
            return;
        };
        let node = self.node(handle);
        let value = node.value();
        if low < value {
            self.collect_range_from(node.left(), low, high, out);
        }
        if low <= value && value <= high {
            out.push(value);
        }
        if high > value {
            self.collect_range_from(node.right(), low, high, out);
        }
    }

    /// Largest element strictly less than `key`.
    pub(crate) fn closest_less<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            if node.value().borrow() < key {
                best = Some(node.value());
                current = node.right();
            } else {
                current = node.left();
            }
        }
        best
    }

    /// Smallest element strictly greater than `key`.
    pub(crate) fn closest_greater<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            if node.value().borrow() > key {
                best = Some(node.value());
                current = node.left();
            } else {
                current = node.right();
            }
        }
        best
    }
}

impl<T: Clone> RawRedBlackTree<T> {
    /// Rebuilds `source`'s shape, colors and values into this (empty) tree.
    /// Every link points into this tree's own arena.
    fn copy_from(&mut self, source: &Self) {
        debug_assert!(self.is_empty(), "`RawRedBlackTree::copy_from()` - destination is not empty!");
        debug!("deep-copying red-black tree of {} nodes", source.len);

        let mut stack: SmallVec<[(Handle, Option<Handle>, Side); 64]> = SmallVec::new();
        stack.extend(source.root.map(|root| (root, None, Side::Left)));

        while let Some((old, new_parent, side)) = stack.pop() {
            let old_node = source.node(old);
            let mut node = Node::new(old_node.value().clone());
            node.set_color(old_node.color());
            node.set_parent(new_parent);
            let new = self.nodes.alloc(node);

            match new_parent {
                None => self.root = Some(new),
                Some(new_parent) => self.node_mut(new_parent).set_child(side, Some(new)),
            }

            stack.extend(old_node.right().map(|right| (right, Some(new), Side::Right)));
            stack.extend(old_node.left().map(|left| (left, Some(new), Side::Left)));
        }

        self.len = source.len;
    }
}

impl<T: Clone> Clone for RawRedBlackTree<T> {
    fn clone(&self) -> Self {
        let mut tree = Self::with_capacity(self.len);
        tree.copy_from(self);
        tree
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.nodes.reserve(source.len);
        self.copy_from(source);
    }
}
