//! Unbalanced binary search tree that backs the associative containers
//!
//! Like the list, the tree keeps its nodes in an arena addressed by `usize`, with `!0` standing
//! for "no node". Only child links are stored. A node's successor or predecessor is found by
//! descending into a child subtree when there is one, and otherwise by walking down from the root
//! again to find the nearest ancestor on the correct side. Each step of an iteration is therefore
//! O(h) rather than amortised O(1), in exchange for not maintaining parent links.
//!
//! Equal keys share a node. A node carries a duplicate count, which is how `Multiset` is
//! supported without breaking the ordering invariant. The tree does not rebalance itself.
//!
//! The arena is kept dense. When a node is unlinked, the last node in the arena moves into its
//! slot, and the removed key/value pair is dropped there and then.

#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;
use core::{
    borrow::Borrow,
    cmp::Ordering,
    fmt::{self, Display},
    iter::FusedIterator,
};

use crate::error::{ContainerError, Result};

//-----------------------------------------------------------------------------------------------//

// A node in the search tree
#[derive(Clone)]
struct Leaf {
    left: usize,
    right: usize,
    count: usize,
}

// Where a key sits in the tree, or where it would be inserted
enum Location {
    Found(usize),
    Root,
    Left(usize),
    Right(usize),
}

//-----------------------------------------------------------------------------------------------//

/// Position of a node in a `BaseTree`
///
/// A detached handle that does not borrow the tree. The end marker is the unset position.
/// Removing keys or clearing the tree invalidates positions, since removal moves another node
/// into the freed slot. An invalidated position must not be dereferenced. Doing so is a logic
/// error: it may refer to a different key, or panic, but it is never memory unsafe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TreePos(usize);

impl TreePos {
    /// The unset position, one past the last node
    pub const END: TreePos = TreePos(!0);

    /// Check if this is the unset position
    #[inline]
    pub fn is_end(self) -> bool {
        !self.0 == 0
    }
}

//-----------------------------------------------------------------------------------------------//

/// A binary search tree of keys and values with a duplicate count per key
pub struct BaseTree<K, V> {
    leaf: Vec<Leaf>,
    key_value: Vec<(K, V)>,
    root: usize,
    nodes: usize,
    len: usize,
}

impl<K, V> BaseTree<K, V> {
    /// Construct an empty tree
    pub fn new() -> BaseTree<K, V> {
        BaseTree {
            leaf: Vec::new(),
            key_value: Vec::new(),
            root: !0,
            nodes: 0,
            len: 0,
        }
    }

    /// Construct an empty tree, pre-allocating a given number of nodes
    pub fn with_capacity(capacity: usize) -> BaseTree<K, V> {
        BaseTree {
            leaf: Vec::with_capacity(capacity),
            key_value: Vec::with_capacity(capacity),
            root: !0,
            nodes: 0,
            len: 0,
        }
    }

    /// Get the number of insertions held, counting every duplicate
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Get the number of distinct keys
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Check if the tree is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every node
    ///
    /// The arena is released in one go, so the shape of the tree does not matter.
    pub fn clear(&mut self) {
        tracing::trace!(nodes = self.nodes, len = self.len, "clearing tree");

        self.leaf.truncate(0);
        self.key_value.truncate(0);
        self.root = !0;
        self.nodes = 0;
        self.len = 0;
    }

    /// Exchange the contents of two trees
    pub fn swap(&mut self, other: &mut BaseTree<K, V>) {
        core::mem::swap(self, other);
    }

    /// Position of the node with the smallest key, or the end marker
    pub fn first(&self) -> TreePos {
        TreePos(self.min_from(self.root))
    }

    /// Position of the node with the largest key, or the end marker
    pub fn last(&self) -> TreePos {
        TreePos(self.max_from(self.root))
    }

    /// Get the key and value at a position
    pub fn key_value_at(&self, pos: TreePos) -> Result<(&K, &V)> {
        if pos.is_end() {
            return Err(ContainerError::UnsetPosition {
                action: "dereference",
            });
        }

        let (key, value) = &self.key_value[pos.0];
        Ok((key, value))
    }

    /// Get a mutable reference to the value at a position
    pub fn value_mut_at(&mut self, pos: TreePos) -> Result<&mut V> {
        if pos.is_end() {
            return Err(ContainerError::UnsetPosition {
                action: "dereference",
            });
        }

        Ok(&mut self.key_value[pos.0].1)
    }

    // Key at a position known to hold a node
    pub(crate) fn key(&self, pos: TreePos) -> &K {
        debug_assert!(!pos.is_end());
        &self.key_value[pos.0].0
    }

    // Value at a position known to hold a node
    pub(crate) fn value_mut(&mut self, pos: TreePos) -> &mut V {
        debug_assert!(!pos.is_end());
        &mut self.key_value[pos.0].1
    }

    /// Get the duplicate count at a position, zero at the end marker
    pub fn count_at(&self, pos: TreePos) -> usize {
        if pos.is_end() {
            0
        } else {
            self.leaf[pos.0].count
        }
    }

    /// Position of the next larger key
    ///
    /// Fails if `pos` is the end marker. The successor of the largest key is the end marker.
    pub fn successor(&self, pos: TreePos) -> Result<TreePos>
    where
        K: Ord,
    {
        if pos.is_end() {
            return Err(ContainerError::UnsetPosition {
                action: "increment",
            });
        }

        let right = self.leaf[pos.0].right;
        if !right != 0 {
            return Ok(TreePos(self.min_from(right)));
        }

        Ok(TreePos(self.left_parent(pos.0)))
    }

    /// Position of the next smaller key
    ///
    /// Fails if `pos` is the end marker. The predecessor of the smallest key is the end marker.
    pub fn predecessor(&self, pos: TreePos) -> Result<TreePos>
    where
        K: Ord,
    {
        if pos.is_end() {
            return Err(ContainerError::UnsetPosition {
                action: "decrement",
            });
        }

        let left = self.leaf[pos.0].left;
        if !left != 0 {
            return Ok(TreePos(self.max_from(left)));
        }

        Ok(TreePos(self.right_parent(pos.0)))
    }

    /// Cursor at the smallest key
    pub fn cursor(&self) -> TreeCursor<'_, K, V> {
        TreeCursor {
            tree: self,
            leaf: self.min_from(self.root),
        }
    }

    /// Cursor at the end marker
    pub fn cursor_end(&self) -> TreeCursor<'_, K, V> {
        TreeCursor {
            tree: self,
            leaf: !0,
        }
    }

    /// Cursor at a given position
    pub fn cursor_at(&self, pos: TreePos) -> TreeCursor<'_, K, V> {
        TreeCursor {
            tree: self,
            leaf: pos.0,
        }
    }

    /// Iterate over the nodes in ascending key order, once per distinct key
    pub fn iter(&self) -> TreeIter<'_, K, V> {
        TreeIter {
            tree: self,
            head: self.min_from(self.root),
            tail: self.max_from(self.root),
            count: self.nodes,
        }
    }

    // Get the smallest node of a subtree
    fn min_from(&self, mut x: usize) -> usize {
        if !x == 0 {
            return !0;
        }

        loop {
            let y = self.leaf[x].left;
            if !y == 0 {
                return x;
            }
            x = y;
        }
    }

    // Get the largest node of a subtree
    fn max_from(&self, mut x: usize) -> usize {
        if !x == 0 {
            return !0;
        }

        loop {
            let y = self.leaf[x].right;
            if !y == 0 {
                return x;
            }
            x = y;
        }
    }

    // Allocate a node at the end of the arena
    fn alloc(&mut self, key: K, value: V) -> usize {
        self.nodes += 1;

        let x = self.leaf.len();
        self.leaf.push(Leaf {
            left: !0,
            right: !0,
            count: 1,
        });
        self.key_value.push((key, value));
        x
    }

    // Release the slot of an unlinked node, dropping its pair. The last node in the arena moves
    // into the slot.
    fn free(&mut self, x: usize)
    where
        K: Ord,
    {
        self.nodes -= 1;

        let last = self.leaf.len() - 1;
        if x != last {
            let parent = self.parent(last);
            self.replace_child(parent, last, x);
        }

        self.leaf.swap_remove(x);
        self.key_value.swap_remove(x);
    }

    // Point whichever link of `parent` held `x` at `child` instead
    fn replace_child(&mut self, parent: usize, x: usize, child: usize) {
        if !parent == 0 {
            self.root = child;
        } else if self.leaf[parent].left == x {
            self.leaf[parent].left = child;
        } else {
            debug_assert_eq!(self.leaf[parent].right, x);
            self.leaf[parent].right = child;
        }
    }

    // Unlink a node whose count has reached zero and release its slot
    fn remove_node(&mut self, x: usize, parent: usize)
    where
        K: Ord,
    {
        let a = self.leaf[x].left;
        let b = self.leaf[x].right;

        // No children, or one
        if !a == 0 || !b == 0 {
            let child = if !a == 0 { b } else { a };
            self.replace_child(parent, x, child);
            self.free(x);
            return;
        }

        // Two children: the in-order successor takes this node's place in the ordering
        let mut s = b;
        let mut s_parent = x;
        loop {
            let y = self.leaf[s].left;
            if !y == 0 {
                break;
            }
            s_parent = s;
            s = y;
        }

        self.key_value.swap(x, s);
        self.leaf[x].count = self.leaf[s].count;

        // The successor has no left child
        let c = self.leaf[s].right;
        if s_parent == x {
            self.leaf[x].right = c;
        } else {
            self.leaf[s_parent].left = c;
        }
        self.free(s);
    }

    // Check the links, the counts and the ordering
    #[cfg(test)]
    fn check(&self)
    where
        K: Ord,
    {
        let mut stack = Vec::new();
        let mut nodes = 0;
        let mut len = 0;
        if !self.root != 0 {
            stack.push(self.root);
        }
        while let Some(x) = stack.pop() {
            nodes += 1;
            len += self.leaf[x].count;
            assert!(self.leaf[x].count >= 1);
            for (y, ordering) in [
                (self.leaf[x].left, Ordering::Less),
                (self.leaf[x].right, Ordering::Greater),
            ] {
                if !y != 0 {
                    assert_eq!(self.key_value[y].0.cmp(&self.key_value[x].0), ordering);
                    stack.push(y);
                }
            }
        }
        assert_eq!(nodes, self.nodes);
        assert_eq!(nodes, self.leaf.len());
        assert_eq!(nodes, self.key_value.len());
        assert_eq!(len, self.len);

        let keys: Vec<&K> = self.iter().map(|(k, _)| k).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }
}

impl<K: Ord, V> BaseTree<K, V> {
    /// Insert a key and value
    ///
    /// A new key gets a new leaf and the flag `true`. A key that is already present has its
    /// duplicate count incremented, keeps its stored value, and gets the flag `false`. Either way
    /// the insertion is held by the tree and counted by `len`.
    pub fn insert(&mut self, key: K, value: V) -> (TreePos, bool) {
        self.len += 1;

        match self.locate(&key) {
            Location::Found(x) => {
                self.leaf[x].count += 1;
                (TreePos(x), false)
            }
            Location::Root => {
                let x = self.alloc(key, value);
                self.root = x;
                (TreePos(x), true)
            }
            Location::Left(parent) => {
                let x = self.alloc(key, value);
                self.leaf[parent].left = x;
                (TreePos(x), true)
            }
            Location::Right(parent) => {
                let x = self.alloc(key, value);
                self.leaf[parent].right = x;
                (TreePos(x), true)
            }
        }
    }

    /// Find the position of a key
    ///
    /// Fails if the key is not present, which includes the tree being empty.
    pub fn find<Q>(&self, key: &Q) -> Result<TreePos>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let x = self.search(key);
        if !x == 0 {
            Err(ContainerError::KeyNotFound)
        } else {
            Ok(TreePos(x))
        }
    }

    /// Get the key and value stored for a key, if present
    pub fn get<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let x = self.search(key);
        if !x == 0 {
            None
        } else {
            let (key, value) = &self.key_value[x];
            Some((key, value))
        }
    }

    /// Check if a key is present
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.search(key) != 0
    }

    /// Get the duplicate count of a key, zero if absent
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.count_at(TreePos(self.search(key)))
    }

    /// Remove one insertion of a key
    ///
    /// The duplicate count is decremented and the node is only unlinked once it reaches zero.
    /// Returns `false` if the key is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut x = self.root;
        let mut parent = !0;

        loop {
            if !x == 0 {
                return false;
            }

            match key.cmp(self.key_value[x].0.borrow()) {
                Ordering::Equal => break,
                Ordering::Less => {
                    parent = x;
                    x = self.leaf[x].left;
                }
                Ordering::Greater => {
                    parent = x;
                    x = self.leaf[x].right;
                }
            }
        }

        self.len -= 1;
        self.leaf[x].count -= 1;
        if self.leaf[x].count == 0 {
            self.remove_node(x, parent);
        }
        true
    }

    /// Insert every insertion held by `other` into this tree
    ///
    /// `other` is left untouched, unlike `List::merge` which empties its argument.
    pub fn merge(&mut self, other: &BaseTree<K, V>)
    where
        K: Clone,
        V: Clone,
    {
        tracing::trace!(len = self.len, other = other.len, "merging trees");

        let mut x = other.min_from(other.root);
        while !x != 0 {
            let (key, value) = &other.key_value[x];
            for _ in 0..other.leaf[x].count {
                self.insert(key.clone(), value.clone());
            }
            x = other.next_leaf(x);
        }
    }

    /// Position of the first key not less than `key`, or the end marker
    pub fn lower_bound<Q>(&self, key: &Q) -> TreePos
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut best = !0;
        let mut x = self.root;
        while !x != 0 {
            if key.cmp(self.key_value[x].0.borrow()) != Ordering::Greater {
                best = x;
                x = self.leaf[x].left;
            } else {
                x = self.leaf[x].right;
            }
        }
        TreePos(best)
    }

    /// Position of the first key greater than `key`, or the end marker
    pub fn upper_bound<Q>(&self, key: &Q) -> TreePos
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut best = !0;
        let mut x = self.root;
        while !x != 0 {
            if key.cmp(self.key_value[x].0.borrow()) == Ordering::Less {
                best = x;
                x = self.leaf[x].left;
            } else {
                x = self.leaf[x].right;
            }
        }
        TreePos(best)
    }

    // Get the leaf holding a key
    fn search<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut x = self.root;
        loop {
            if !x == 0 {
                return !0;
            }

            match key.cmp(self.key_value[x].0.borrow()) {
                Ordering::Equal => return x,
                Ordering::Less => x = self.leaf[x].left,
                Ordering::Greater => x = self.leaf[x].right,
            }
        }
    }

    // Locate a key, or if not found identify where to insert it
    fn locate(&self, key: &K) -> Location {
        let mut x = self.root;

        // First leaf is a special case
        if !x == 0 {
            return Location::Root;
        }

        loop {
            match key.cmp(&self.key_value[x].0) {
                Ordering::Equal => return Location::Found(x),
                Ordering::Less => {
                    let y = self.leaf[x].left;
                    if !y == 0 {
                        return Location::Left(x);
                    }
                    x = y;
                }
                Ordering::Greater => {
                    let y = self.leaf[x].right;
                    if !y == 0 {
                        return Location::Right(x);
                    }
                    x = y;
                }
            }
        }
    }

    // Get the logical successor of a leaf
    fn next_leaf(&self, x: usize) -> usize {
        let right = self.leaf[x].right;
        if !right != 0 {
            self.min_from(right)
        } else {
            self.left_parent(x)
        }
    }

    // Get the logical predecessor of a leaf
    fn prev_leaf(&self, x: usize) -> usize {
        let left = self.leaf[x].left;
        if !left != 0 {
            self.max_from(left)
        } else {
            self.right_parent(x)
        }
    }

    // Walk down from the root to find the parent of a linked node, or `!0` for the root
    fn parent(&self, x: usize) -> usize {
        let key = &self.key_value[x].0;
        let mut parent = !0;
        let mut y = self.root;

        while !y != 0 && y != x {
            parent = y;
            if *key < self.key_value[y].0 {
                y = self.leaf[y].left;
            } else {
                y = self.leaf[y].right;
            }
        }

        parent
    }

    // Walk down from the root to find the nearest ancestor that has `x` in its left subtree
    fn left_parent(&self, x: usize) -> usize {
        let key = &self.key_value[x].0;
        let mut ancestor = !0;
        let mut y = self.root;

        while !y != 0 && y != x {
            if *key < self.key_value[y].0 {
                ancestor = y;
                y = self.leaf[y].left;
            } else {
                y = self.leaf[y].right;
            }
        }

        ancestor
    }

    // Walk down from the root to find the nearest ancestor that has `x` in its right subtree
    fn right_parent(&self, x: usize) -> usize {
        let key = &self.key_value[x].0;
        let mut ancestor = !0;
        let mut y = self.root;

        while !y != 0 && y != x {
            if *key > self.key_value[y].0 {
                ancestor = y;
                y = self.leaf[y].right;
            } else {
                y = self.leaf[y].left;
            }
        }

        ancestor
    }
}

impl<K, V> Default for BaseTree<K, V> {
    fn default() -> Self {
        BaseTree::new()
    }
}

impl<K: Clone, V: Clone> Clone for BaseTree<K, V> {
    /// Deep copy of the tree structure
    ///
    /// Nodes are copied from an explicit worklist of `(source, new parent, side)` entries rather
    /// than by recursion, so a degenerate tree shaped like a list cannot exhaust the stack.
    fn clone(&self) -> Self {
        let mut tree = BaseTree::with_capacity(self.nodes);
        if !self.root == 0 {
            return tree;
        }

        let mut stack = Vec::new();
        stack.push((self.root, !0usize, false));

        while let Some((x, parent, is_left)) = stack.pop() {
            let y = tree.leaf.len();
            tree.leaf.push(Leaf {
                left: !0,
                right: !0,
                count: self.leaf[x].count,
            });
            tree.key_value.push(self.key_value[x].clone());

            if !parent == 0 {
                tree.root = y;
            } else if is_left {
                tree.leaf[parent].left = y;
            } else {
                tree.leaf[parent].right = y;
            }

            let l = &self.leaf[x];
            if !l.left != 0 {
                stack.push((l.left, y, true));
            }
            if !l.right != 0 {
                stack.push((l.right, y, false));
            }
        }

        tree.nodes = self.nodes;
        tree.len = self.len;
        tree
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BaseTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut tree = BaseTree::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            tree.insert(key, value);
        }
        tree
    }
}

impl<K: Ord + Display, V> Display for BaseTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        let mut x = self.min_from(self.root);
        while !x != 0 {
            let count = self.leaf[x].count;
            if count > 1 {
                write!(f, "{}x{count} ", self.key_value[x].0)?;
            } else {
                write!(f, "{} ", self.key_value[x].0)?;
            }
            x = self.next_leaf(x);
        }
        write!(f, "]")?;
        Ok(())
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for BaseTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a BaseTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = TreeIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//-----------------------------------------------------------------------------------------------//

/// A cursor over a `BaseTree`
///
/// Holds the tree it came from, so successors can be found from the root, and the current node.
/// Reading or moving a cursor at the end marker fails. Moving back from the first node gives the
/// end marker, from which the cursor cannot move again.
pub struct TreeCursor<'a, K, V> {
    tree: &'a BaseTree<K, V>,
    leaf: usize,
}

impl<'a, K: Ord, V> TreeCursor<'a, K, V> {
    /// Get the key and value under the cursor
    pub fn get(&self) -> Result<(&'a K, &'a V)> {
        self.tree.key_value_at(TreePos(self.leaf))
    }

    /// Move to the next larger key
    pub fn move_next(&mut self) -> Result<()> {
        self.leaf = self.tree.successor(TreePos(self.leaf))?.0;
        Ok(())
    }

    /// Move to the next smaller key
    pub fn move_prev(&mut self) -> Result<()> {
        self.leaf = self.tree.predecessor(TreePos(self.leaf))?.0;
        Ok(())
    }

    /// Get the duplicate count of the key under the cursor, zero at the end marker
    pub fn count(&self) -> usize {
        self.tree.count_at(TreePos(self.leaf))
    }

    /// Check if the cursor is at the end marker
    pub fn is_end(&self) -> bool {
        !self.leaf == 0
    }

    /// Detach the position of the cursor
    pub fn position(&self) -> TreePos {
        TreePos(self.leaf)
    }
}

impl<K, V> Clone for TreeCursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for TreeCursor<'_, K, V> {}

impl<K, V> PartialEq for TreeCursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.leaf == other.leaf
    }
}

impl<K, V> Eq for TreeCursor<'_, K, V> {}

impl<K, V> fmt::Debug for TreeCursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TreeCursor").field(&self.leaf).finish()
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over the nodes of a `BaseTree` in ascending key order
pub struct TreeIter<'a, K, V> {
    tree: &'a BaseTree<K, V>,
    head: usize,
    tail: usize,
    count: usize,
}

impl<'a, K: Ord, V> Iterator for TreeIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.count == 0 {
            return None;
        }

        let x = self.head;
        self.head = self.tree.next_leaf(x);
        self.count -= 1;

        let (key, value) = &self.tree.key_value[x];
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl<'a, K: Ord, V> DoubleEndedIterator for TreeIter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.count == 0 {
            return None;
        }

        let x = self.tail;
        self.tail = self.tree.prev_leaf(x);
        self.count -= 1;

        let (key, value) = &self.tree.key_value[x];
        Some((key, value))
    }
}

impl<K: Ord, V> ExactSizeIterator for TreeIter<'_, K, V> {}

impl<K: Ord, V> FusedIterator for TreeIter<'_, K, V> {}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
fn keys<K: Ord + Clone, V>(tree: &BaseTree<K, V>) -> Vec<K> {
    tree.iter().map(|(k, _)| k.clone()).collect()
}

#[test]
// Traversal order forwards and backwards
fn test_tree_0() {
    use alloc::vec;

    let mut tree = BaseTree::new();
    for key in [5, 8, 3, 6, 7, 9, 4, 2, 1] {
        tree.insert(key, ());
    }
    tree.check();

    let mut cursor = tree.cursor();
    let mut forwards = Vec::new();
    while let Ok((key, _)) = cursor.get() {
        forwards.push(*key);
        cursor.move_next().unwrap();
    }
    assert_eq!(forwards, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let mut cursor = tree.cursor_at(tree.last());
    let mut backwards = Vec::new();
    while let Ok((key, _)) = cursor.get() {
        backwards.push(*key);
        cursor.move_prev().unwrap();
    }
    assert_eq!(backwards, vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);

    let reversed: Vec<i32> = tree.iter().rev().map(|(k, _)| *k).collect();
    assert_eq!(reversed, backwards);
}

#[test]
// The end marker cannot be read or moved
fn test_tree_1() {
    let tree: BaseTree<i32, ()> = [(1, ()), (2, ())].into_iter().collect();

    let mut cursor = tree.cursor_end();
    assert_eq!(
        cursor.get(),
        Err(ContainerError::UnsetPosition {
            action: "dereference"
        })
    );
    assert_eq!(
        cursor.move_next(),
        Err(ContainerError::UnsetPosition {
            action: "increment"
        })
    );
    assert_eq!(
        cursor.move_prev(),
        Err(ContainerError::UnsetPosition {
            action: "decrement"
        })
    );

    // Stepping back from the first node reaches the end marker
    let mut cursor = tree.cursor();
    cursor.move_prev().unwrap();
    assert!(cursor.is_end());
    assert_eq!(cursor, tree.cursor_end());

    let empty: BaseTree<i32, ()> = BaseTree::new();
    assert!(empty.cursor().is_end());
    assert_eq!(empty.find(&1), Err(ContainerError::KeyNotFound));
}

#[test]
// Duplicates increment the count and keep the first value
fn test_tree_2() {
    let mut tree = BaseTree::new();

    let (pos, fresh) = tree.insert(5, "a");
    assert!(fresh);
    assert_eq!(tree.key_value_at(pos), Ok((&5, &"a")));

    let (again, fresh) = tree.insert(5, "b");
    assert!(!fresh);
    assert_eq!(again, pos);

    let pos = tree.find(&5).unwrap();
    assert_eq!(tree.count_at(pos), 2);
    assert_eq!(tree.key_value_at(pos), Ok((&5, &"a")));
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.node_count(), 1);

    // Counting down to zero removes the key
    assert!(tree.remove(&5));
    assert_eq!(tree.count(&5), 1);
    assert!(tree.remove(&5));
    assert!(!tree.contains(&5));
    assert!(!tree.remove(&5));
    assert!(tree.is_empty());
    tree.check();
}

#[test]
// Removing a node with two children promotes its successor
fn test_tree_3() {
    use alloc::vec;

    let mut tree = BaseTree::new();
    for key in [5, 3, 8, 7, 9] {
        tree.insert(key, key * 10);
    }

    assert!(tree.remove(&5));
    assert_eq!(tree.key_value_at(TreePos(tree.root)), Ok((&7, &70)));
    assert_eq!(tree.get(&8), Some((&8, &80)));
    assert_eq!(tree.get(&9), Some((&9, &90)));
    assert_eq!(tree.get(&3), Some((&3, &30)));
    assert_eq!(keys(&tree), vec![3, 7, 8, 9]);
    tree.check();

    // A leaf, then a node with one child
    assert!(tree.remove(&3));
    assert!(tree.remove(&8));
    assert_eq!(keys(&tree), vec![7, 9]);
    tree.check();
}

#[test]
// A successor with duplicates keeps its count when promoted
fn test_tree_4() {
    let mut tree = BaseTree::new();
    for key in [5, 3, 8, 6, 6, 6, 9] {
        tree.insert(key, ());
    }

    assert!(tree.remove(&5));
    assert_eq!(tree.count(&6), 3);
    assert_eq!(tree.len(), 6);
    tree.check();

    // A key with duplicates is not unlinked by a single removal
    assert!(tree.remove(&6));
    assert_eq!(tree.count(&6), 2);
    assert_eq!(tree.node_count(), 4);
    tree.check();
}

#[test]
// Copies are deep
fn test_tree_5() {
    let mut tree = BaseTree::new();
    for key in [4, 2, 6, 1, 3, 5, 7, 7] {
        tree.insert(key, key);
    }
    tree.remove(&2);

    let mut copy = tree.clone();
    copy.check();
    assert_eq!(keys(&copy), keys(&tree));
    assert_eq!(copy.count(&7), 2);

    copy.remove(&4);
    *copy.value_mut_at(copy.find(&6).unwrap()).unwrap() = 60;
    assert!(tree.contains(&4));
    assert_eq!(tree.get(&6), Some((&6, &6)));
    assert_eq!(tree.len(), 7);

    // Moving out leaves an empty tree behind
    let moved = core::mem::take(&mut tree);
    assert_eq!(moved.len(), 7);
    assert!(tree.is_empty());
    assert_eq!(tree.find(&4), Err(ContainerError::KeyNotFound));
}

#[test]
// A degenerate tree is cloned, traversed and cleared without recursion
fn test_tree_6() {
    const COUNT: usize = 10000;

    let mut tree = BaseTree::new();
    for key in 0..COUNT {
        tree.insert(key, ());
    }

    let copy = tree.clone();
    assert_eq!(copy.len(), COUNT);
    assert_eq!(copy.iter().next_back(), Some((&(COUNT - 1), &())));

    tree.clear();
    assert!(tree.is_empty());
    assert!(tree.cursor().is_end());
}

#[test]
// Merging leaves the other tree alone
fn test_tree_7() {
    use alloc::vec;

    let mut tree: BaseTree<i32, ()> = [3, 2, 1, 4, 5].into_iter().map(|k| (k, ())).collect();
    let other: BaseTree<i32, ()> = [2, 1, 3, 3].into_iter().map(|k| (k, ())).collect();

    tree.merge(&other);
    assert_eq!(tree.len(), 9);
    assert_eq!(tree.count(&3), 3);
    assert_eq!(other.len(), 4);
    assert_eq!(keys(&other), vec![1, 2, 3]);
    tree.check();
}

#[test]
// Bounds
fn test_tree_8() {
    let tree: BaseTree<i32, ()> = [5, 3, 7, 4, 2, 8, 9, 4, 7, 8]
        .into_iter()
        .map(|k| (k, ()))
        .collect();

    let key = |pos| tree.key_value_at(pos).map(|(k, _)| *k);
    assert_eq!(key(tree.lower_bound(&4)), Ok(4));
    assert_eq!(key(tree.lower_bound(&6)), Ok(7));
    assert_eq!(key(tree.upper_bound(&8)), Ok(9));
    assert_eq!(key(tree.upper_bound(&5)), Ok(7));
    assert!(tree.upper_bound(&9).is_end());
    assert_eq!(key(tree.lower_bound(&0)), Ok(2));
}

#[test]
// Display lists the keys in order
fn test_tree_9() {
    use alloc::string::ToString;

    let tree: BaseTree<i32, ()> = [2, 1, 2].into_iter().map(|k| (k, ())).collect();
    assert_eq!(tree.to_string(), "[ 1 2x2 ]");
}

#[test]
// A stress test with inserting and removing against a model
fn test_tree_10() {
    use rand::prelude::*;

    const COUNT: usize = 50000;

    let mut rng = SmallRng::seed_from_u64(9876543210);

    let mut tree = BaseTree::new();
    let mut model: Vec<u16> = Vec::new();
    for _ in 0..COUNT {
        let key = rng.random_range(0..2000u16);
        if rng.random_range(0..3u8) == 0 {
            let removed = tree.remove(&key);
            let index = model.iter().position(|&k| k == key);
            assert_eq!(removed, index.is_some());
            if let Some(index) = index {
                model.swap_remove(index);
            }
        } else {
            tree.insert(key, ());
            model.push(key);
        }
    }

    tree.check();
    assert_eq!(tree.len(), model.len());

    model.sort();
    let mut flattened = Vec::new();
    for (key, _) in tree.iter() {
        for _ in 0..tree.count(key) {
            flattened.push(*key);
        }
    }
    assert_eq!(flattened, model);
}

#[test]
// Removing a key drops its pair straight away, in every removal case
fn test_tree_11() {
    use alloc::rc::Rc;

    let value = Rc::new(0);
    let mut tree = BaseTree::new();
    tree.insert(1, value.clone());
    assert_eq!(Rc::strong_count(&value), 2);
    assert!(tree.remove(&1));
    assert_eq!(Rc::strong_count(&value), 1);

    // Duplicates share one pair, which goes with the last copy
    tree.insert(2, value.clone());
    tree.insert(2, value.clone());
    assert_eq!(Rc::strong_count(&value), 2);
    assert!(tree.remove(&2));
    assert_eq!(Rc::strong_count(&value), 2);
    assert!(tree.remove(&2));
    assert_eq!(Rc::strong_count(&value), 1);

    // Leaf, one child and two children
    let values: Vec<Rc<i32>> = (0..10).map(Rc::new).collect();
    for k in [5, 3, 8, 7, 9, 1] {
        tree.insert(k, values[k].clone());
    }
    for k in [5, 3, 9] {
        assert!(tree.remove(&k));
        assert_eq!(Rc::strong_count(&values[k]), 1);
        tree.check();
    }
    assert_eq!(keys(&tree), [1, 7, 8]);
    for k in [1, 7, 8] {
        assert_eq!(Rc::strong_count(&values[k]), 2);
        assert_eq!(tree.get(&k).map(|(_, v)| **v), Some(k as i32));
    }
}

#[test]
// Positions are detached, so they must be looked up again after the tree is modified
fn test_tree_12() {
    let mut tree: BaseTree<i32, char> = [(5, 'e'), (3, 'c'), (8, 'h'), (7, 'g'), (9, 'i')]
        .into_iter()
        .collect();

    let pos = tree.find(&9).unwrap();
    assert_eq!(tree.key_value_at(pos), Ok((&9, &'i')));

    // Removing 5 moves another node into its slot. `pos` must not be dereferenced from here on,
    // only a fresh lookup is meaningful.
    assert!(tree.remove(&5));
    let pos = tree.find(&9).unwrap();
    assert_eq!(tree.key_value_at(pos), Ok((&9, &'i')));
    assert_eq!(tree.successor(tree.find(&7).unwrap()).map(|p| tree.key(p)), Ok(&8));

    tree.clear();
    assert_eq!(tree.find(&9), Err(ContainerError::KeyNotFound));
    assert!(tree.first().is_end());
}
