//! Doubly linked list, closed into a ring by a sentinel node
//!
//! Nodes live in an arena owned by the list and are addressed by `usize`. Slot `0` is the
//! sentinel: it is created with the list, never holds a value and is never freed. Its `next` link
//! is the first element and its `prev` link is the last element, so an empty list is a sentinel
//! pointing at itself. Removed nodes are put on a recycle chain and reused by later insertions.
//!
//! A `List` is not synchronised; concurrent mutation needs external locking.
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;
use core::{fmt, iter::FusedIterator};

use crate::error::{ContainerError, Result};

//-----------------------------------------------------------------------------------------------//

// Slot of the sentinel node
const NIL: usize = 0;

// A node in the ring. Recycled nodes chain through `next`.
#[derive(Clone)]
struct Link<T> {
    value: Option<T>,
    next: usize,
    prev: usize,
}

//-----------------------------------------------------------------------------------------------//

/// Position of a node in a `List`
///
/// A position is a detached handle: it does not borrow the list, so it can be passed back to
/// mutating methods such as `insert_at` and `erase`. Any structural mutation other than the one
/// the position was passed to may invalidate it, and an invalidated position must not be
/// dereferenced. Doing so is a logic error: freed slots are reused, so it may refer to another
/// element, and after `clear` it may panic. It is never memory unsafe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListPos(usize);

//-----------------------------------------------------------------------------------------------//

/// A doubly linked list with a sentinel node
pub struct List<T> {
    link: Vec<Link<T>>,
    recycle: usize,
    len: usize,
}

impl<T> List<T> {
    /// Construct an empty list
    pub fn new() -> List<T> {
        let mut link = Vec::new();
        link.push(Link {
            value: None,
            next: NIL,
            prev: NIL,
        });

        List {
            link,
            recycle: !0,
            len: 0,
        }
    }

    /// Construct a list of `n` default values
    pub fn with_len(n: usize) -> List<T>
    where
        T: Default,
    {
        let mut list = List::new();
        list.link.reserve(n);
        for _ in 0..n {
            list.push_back(T::default());
        }
        list
    }

    /// Get the number of elements in the list
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The largest number of elements a list can address
    #[inline]
    pub fn max_size(&self) -> usize {
        usize::MAX
    }

    /// Remove every element
    ///
    /// The sentinel is kept and the arena is released.
    pub fn clear(&mut self) {
        self.link.truncate(1);
        self.link[NIL].next = NIL;
        self.link[NIL].prev = NIL;
        self.recycle = !0;
        self.len = 0;
    }

    /// Insert a value before the element currently at `index`
    ///
    /// `index == len` appends. Any larger index, including what would be a negative index
    /// converted to `usize`, is rejected by returning `false`.
    pub fn insert(&mut self, index: usize, value: T) -> bool {
        if index > self.len {
            return false;
        }

        let x = self.node_at(index);
        self.insert_node(x, value);
        true
    }

    /// Get the element at `index`
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(ContainerError::OutOfRange {
                index,
                len: self.len,
            });
        }

        let x = self.node_at(index);
        self.link[x].value.as_ref().ok_or(ContainerError::SentinelDereference)
    }

    /// Get a mutable reference to the element at `index`
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(ContainerError::OutOfRange {
                index,
                len: self.len,
            });
        }

        let x = self.node_at(index);
        self.link[x].value.as_mut().ok_or(ContainerError::SentinelDereference)
    }

    /// Replace the element at `index`, returning `false` if the index is out of range
    pub fn set(&mut self, index: usize, value: T) -> bool {
        if index >= self.len {
            return false;
        }

        let x = self.node_at(index);
        self.link[x].value = Some(value);
        true
    }

    /// Find the index of the first element equal to `value`
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    /// Check if any element equals `value`
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Remove the first element equal to `value`
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let mut x = self.link[NIL].next;
        while x != NIL {
            if self.link[x].value.as_ref() == Some(value) {
                self.remove_node(x);
                return true;
            }
            x = self.link[x].next;
        }
        false
    }

    /// Remove the element at `index`, returning `false` if the index is out of range
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }

        let x = self.node_at(index);
        self.remove_node(x).is_some()
    }

    /// Get the first element
    pub fn front(&self) -> Result<&T> {
        self.link[self.link[NIL].next]
            .value
            .as_ref()
            .ok_or(ContainerError::Empty { container: "list" })
    }

    /// Get the last element
    pub fn back(&self) -> Result<&T> {
        self.link[self.link[NIL].prev]
            .value
            .as_ref()
            .ok_or(ContainerError::Empty { container: "list" })
    }

    /// Append an element
    pub fn push_back(&mut self, value: T) {
        self.insert_node(NIL, value);
    }

    /// Prepend an element
    pub fn push_front(&mut self, value: T) {
        let first = self.link[NIL].next;
        self.insert_node(first, value);
    }

    /// Remove the last element. Does nothing on an empty list.
    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.link[NIL].prev;
        self.remove_node(last)
    }

    /// Remove the first element. Does nothing on an empty list.
    pub fn pop_front(&mut self) -> Option<T> {
        let first = self.link[NIL].next;
        self.remove_node(first)
    }

    /// Exchange the contents of two lists
    pub fn swap(&mut self, other: &mut List<T>) {
        core::mem::swap(self, other);
    }

    //-------------------------------------------------------------------------------------------//

    /// Position of the first element, or `end()` if the list is empty
    #[inline]
    pub fn begin(&self) -> ListPos {
        ListPos(self.link[NIL].next)
    }

    /// Position of the sentinel
    #[inline]
    pub fn end(&self) -> ListPos {
        ListPos(NIL)
    }

    /// Position after `pos`. Advancing the last element gives `end()`, and advancing `end()`
    /// gives the first element.
    #[inline]
    pub fn next_pos(&self, pos: ListPos) -> ListPos {
        ListPos(self.link[pos.0].next)
    }

    /// Position before `pos`. Retreating from `end()` gives the last element.
    #[inline]
    pub fn prev_pos(&self, pos: ListPos) -> ListPos {
        ListPos(self.link[pos.0].prev)
    }

    /// Get the element at a position. Fails at `end()`.
    pub fn value_at(&self, pos: ListPos) -> Result<&T> {
        self.link[pos.0]
            .value
            .as_ref()
            .ok_or(ContainerError::SentinelDereference)
    }

    /// Insert a value before `pos`, returning the position of the new element
    pub fn insert_at(&mut self, pos: ListPos, value: T) -> ListPos {
        ListPos(self.insert_node(pos.0, value))
    }

    /// Erase the element at `pos` and move `pos` to the following element
    ///
    /// Returns `false` and leaves `pos` unchanged when `pos` is `end()`.
    pub fn erase(&mut self, pos: &mut ListPos) -> bool {
        if pos.0 == NIL {
            return false;
        }

        let next = self.link[pos.0].next;
        if self.remove_node(pos.0).is_none() {
            return false;
        }
        *pos = ListPos(next);
        true
    }

    /// Insert every value before `pos`, keeping their order. Returns `pos`.
    pub fn insert_many<I>(&mut self, pos: ListPos, values: I) -> ListPos
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.insert_node(pos.0, value);
        }
        pos
    }

    /// Append every value, keeping their order
    pub fn insert_many_back<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.push_back(value);
        }
    }

    /// Prepend every value in turn, so the last value supplied ends up first
    pub fn insert_many_front<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.push_front(value);
        }
    }

    //-------------------------------------------------------------------------------------------//

    /// Merge another sorted list into this sorted list
    ///
    /// Both lists should be in ascending order. An element of `other` is placed before the
    /// current element of `self` only if it is strictly less, so equal elements keep the
    /// elements of `self` first. `other` is left empty.
    pub fn merge(&mut self, other: &mut List<T>)
    where
        T: PartialOrd,
    {
        tracing::trace!(len = self.len, other = other.len, "merging lists");

        let mut x = self.link[NIL].next;
        while !other.is_empty() {
            if x == NIL {
                // Everything left in `other` sorts after this list
                while let Some(value) = other.pop_front() {
                    self.push_back(value);
                }
                break;
            }

            let take = match (other.front(), &self.link[x].value) {
                (Ok(a), Some(b)) => a < b,
                _ => false,
            };

            if take {
                if let Some(value) = other.pop_front() {
                    self.insert_node(x, value);
                }
            } else {
                x = self.link[x].next;
            }
        }
    }

    /// Move the elements of `other` from `pos` onwards to the end of this list
    ///
    /// `pos` must be a position in `other`. Elements of `other` before `pos` stay where they are.
    pub fn splice(&mut self, pos: ListPos, other: &mut List<T>) {
        let mut x = pos.0;
        let mut moved = 0usize;
        while x != NIL {
            let next = other.link[x].next;
            if let Some(value) = other.remove_node(x) {
                self.push_back(value);
                moved += 1;
            }
            x = next;
        }

        tracing::trace!(moved, len = self.len, "spliced list");
    }

    /// Reverse the order of the elements in place
    ///
    /// The tail is repeatedly relinked in front of what was the first element.
    pub fn reverse(&mut self) {
        if self.len < 2 {
            return;
        }

        let first = self.link[NIL].next;
        for _ in 0..self.len - 1 {
            let tail = self.link[NIL].prev;
            self.unlink(tail);
            self.link_before(first, tail);
        }
    }

    /// Remove consecutive duplicate elements, keeping the first of each run
    pub fn unique(&mut self)
    where
        T: PartialEq,
    {
        let mut x = self.link[NIL].next;
        while x != NIL {
            let y = self.link[x].next;
            if y != NIL && self.link[y].value == self.link[x].value {
                self.remove_node(y);
            } else {
                x = y;
            }
        }
    }

    /// Sort the elements in ascending order
    ///
    /// A quicksort that relinks nodes instead of swapping values. The pivot is the last node of
    /// a range and every node greater than it is moved to just after it, in its original order,
    /// so the sort is stable. Ranges are kept on an explicit stack rather than recursing.
    pub fn sort(&mut self)
    where
        T: PartialOrd,
    {
        if self.len < 2 {
            return;
        }

        tracing::trace!(len = self.len, "sorting list");

        let mut ranges = Vec::new();
        ranges.push((self.link[NIL].next, self.link[NIL].prev));

        while let Some((first, last)) = ranges.pop() {
            if first == last {
                continue;
            }

            // The nodes bounding the range do not move
            let before = self.link[first].prev;
            let after = self.link[last].next;

            let pivot = self.partition(first, last);

            let left = self.link[before].next;
            if left != pivot {
                ranges.push((left, self.link[pivot].prev));
            }

            let right = self.link[pivot].next;
            if right != after {
                ranges.push((right, self.link[after].prev));
            }
        }
    }

    //-------------------------------------------------------------------------------------------//

    /// Cursor at the first element
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor {
            list: self,
            node: self.link[NIL].next,
        }
    }

    /// Cursor at the sentinel
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor {
            list: self,
            node: NIL,
        }
    }

    /// Cursor at a given position
    pub fn cursor_at(&self, pos: ListPos) -> Cursor<'_, T> {
        Cursor {
            list: self,
            node: pos.0,
        }
    }

    /// Reverse cursor at the last element
    pub fn rcursor(&self) -> ReverseCursor<'_, T> {
        ReverseCursor(Cursor {
            list: self,
            node: self.link[NIL].prev,
        })
    }

    /// Reverse cursor at the sentinel
    pub fn rcursor_end(&self) -> ReverseCursor<'_, T> {
        ReverseCursor(self.cursor_end())
    }

    /// Iterate over the elements from front to back
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            head: self.link[NIL].next,
            tail: self.link[NIL].prev,
            count: self.len,
        }
    }

    //-------------------------------------------------------------------------------------------//

    // Find the node at an index, walking from whichever end is closer. `len` gives the sentinel.
    fn node_at(&self, index: usize) -> usize {
        debug_assert!(index <= self.len);

        if index <= self.len / 2 {
            let mut x = self.link[NIL].next;
            for _ in 0..index {
                x = self.link[x].next;
            }
            x
        } else {
            let mut x = NIL;
            for _ in index..self.len {
                x = self.link[x].prev;
            }
            x
        }
    }

    // Allocate a node and link it before `p`
    fn insert_node(&mut self, p: usize, value: T) -> usize {
        let x = self.alloc(value);
        self.link_before(p, x);
        self.len += 1;
        x
    }

    // Unlink a node and free it. The sentinel and recycled nodes give `None`.
    fn remove_node(&mut self, x: usize) -> Option<T> {
        if x == NIL {
            return None;
        }

        let value = self.link[x].value.take()?;
        self.unlink(x);
        self.free(x);
        self.len -= 1;
        Some(value)
    }

    // Splice a detached node in before `p`
    fn link_before(&mut self, p: usize, x: usize) {
        let q = self.link[p].prev;
        self.link[x].next = p;
        self.link[x].prev = q;
        self.link[q].next = x;
        self.link[p].prev = x;
    }

    // Detach a node from its neighbours without freeing it
    fn unlink(&mut self, x: usize) {
        debug_assert_ne!(x, NIL);

        let p = self.link[x].prev;
        let n = self.link[x].next;
        self.link[p].next = n;
        self.link[n].prev = p;
    }

    // Partition `[first, last]` around `last`, returning the pivot
    fn partition(&mut self, first: usize, last: usize) -> usize
    where
        T: PartialOrd,
    {
        let pivot = last;
        let anchor = self.link[last].next;

        let mut x = first;
        while x != pivot {
            let next = self.link[x].next;
            let greater = match (&self.link[pivot].value, &self.link[x].value) {
                (Some(p), Some(v)) => p < v,
                _ => false,
            };

            if greater {
                self.unlink(x);
                self.link_before(anchor, x);
            }
            x = next;
        }

        pivot
    }

    // Take a node from the recycle chain, or grow the arena
    fn alloc(&mut self, value: T) -> usize {
        let x = self.recycle;
        if !x != 0 {
            self.recycle = self.link[x].next;
            self.link[x].value = Some(value);
            return x;
        }

        let x = self.link.len();
        self.link.push(Link {
            value: Some(value),
            next: NIL,
            prev: NIL,
        });
        x
    }

    // Put a detached node on the recycle chain
    fn free(&mut self, x: usize) {
        debug_assert!(self.link[x].value.is_none());

        self.link[x].next = self.recycle;
        self.link[x].prev = !0;
        self.recycle = x;
    }

    // Check the ring links and the element count
    #[cfg(test)]
    fn check(&self) {
        let mut x = self.link[NIL].next;
        let mut count = 0;
        while x != NIL {
            assert_eq!(self.link[self.link[x].next].prev, x);
            assert_eq!(self.link[self.link[x].prev].next, x);
            assert!(self.link[x].value.is_some());
            count += 1;
            x = self.link[x].next;
        }
        assert_eq!(count, self.len);
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        List::new()
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        let mut list = List::new();
        list.link.reserve(self.len);
        for value in self.iter() {
            list.push_back(value.clone());
        }
        list
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        for value in self.iter() {
            write!(f, "{value} ")?;
        }
        write!(f, "]")?;
        Ok(())
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.insert_many_back(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_many_back(iter);
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

//-----------------------------------------------------------------------------------------------//

/// A forward cursor over a `List`
///
/// The cursor can always move: stepping past the last element lands on the sentinel, and stepping
/// again wraps around to the first element. Only reading the sentinel fails.
pub struct Cursor<'a, T> {
    list: &'a List<T>,
    node: usize,
}

impl<'a, T> Cursor<'a, T> {
    /// Get the element under the cursor
    pub fn get(&self) -> Result<&'a T> {
        self.list.value_at(ListPos(self.node))
    }

    /// Step to the next node
    pub fn move_next(&mut self) {
        self.node = self.list.link[self.node].next;
    }

    /// Step to the previous node
    pub fn move_prev(&mut self) {
        self.node = self.list.link[self.node].prev;
    }

    /// Check if the cursor is on the sentinel
    pub fn is_end(&self) -> bool {
        self.node == NIL
    }

    /// Detach the position of the cursor
    pub fn position(&self) -> ListPos {
        ListPos(self.node)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.list, other.list) && self.node == other.node
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.node).finish()
    }
}

//-----------------------------------------------------------------------------------------------//

/// A cursor over a `List` that runs from back to front
pub struct ReverseCursor<'a, T>(Cursor<'a, T>);

impl<'a, T> ReverseCursor<'a, T> {
    /// Get the element under the cursor
    pub fn get(&self) -> Result<&'a T> {
        self.0.get()
    }

    /// Step towards the front
    pub fn move_next(&mut self) {
        self.0.move_prev();
    }

    /// Step towards the back
    pub fn move_prev(&mut self) {
        self.0.move_next();
    }

    /// Check if the cursor is on the sentinel
    pub fn is_end(&self) -> bool {
        self.0.is_end()
    }

    /// Detach the position of the cursor
    pub fn position(&self) -> ListPos {
        self.0.position()
    }
}

impl<T> Clone for ReverseCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ReverseCursor<'_, T> {}

impl<T> PartialEq for ReverseCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for ReverseCursor<'_, T> {}

impl<T> fmt::Debug for ReverseCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReverseCursor").field(&self.0.node).finish()
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `List`
pub struct Iter<'a, T> {
    list: &'a List<T>,
    head: usize,
    tail: usize,
    count: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.count == 0 {
            return None;
        }

        let x = self.head;
        self.head = self.list.link[x].next;
        self.count -= 1;

        self.list.link[x].value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.count == 0 {
            return None;
        }

        let x = self.tail;
        self.tail = self.list.link[x].prev;
        self.count -= 1;

        self.list.link[x].value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over a `List`
pub struct IntoIter<T>(List<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.0.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
fn collect<T: Clone>(list: &List<T>) -> Vec<T> {
    list.iter().cloned().collect()
}

#[test]
// Index based insertion, including the boundary at `len`
fn test_list_0() {
    use alloc::vec;

    let mut list = List::new();
    assert!(list.insert(0, 1));
    assert!(list.insert(1, 3));
    assert!(list.insert(1, 2));
    assert_eq!(collect(&list), vec![1, 2, 3]);

    // Appending at `len` succeeds, past it fails
    assert!(list.insert(3, 4));
    assert!(!list.insert(5, 9));
    assert_eq!(list.len(), 4);

    // A negative index wraps to a huge one and is rejected
    let index = -1i64 as usize;
    assert!(!list.insert(index, 0));
    assert_eq!(list.len(), 4);
    list.check();
}

#[test]
// Indexed reads and writes fail at `len` and beyond
fn test_list_1() {
    let mut list: List<i32> = [10, 20, 30].into_iter().collect();

    assert_eq!(list.get(0), Ok(&10));
    assert_eq!(list.get(2), Ok(&30));
    assert_eq!(
        list.get(3),
        Err(ContainerError::OutOfRange { index: 3, len: 3 })
    );

    assert!(list.set(1, 25));
    assert!(!list.set(3, 40));
    assert_eq!(list.get(1), Ok(&25));

    assert!(!list.remove_at(3));
    assert!(list.remove_at(0));
    assert_eq!(list.get(0), Ok(&25));

    assert!(list.remove(&30));
    assert!(!list.remove(&30));
    assert_eq!(list.len(), 1);

    assert_eq!(list.index_of(&25), Some(0));
    assert_eq!(list.index_of(&99), None);
    assert!(list.contains(&25));
    list.check();
}

#[test]
// Access to the ends of an empty list fails, popping does nothing
fn test_list_2() {
    let mut list: List<i32> = List::new();

    assert_eq!(list.front(), Err(ContainerError::Empty { container: "list" }));
    assert_eq!(list.back(), Err(ContainerError::Empty { container: "list" }));
    assert_eq!(list.pop_back(), None);
    assert_eq!(list.pop_front(), None);
    assert!(list.is_empty());

    list.push_back(2);
    list.push_front(1);
    assert_eq!(list.front(), Ok(&1));
    assert_eq!(list.back(), Ok(&2));
}

#[test]
// First in, first out
fn test_list_3() {
    let mut list = List::new();
    for i in 0..100 {
        list.push_back(i);
    }
    for i in 0..60 {
        assert_eq!(list.pop_front(), Some(i));
    }
    assert_eq!(list.len(), 40);
    assert_eq!(list.front(), Ok(&60));
    list.check();
}

#[test]
// Cursors reach the sentinel from either side and come back
fn test_list_4() {
    let list: List<i32> = [1, 2, 3].into_iter().collect();

    let mut cursor = list.cursor();
    assert_eq!(cursor.get(), Ok(&1));
    cursor.move_next();
    cursor.move_next();
    assert_eq!(cursor.get(), Ok(&3));
    cursor.move_next();
    assert!(cursor.is_end());
    assert_eq!(cursor, list.cursor_end());
    assert_eq!(cursor.get(), Err(ContainerError::SentinelDereference));

    // Decrementing the end gives the last element
    cursor.move_prev();
    assert_eq!(cursor.get(), Ok(&3));

    // Wrapping past the end gives the first element
    let mut cursor = list.cursor_end();
    cursor.move_next();
    assert_eq!(cursor, list.cursor());

    let mut reverse = list.rcursor();
    assert_eq!(reverse.get(), Ok(&3));
    reverse.move_next();
    assert_eq!(reverse.get(), Ok(&2));
    reverse.move_next();
    reverse.move_next();
    assert_eq!(reverse, list.rcursor_end());
    reverse.move_prev();
    assert_eq!(reverse.get(), Ok(&1));
}

#[test]
// Position based insertion and erasure
fn test_list_5() {
    use alloc::vec;

    let mut list: List<i32> = [1, 2, 4].into_iter().collect();

    let mut pos = list.next_pos(list.next_pos(list.begin()));
    let new = list.insert_at(pos, 3);
    assert_eq!(list.value_at(new), Ok(&3));
    assert_eq!(collect(&list), vec![1, 2, 3, 4]);

    assert!(list.erase(&mut pos));
    assert_eq!(pos, list.end());
    assert_eq!(collect(&list), vec![1, 2, 3]);

    // Erasing the sentinel is refused
    assert!(!list.erase(&mut pos));
    assert_eq!(list.len(), 3);

    let mut pos = list.begin();
    assert!(list.erase(&mut pos));
    assert_eq!(list.value_at(pos), Ok(&2));
    list.check();
}

#[test]
// Bulk insertion
fn test_list_6() {
    use alloc::vec;

    let mut list: List<i32> = [1, 5].into_iter().collect();
    let pos = list.next_pos(list.begin());
    list.insert_many(pos, [2, 3, 4]);
    assert_eq!(collect(&list), vec![1, 2, 3, 4, 5]);

    list.insert_many_back([6, 7]);
    list.insert_many_front([0, -1]);
    assert_eq!(collect(&list), vec![-1, 0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
// Copies are deep and moving out leaves an empty list
fn test_list_7() {
    let mut list: List<i32> = [1, 2, 3].into_iter().collect();

    let mut copy = list.clone();
    copy.pop_back();
    assert_eq!(list.len(), 3);
    assert_eq!(copy.len(), 2);

    let moved = core::mem::take(&mut list);
    assert_eq!(moved.len(), 3);
    assert!(list.is_empty());
    assert_eq!(list.front(), Err(ContainerError::Empty { container: "list" }));
    assert_eq!(list.back(), Err(ContainerError::Empty { container: "list" }));
    assert_eq!(
        list.get(0),
        Err(ContainerError::OutOfRange { index: 0, len: 0 })
    );

    let mut other: List<i32> = [9].into_iter().collect();
    list.swap(&mut other);
    assert_eq!(list.front(), Ok(&9));
    assert!(other.is_empty());
}

#[test]
// Merging sorted lists keeps them sorted and empties the other
fn test_list_8() {
    use alloc::vec;

    let mut list: List<i32> = [1, 3, 7].into_iter().collect();
    let mut other: List<i32> = [0, 2, 6, 9].into_iter().collect();
    list.merge(&mut other);
    assert_eq!(collect(&list), vec![0, 1, 2, 3, 6, 7, 9]);
    assert!(other.is_empty());

    let mut list: List<i32> = List::new();
    let mut other: List<i32> = [0, 2, 6, 9].into_iter().collect();
    list.merge(&mut other);
    assert_eq!(collect(&list), vec![0, 2, 6, 9]);

    // Several smaller elements in a row go before the same element
    let mut list: List<i32> = [5].into_iter().collect();
    let mut other: List<i32> = [1, 2].into_iter().collect();
    list.merge(&mut other);
    assert_eq!(collect(&list), vec![1, 2, 5]);
    list.check();
}

#[test]
// Ties during a merge keep the receiving list's element first
fn test_list_9() {
    use alloc::vec;

    // Compare on the number alone
    #[derive(Clone, Debug, PartialEq)]
    struct Key(i32, char);
    impl PartialOrd for Key {
        fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
            self.0.partial_cmp(&other.0)
        }
    }

    let mut list: List<Key> = [Key(1, 'a'), Key(2, 'a')].into_iter().collect();
    let mut other: List<Key> = [Key(1, 'b'), Key(2, 'b')].into_iter().collect();
    list.merge(&mut other);

    let order: Vec<char> = list.iter().map(|k| k.1).collect();
    assert_eq!(order, vec!['a', 'b', 'a', 'b']);
    assert!(other.is_empty());
}

#[test]
// Splicing moves the tail of another list
fn test_list_10() {
    use alloc::vec;

    let mut list: List<i32> = [1, 2, 3].into_iter().collect();
    let mut other: List<i32> = [4, 3, 2, 1].into_iter().collect();

    let pos = other.next_pos(other.next_pos(other.begin()));
    list.splice(pos, &mut other);

    assert_eq!(collect(&list), vec![1, 2, 3, 2, 1]);
    assert_eq!(collect(&other), vec![4, 3]);

    let pos = other.begin();
    list.splice(pos, &mut other);
    assert!(other.is_empty());
    assert_eq!(list.len(), 7);
    list.check();
    other.check();
}

#[test]
// Reversal, including of an empty list
fn test_list_11() {
    use alloc::vec;

    let mut list: List<i32> = (1..=5).collect();
    list.reverse();
    assert_eq!(collect(&list), vec![5, 4, 3, 2, 1]);
    list.reverse();
    assert_eq!(collect(&list), vec![1, 2, 3, 4, 5]);

    let mut empty: List<i32> = List::new();
    empty.reverse();
    assert!(empty.is_empty());
    list.check();
}

#[test]
// Only adjacent duplicates are removed
fn test_list_12() {
    use alloc::vec;

    let mut list: List<i32> = [1, 2, 3, 3, 5, 1, 1, 1, 4, 5].into_iter().collect();
    list.unique();
    assert_eq!(collect(&list), vec![1, 2, 3, 5, 1, 4, 5]);
    list.check();
}

#[test]
// Sorting small and degenerate lists
fn test_list_13() {
    use alloc::vec;

    let mut list: List<i32> = [1, 2, 3, 3, 5, 1, 1, 1, 4, 5].into_iter().collect();
    list.sort();
    assert_eq!(collect(&list), vec![1, 1, 1, 1, 2, 3, 3, 4, 5, 5]);

    let mut empty: List<i32> = List::new();
    empty.sort();
    assert!(empty.is_empty());

    let mut single: List<i32> = [7].into_iter().collect();
    single.sort();
    assert_eq!(collect(&single), vec![7]);

    let mut descending: List<i32> = (0..50).rev().collect();
    descending.sort();
    assert_eq!(collect(&descending), (0..50).collect::<Vec<_>>());
    descending.check();
}

#[test]
// Sorting is stable
fn test_list_14() {
    #[derive(Clone, Debug, PartialEq)]
    struct Key(u8, usize);
    impl PartialOrd for Key {
        fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
            self.0.partial_cmp(&other.0)
        }
    }

    let keys = [3u8, 1, 2, 3, 1, 2, 2, 3, 1, 0];
    let mut list: List<Key> = keys.iter().enumerate().map(|(i, &k)| Key(k, i)).collect();
    list.sort();

    let mut expected: Vec<Key> = keys.iter().enumerate().map(|(i, &k)| Key(k, i)).collect();
    expected.sort_by_key(|k| k.0);
    assert_eq!(collect(&list), expected);
}

#[test]
// A stress test of sorting against a model
fn test_list_15() {
    use rand::prelude::*;

    const COUNT: usize = 5000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut list = List::new();
    let mut model = Vec::new();
    for _ in 0..COUNT {
        let value = rng.random_range(0..500u32);
        list.push_back(value);
        model.push(value);
    }

    list.sort();
    model.sort();
    assert_eq!(collect(&list), model);
    list.check();
}

#[test]
// A stress test of mixed operations against a model
fn test_list_16() {
    use rand::prelude::*;

    const COUNT: usize = 20000;

    let mut rng = SmallRng::seed_from_u64(5678901234);

    let mut list = List::new();
    let mut model: Vec<u32> = Vec::new();
    for _ in 0..COUNT {
        let value = rng.random_range(0..1000u32);
        match rng.random_range(0..6u8) {
            0 => {
                list.push_back(value);
                model.push(value);
            }
            1 => {
                list.push_front(value);
                model.insert(0, value);
            }
            2 => {
                assert_eq!(list.pop_back(), model.pop());
            }
            3 => {
                let expected = if model.is_empty() {
                    None
                } else {
                    Some(model.remove(0))
                };
                assert_eq!(list.pop_front(), expected);
            }
            4 => {
                let index = rng.random_range(0..=model.len());
                assert!(list.insert(index, value));
                model.insert(index, value);
            }
            _ => {
                if !model.is_empty() {
                    let index = rng.random_range(0..model.len());
                    assert!(list.remove_at(index));
                    model.remove(index);
                }
            }
        }
    }

    assert_eq!(collect(&list), model);
    let backwards: Vec<u32> = list.iter().rev().cloned().collect();
    model.reverse();
    assert_eq!(backwards, model);
    list.check();
}

#[test]
// Display lists the values in order
fn test_list_17() {
    use alloc::string::ToString;

    let list: List<i32> = [3, 1, 2].into_iter().collect();
    assert_eq!(list.to_string(), "[ 3 1 2 ]");
    assert_eq!(List::<i32>::new().to_string(), "[ ]");
}

#[test]
// Positions are detached, so they must be taken again after the list is modified elsewhere
fn test_list_18() {
    let mut list: List<i32> = [1, 2, 3].into_iter().collect();

    // A position passed to `erase` is moved on and stays usable
    let mut pos = list.next_pos(list.begin());
    assert_eq!(list.value_at(pos), Ok(&2));
    assert!(list.erase(&mut pos));
    assert_eq!(list.value_at(pos), Ok(&3));

    // A position kept across another mutation must not be dereferenced. The freed slot is reused
    // here, so the old position now names the new element instead of the erased one.
    let stale = list.begin();
    assert!(list.remove(&1));
    list.push_back(4);
    assert_eq!(list.value_at(stale), Ok(&4));
    assert_eq!(list.value_at(list.begin()), Ok(&3));

    // After clearing, only `end()` and positions from fresh insertions are meaningful
    list.clear();
    assert_eq!(list.begin(), list.end());
    let pos = list.insert_at(list.end(), 5);
    assert_eq!(list.value_at(pos), Ok(&5));
}
