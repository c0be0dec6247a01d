//! Growable array with an explicit, geometric growth policy
//!
//! The buffer is reallocated to exactly the reported capacity: `1` on the first insertion, then
//! double the length whenever an insertion finds it full. `reserve` and `shrink_to_fit`
//! reallocate to exactly the capacity asked for.
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;
use core::{
    fmt,
    iter::FusedIterator,
    ops::{Index, IndexMut},
};

use crate::error::{ContainerError, Result};

//-----------------------------------------------------------------------------------------------//

/// A contiguous growable array
///
/// A `Vector` is not synchronised; concurrent mutation needs external locking.
pub struct Vector<T> {
    buf: Vec<T>,
    capacity: usize,
}

impl<T> Vector<T> {
    /// Construct an empty vector without allocating
    pub fn new() -> Vector<T> {
        Vector {
            buf: Vec::new(),
            capacity: 0,
        }
    }

    /// Construct an empty vector with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Vector<T> {
        Vector {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Construct a vector of `len` default values, with no spare capacity
    pub fn with_len(len: usize) -> Vector<T>
    where
        T: Default,
    {
        let mut buf = Vec::with_capacity(len);
        buf.resize_with(len, T::default);
        Vector { buf, capacity: len }
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the vector is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Get the number of elements the vector can hold before it reallocates
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the largest number of elements a vector could hold
    pub fn max_size(&self) -> usize {
        isize::MAX as usize / core::mem::size_of::<T>().max(1)
    }

    /// Get an element, failing if `pos` is not less than the length
    pub fn at(&self, pos: usize) -> Result<&T> {
        let len = self.len();
        self.buf
            .get(pos)
            .ok_or(ContainerError::OutOfRange { index: pos, len })
    }

    /// Get a mutable element, failing if `pos` is not less than the length
    pub fn at_mut(&mut self, pos: usize) -> Result<&mut T> {
        let len = self.len();
        self.buf
            .get_mut(pos)
            .ok_or(ContainerError::OutOfRange { index: pos, len })
    }

    /// Get the first element, failing if the vector is empty
    pub fn front(&self) -> Result<&T> {
        self.buf.first().ok_or(ContainerError::Empty {
            container: "vector",
        })
    }

    /// Get the last element, failing if the vector is empty
    pub fn back(&self) -> Result<&T> {
        self.buf.last().ok_or(ContainerError::Empty {
            container: "vector",
        })
    }

    /// View the elements as a slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    /// View the elements as a mutable slice
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf
    }

    /// Reallocate to exactly `capacity` if that is more than the current capacity
    pub fn reserve(&mut self, capacity: usize) {
        if capacity > self.capacity {
            self.reallocate(capacity);
        }
    }

    /// Reallocate to exactly the current length
    pub fn shrink_to_fit(&mut self) {
        if self.len() < self.capacity {
            self.reallocate(self.len());
        }
    }

    /// Remove every element, keeping the capacity
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Insert before the element at `pos`, shifting it and everything after it along
    ///
    /// `pos` may equal the length, which appends. Returns the position of the new element.
    pub fn insert(&mut self, pos: usize, value: T) -> Result<usize> {
        let len = self.len();
        if pos > len {
            return Err(ContainerError::InvalidPosition { index: pos, len });
        }

        self.push_back(value);
        self.buf[pos..].rotate_right(1);
        Ok(pos)
    }

    /// Remove the element at `pos`, shifting everything after it back
    ///
    /// Returns `false` if there is no element at `pos`.
    pub fn erase(&mut self, pos: usize) -> bool {
        if pos >= self.len() {
            return false;
        }

        self.buf[pos..].rotate_left(1);
        self.buf.pop();
        true
    }

    /// Append an element, growing the buffer if it is full
    pub fn push_back(&mut self, value: T) {
        if self.len() == self.capacity {
            self.grow();
        }
        self.buf.push(value);
    }

    /// Remove and return the last element; does nothing on an empty vector
    pub fn pop_back(&mut self) -> Option<T> {
        self.buf.pop()
    }

    /// Exchange the contents of two vectors
    pub fn swap(&mut self, other: &mut Vector<T>) {
        core::mem::swap(self, other);
    }

    /// Insert the values in order before the element at `pos`
    ///
    /// Returns the position of the first inserted value. Fails without inserting anything if `pos`
    /// is greater than the length.
    pub fn insert_many<I>(&mut self, pos: usize, values: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
    {
        let len = self.len();
        if pos > len {
            return Err(ContainerError::InvalidPosition { index: pos, len });
        }

        for (i, value) in values.into_iter().enumerate() {
            self.insert(pos + i, value)?;
        }
        Ok(pos)
    }

    /// Append the values in order
    pub fn insert_many_back<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.push_back(value);
        }
    }

    /// Iterate over the elements
    pub fn iter(&self) -> VectorIter<'_, T> {
        VectorIter {
            slice: &self.buf,
            head: 0,
            tail: self.buf.len(),
        }
    }

    /// Iterate over mutable references to the elements
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.buf.iter_mut()
    }

    fn grow(&mut self) {
        let capacity = if self.capacity == 0 { 1 } else { 2 * self.len() };
        self.reallocate(capacity);
    }

    // Move the elements into a fresh buffer of exactly `capacity`
    fn reallocate(&mut self, capacity: usize) {
        debug_assert!(capacity >= self.len());
        tracing::trace!(from = self.capacity, to = capacity, "reallocating vector");

        let mut buf = Vec::with_capacity(capacity);
        buf.append(&mut self.buf);
        self.buf = buf;
        self.capacity = capacity;
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Vector::new()
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        let mut buf = Vec::with_capacity(self.capacity);
        buf.extend_from_slice(&self.buf);
        Vector {
            buf,
            capacity: self.capacity,
        }
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.buf.iter()).finish()
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, pos: usize) -> &T {
        &self.buf[pos]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, pos: usize) -> &mut T {
        &mut self.buf[pos]
    }
}

impl<T> FromIterator<T> for Vector<T> {
    /// Collects into a vector with no spare capacity
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let buf: Vec<T> = iter.into_iter().collect();
        let mut vector = Vector::with_capacity(buf.len());
        vector.buf.extend(buf);
        vector
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_many_back(iter);
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = VectorIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = alloc::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

//-----------------------------------------------------------------------------------------------//

/// Random access iterator over a `Vector`
///
/// Besides stepping from either end it can skip ahead with `nth` or `nth_back` in O(1), and
/// read any remaining element by its offset from the front without consuming anything.
#[derive(Clone)]
pub struct VectorIter<'a, T> {
    slice: &'a [T],
    head: usize,
    tail: usize,
}

impl<'a, T> VectorIter<'a, T> {
    /// Get the remaining element at `offset` from the front
    pub fn get(&self, offset: usize) -> Option<&'a T> {
        self.as_slice().get(offset)
    }

    /// View the remaining elements as a slice
    pub fn as_slice(&self) -> &'a [T] {
        &self.slice[self.head..self.tail]
    }
}

impl<'a, T> Iterator for VectorIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.head == self.tail {
            return None;
        }

        let x = &self.slice[self.head];
        self.head += 1;
        Some(x)
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.tail - self.head {
            self.head = self.tail;
            return None;
        }

        self.head += n;
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.tail - self.head;
        (n, Some(n))
    }
}

impl<T> DoubleEndedIterator for VectorIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }

        self.tail -= 1;
        Some(&self.slice[self.tail])
    }

    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.tail - self.head {
            self.tail = self.head;
            return None;
        }

        self.tail -= n;
        self.next_back()
    }
}

impl<T> ExactSizeIterator for VectorIter<'_, T> {}

impl<T> FusedIterator for VectorIter<'_, T> {}

//-----------------------------------------------------------------------------------------------//

#[test]
// Capacity doubles only when full
fn test_vector_0() {
    use alloc::vec;

    let mut v = Vector::new();
    assert_eq!(v.capacity(), 0);

    let mut capacities = Vec::new();
    for i in 0..5 {
        v.push_back(i);
        capacities.push(v.capacity());
    }
    assert_eq!(capacities, vec![1, 2, 4, 4, 8]);

    v.reserve(6);
    assert_eq!(v.capacity(), 8);
    v.reserve(20);
    assert_eq!(v.capacity(), 20);
    v.shrink_to_fit();
    assert_eq!(v.capacity(), 5);
    assert_eq!(v.as_slice(), &[0, 1, 2, 3, 4]);

    v.clear();
    assert!(v.is_empty());
    assert_eq!(v.capacity(), 5);
}

#[test]
// Bounds checks
fn test_vector_1() {
    let mut v: Vector<i32> = [1, 2, 3].into_iter().collect();
    assert_eq!(v.capacity(), 3);

    assert_eq!(v.at(2), Ok(&3));
    assert_eq!(
        v.at(3),
        Err(ContainerError::OutOfRange { index: 3, len: 3 })
    );
    *v.at_mut(0).unwrap() = 10;
    assert_eq!(v[0], 10);
    v[1] = 20;
    assert_eq!(v.at(1), Ok(&20));

    let empty: Vector<i32> = Vector::new();
    assert_eq!(
        empty.front(),
        Err(ContainerError::Empty {
            container: "vector"
        })
    );
    assert!(empty.back().is_err());
    assert_eq!(v.front(), Ok(&10));
    assert_eq!(v.back(), Ok(&3));
}

#[test]
// Insertion and erasure shift the elements
fn test_vector_2() {
    let mut v: Vector<i32> = [1, 2, 3].into_iter().collect();

    assert_eq!(v.insert(0, 0), Ok(0));
    assert_eq!(v.capacity(), 6);
    assert_eq!(v.insert(4, 4), Ok(4));
    assert_eq!(v.insert(2, 9), Ok(2));
    assert_eq!(v.as_slice(), &[0, 1, 9, 2, 3, 4]);
    assert_eq!(
        v.insert(7, 7),
        Err(ContainerError::InvalidPosition { index: 7, len: 6 })
    );

    assert!(v.erase(2));
    assert!(!v.erase(5));
    assert!(v.erase(4));
    assert_eq!(v.as_slice(), &[0, 1, 2, 3]);

    assert_eq!(v.pop_back(), Some(3));
    let mut empty: Vector<i32> = Vector::new();
    assert_eq!(empty.pop_back(), None);
    assert!(empty.is_empty());
}

#[test]
// Bulk insertion
fn test_vector_3() {
    let mut v: Vector<i32> = [1, 5].into_iter().collect();

    assert_eq!(v.insert_many(1, [2, 3, 4]), Ok(1));
    assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5]);

    v.insert_many_back([6, 7]);
    assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5, 6, 7]);

    assert!(v.insert_many(8, [0]).is_err());
    assert_eq!(v.len(), 7);
}

#[test]
// Copies are deep and moves leave an empty vector
fn test_vector_4() {
    let mut v: Vector<i32> = Vector::new();
    v.insert_many_back([1, 2, 3]);

    let mut copy = v.clone();
    assert_eq!(copy.capacity(), v.capacity());
    copy.pop_back();
    assert_eq!(v.len(), 3);
    assert_eq!(copy.len(), 2);

    let moved = core::mem::take(&mut v);
    assert_eq!(moved.len(), 3);
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), 0);
    assert!(v.front().is_err());
    assert!(v.at(0).is_err());

    let mut other = Vector::with_len(2);
    other.swap(&mut copy);
    assert_eq!(other.as_slice(), &[1, 2]);
    assert_eq!(copy.as_slice(), &[0, 0]);
}

#[test]
// Random access through the iterator
fn test_vector_5() {
    use alloc::vec;

    let v: Vector<i32> = (0..10).collect();

    let mut iter = v.iter();
    assert_eq!(iter.len(), 10);
    assert_eq!(iter.get(3), Some(&3));
    assert_eq!(iter.nth(2), Some(&2));
    assert_eq!(iter.nth_back(2), Some(&7));
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.as_slice(), &[3, 4, 5, 6]);
    assert_eq!(iter.next_back(), Some(&6));
    assert_eq!(iter.collect::<Vec<_>>(), vec![&3, &4, &5]);

    let mut iter = v.iter();
    assert_eq!(iter.nth(10), None);
    assert_eq!(iter.next(), None);

    let mut v = v;
    for x in v.iter_mut() {
        *x *= 2;
    }
    assert_eq!(v.back(), Ok(&18));
}
