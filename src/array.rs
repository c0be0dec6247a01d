//! Fixed size array with checked access
#![warn(missing_docs)]

use core::{
    ops::{Index, IndexMut},
    slice,
};

use crate::error::{ContainerError, Result};

//-----------------------------------------------------------------------------------------------//

/// An array of exactly `N` elements
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Array<T, const N: usize> {
    data: [T; N],
}

impl<T, const N: usize> Array<T, N> {
    /// Construct from a native array
    pub const fn new(data: [T; N]) -> Array<T, N> {
        Array { data }
    }

    /// Get the number of elements, always `N`
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// Check if `N` is zero
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Get the largest number of elements, always `N`
    #[inline]
    pub const fn max_size(&self) -> usize {
        N
    }

    /// Get an element, failing if `pos` is not less than `N`
    pub fn at(&self, pos: usize) -> Result<&T> {
        self.data
            .get(pos)
            .ok_or(ContainerError::OutOfRange { index: pos, len: N })
    }

    /// Get a mutable element, failing if `pos` is not less than `N`
    pub fn at_mut(&mut self, pos: usize) -> Result<&mut T> {
        self.data
            .get_mut(pos)
            .ok_or(ContainerError::OutOfRange { index: pos, len: N })
    }

    /// Get the first element, failing if `N` is zero
    pub fn front(&self) -> Result<&T> {
        self.data.first().ok_or(ContainerError::Empty { container: "array" })
    }

    /// Get the last element, failing if `N` is zero
    pub fn back(&self) -> Result<&T> {
        self.data.last().ok_or(ContainerError::Empty { container: "array" })
    }

    /// Set every element to `value`
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    /// Exchange the contents of two arrays
    pub fn swap(&mut self, other: &mut Array<T, N>) {
        core::mem::swap(&mut self.data, &mut other.data);
    }

    /// View the elements as a slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// View the elements as a mutable slice
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate over the elements
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterate over mutable references to the elements
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Unwrap the native array
    pub fn into_inner(self) -> [T; N] {
        self.data
    }
}

impl<T: Default, const N: usize> Default for Array<T, N> {
    fn default() -> Self {
        Array {
            data: core::array::from_fn(|_| T::default()),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T, N> {
    fn from(data: [T; N]) -> Self {
        Array { data }
    }
}

impl<T, const N: usize> Index<usize> for Array<T, N> {
    type Output = T;

    fn index(&self, pos: usize) -> &T {
        &self.data[pos]
    }
}

impl<T, const N: usize> IndexMut<usize> for Array<T, N> {
    fn index_mut(&mut self, pos: usize) -> &mut T {
        &mut self.data[pos]
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Array<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T, const N: usize> IntoIterator for Array<T, N> {
    type Item = T;
    type IntoIter = core::array::IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

//-----------------------------------------------------------------------------------------------//

#[test]
// Checked access
fn test_array_0() {
    let mut a = Array::new([1, 2, 3]);

    assert_eq!(a.len(), 3);
    assert_eq!(a.at(2), Ok(&3));
    assert_eq!(a.at(3), Err(ContainerError::OutOfRange { index: 3, len: 3 }));
    *a.at_mut(0).unwrap() = 10;
    a[1] = 20;
    assert_eq!(a.front(), Ok(&10));
    assert_eq!(a.back(), Ok(&3));
    assert_eq!(a.as_slice(), &[10, 20, 3]);

    let empty: Array<i32, 0> = Array::default();
    assert!(empty.is_empty());
    assert_eq!(empty.front(), Err(ContainerError::Empty { container: "array" }));
    assert!(empty.back().is_err());
}

#[test]
// Fill, swap and copy
fn test_array_1() {
    let mut a: Array<i32, 4> = Array::default();
    a.fill(7);
    assert!(a.iter().all(|&x| x == 7));

    let mut b = Array::from([1, 2, 3, 4]);
    let copy = b;
    a.swap(&mut b);
    assert_eq!(a, copy);
    assert_eq!(b.as_slice(), &[7; 4]);

    for x in a.iter_mut() {
        *x += 1;
    }
    assert_eq!(a.into_inner(), [2, 3, 4, 5]);
}
