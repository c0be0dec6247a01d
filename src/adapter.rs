//! Stack, queue and double ended queue, each a narrower view of a `List`
#![warn(missing_docs)]

use core::fmt;

use crate::{
    error::{ContainerError, Result},
    list::{Iter, List},
};

// Report an empty list as an empty adapter
fn empty_as<T>(result: Result<T>, container: &'static str) -> Result<T> {
    result.map_err(|_| ContainerError::Empty { container })
}

//-----------------------------------------------------------------------------------------------//

/// A double ended queue
#[derive(Clone, PartialEq, Eq)]
pub struct Deque<T> {
    list: List<T>,
}

impl<T> Deque<T> {
    /// Constructor
    pub fn new() -> Deque<T> {
        Deque { list: List::new() }
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the deque is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Remove every element
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Get the first element, failing if the deque is empty
    pub fn front(&self) -> Result<&T> {
        empty_as(self.list.front(), "deque")
    }

    /// Get the last element, failing if the deque is empty
    pub fn back(&self) -> Result<&T> {
        empty_as(self.list.back(), "deque")
    }

    /// Append an element
    pub fn push_back(&mut self, value: T) {
        self.list.push_back(value);
    }

    /// Prepend an element
    pub fn push_front(&mut self, value: T) {
        self.list.push_front(value);
    }

    /// Remove the last element. Does nothing on an empty deque.
    pub fn pop_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }

    /// Remove the first element. Does nothing on an empty deque.
    pub fn pop_front(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    /// Exchange the contents of two deques
    pub fn swap(&mut self, other: &mut Deque<T>) {
        self.list.swap(&mut other.list);
    }

    /// Iterate from front to back
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }
}

//-----------------------------------------------------------------------------------------------//

/// A last in, first out stack
#[derive(Clone, PartialEq, Eq)]
pub struct Stack<T> {
    list: List<T>,
}

impl<T> Stack<T> {
    /// Constructor
    pub fn new() -> Stack<T> {
        Stack { list: List::new() }
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the stack is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Get the element on top, failing if the stack is empty
    pub fn top(&self) -> Result<&T> {
        empty_as(self.list.back(), "stack")
    }

    /// Put an element on top
    pub fn push(&mut self, value: T) {
        self.list.push_back(value);
    }

    /// Take the element on top. Does nothing on an empty stack.
    pub fn pop(&mut self) -> Option<T> {
        self.list.pop_back()
    }

    /// Push the values in order, so the last one ends up on top
    pub fn insert_many_front<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.list.insert_many_back(values);
    }

    /// Exchange the contents of two stacks
    pub fn swap(&mut self, other: &mut Stack<T>) {
        self.list.swap(&mut other.list);
    }

    /// Iterate from the bottom of the stack to the top
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }
}

//-----------------------------------------------------------------------------------------------//

/// A first in, first out queue
#[derive(Clone, PartialEq, Eq)]
pub struct Queue<T> {
    list: List<T>,
}

impl<T> Queue<T> {
    /// Constructor
    pub fn new() -> Queue<T> {
        Queue { list: List::new() }
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the queue is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Get the oldest element, failing if the queue is empty
    pub fn front(&self) -> Result<&T> {
        empty_as(self.list.front(), "queue")
    }

    /// Get the newest element, failing if the queue is empty
    pub fn back(&self) -> Result<&T> {
        empty_as(self.list.back(), "queue")
    }

    /// Add an element at the back
    pub fn push(&mut self, value: T) {
        self.list.push_back(value);
    }

    /// Take the oldest element. Does nothing on an empty queue.
    pub fn pop(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    /// Add the values at the back in order
    pub fn insert_many_back<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.list.insert_many_back(values);
    }

    /// Exchange the contents of two queues
    pub fn swap(&mut self, other: &mut Queue<T>) {
        self.list.swap(&mut other.list);
    }

    /// Iterate from the oldest element to the newest
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }
}

//-----------------------------------------------------------------------------------------------//

macro_rules! adapter_traits {
    ($($adapter:ident),*) => {$(
        impl<T> Default for $adapter<T> {
            fn default() -> Self {
                $adapter::new()
            }
        }

        impl<T: fmt::Debug> fmt::Debug for $adapter<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.list.iter()).finish()
            }
        }

        impl<T> FromIterator<T> for $adapter<T> {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                $adapter {
                    list: iter.into_iter().collect(),
                }
            }
        }

        impl<'a, T> IntoIterator for &'a $adapter<T> {
            type Item = &'a T;
            type IntoIter = Iter<'a, T>;

            fn into_iter(self) -> Self::IntoIter {
                self.list.iter()
            }
        }
    )*};
}

adapter_traits!(Deque, Stack, Queue);

//-----------------------------------------------------------------------------------------------//

#[test]
// Deques work at both ends
fn test_adapter_0() {
    use alloc::vec::Vec;

    let mut deque = Deque::new();
    deque.push_back(2);
    deque.push_front(1);
    deque.push_back(3);

    assert_eq!(deque.front(), Ok(&1));
    assert_eq!(deque.back(), Ok(&3));
    assert_eq!(deque.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);

    assert_eq!(deque.pop_front(), Some(1));
    assert_eq!(deque.pop_back(), Some(3));
    assert_eq!(deque.pop_back(), Some(2));
    assert_eq!(deque.pop_back(), None);
    assert_eq!(
        deque.front(),
        Err(ContainerError::Empty { container: "deque" })
    );
}

#[test]
// Stacks are last in, first out
fn test_adapter_1() {
    let mut stack: Stack<i32> = [1, 2].into_iter().collect();
    stack.push(3);
    assert_eq!(stack.top(), Ok(&3));

    stack.insert_many_front([4, 5]);
    assert_eq!(stack.len(), 5);
    assert_eq!(stack.pop(), Some(5));
    assert_eq!(stack.pop(), Some(4));
    assert_eq!(stack.pop(), Some(3));

    let copy = stack.clone();
    stack.pop();
    stack.pop();
    assert!(stack.is_empty());
    assert_eq!(stack.pop(), None);
    assert_eq!(stack.top(), Err(ContainerError::Empty { container: "stack" }));
    assert_eq!(copy.top(), Ok(&2));
}

#[test]
// Queues are first in, first out
fn test_adapter_2() {
    let mut queue = Queue::new();
    for i in 0..10 {
        queue.push(i);
    }
    queue.insert_many_back([10, 11]);

    assert_eq!(queue.front(), Ok(&0));
    assert_eq!(queue.back(), Ok(&11));

    for i in 0..12 {
        assert_eq!(queue.pop(), Some(i));
        assert_eq!(queue.len(), 11 - i as usize);
    }
    assert!(queue.front().is_err());

    let mut other: Queue<i32> = [7].into_iter().collect();
    queue.swap(&mut other);
    assert_eq!(queue.front(), Ok(&7));
    assert!(other.is_empty());

    let moved = core::mem::take(&mut queue);
    assert_eq!(moved.len(), 1);
    assert!(queue.back().is_err());
}
