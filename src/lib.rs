//! ## Introduction
//!
//! This crate implements a family of general purpose containers on top of two node based
//! engines and one contiguous buffer:
//!
//! - A doubly linked list closed into a ring by a sentinel node. The sentinel never holds a
//!   value and marks the end of the list in both directions, so stepping past the last element
//!   reaches the end, and stepping back from the end reaches the last element again.
//! - An unbalanced binary search tree. Nodes store no parent link; the successor or predecessor
//!   of a node is found by walking down from the root. Equal keys share a node with a duplicate
//!   count, which is how multisets are supported.
//! - A growable array with a fixed, documented growth policy.
//!
//! ## Benefits
//!
//! - The crate is small and `#![no_std]`; it only needs `alloc`.
//! - Nodes are stored in arenas indexed by `usize` rather than behind pointers. Freed list
//!   nodes are recycled and the tree arena is kept dense, so long lists or badly unbalanced
//!   trees can be cloned, cleared and dropped without recursion.
//! - Failures that the caller has to handle, such as an index out of range or reading from an
//!   empty container, are reported as a `ContainerError`. Operations where failure is routine,
//!   such as removing a key that is not there, report it with a `bool` or an `Option`.
//!
//! ## Contents
//!
//! <center>
//!
//! | Type        | Backed by    | Stores              | Order               |
//! |:------------|:-------------|:--------------------|:--------------------|
//! | `List`      | ring         | Values              | Insertion           |
//! | `Deque`     | ring         | Values              | Insertion           |
//! | `Stack`     | ring         | Values              | Last in, first out  |
//! | `Queue`     | ring         | Values              | First in, first out |
//! | `Map`       | tree         | Unique key/value    | Ord                 |
//! | `StringMap` | tree         | Unique string/value | Ord                 |
//! | `Set`       | tree         | Unique keys         | Ord                 |
//! | `StringSet` | tree         | Unique strings      | Ord                 |
//! | `Multiset`  | tree         | Counted keys        | Ord                 |
//! | `Vector`    | buffer       | Values              | Insertion           |
//! | `Array`     | native array | `N` values          | Index               |
//!
//! </center>
//!
//! The crate exposes the tree itself as `util::BaseTree`, to support development of additional
//! collection types.
//!
//! None of the containers is synchronised. Sharing one between threads for mutation needs
//! external locking.
//!
//! ## Logging
//!
//! Structural events, such as a vector reallocating or a tree being cleared or merged, are
//! emitted as `tracing` events at `TRACE` level. The crate never installs a subscriber.

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

mod adapter;
mod array;
mod error;
mod list;
mod map;
mod set;
pub mod util;
mod vector;

pub use adapter::*;
pub use array::*;
pub use error::*;
pub use list::*;
pub use map::*;
pub use set::*;
pub use vector::*;
