//! The failure signal raised by bounds, emptiness and position checks

use thiserror::Error;

//-----------------------------------------------------------------------------------------------//

/// Error raised by container operations that fail rather than report a flag
///
/// Operations that report success with a `bool` or an `Option` never produce one of these for the
/// same condition. Which style an operation uses is part of its documented contract.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    /// An index was not within `[0, len)`
    #[error("index {index} is out of range for a container of length {len}")]
    OutOfRange {
        /// The offending index
        index: usize,
        /// The length of the container at the time of the access
        len: usize,
    },

    /// An element was requested from an empty container
    #[error("{container} is empty")]
    Empty {
        /// The kind of container, used in the message
        container: &'static str,
    },

    /// A key lookup failed, either because the key is absent or the tree is empty
    #[error("element with the specified key was not found")]
    KeyNotFound,

    /// A tree position at the end marker was dereferenced, advanced or retreated
    #[error("cannot {action} an unset iterator")]
    UnsetPosition {
        /// What was attempted, used in the message
        action: &'static str,
    },

    /// The sentinel of a list was dereferenced
    #[error("iterator is at the end")]
    SentinelDereference,

    /// An insertion position was past the end of a vector
    #[error("position {index} is not valid for a container of length {len}")]
    InvalidPosition {
        /// The offending position
        index: usize,
        /// The length of the container at the time of the insertion
        len: usize,
    },
}

/// Result alias used across the crate
pub type Result<T> = core::result::Result<T, ContainerError>;

//-----------------------------------------------------------------------------------------------//

#[test]
// Messages are human readable and carry the numbers
fn test_error_0() {
    use alloc::string::ToString;

    let err = ContainerError::OutOfRange { index: 4, len: 3 };
    assert_eq!(
        err.to_string(),
        "index 4 is out of range for a container of length 3"
    );

    let err = ContainerError::Empty { container: "list" };
    assert_eq!(err.to_string(), "list is empty");

    let err = ContainerError::UnsetPosition { action: "increment" };
    assert_eq!(err.to_string(), "cannot increment an unset iterator");
}
