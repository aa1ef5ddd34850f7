use thiserror::Error;

use crate::encoding::Encoding;
use crate::key::Key;

/// Shorthand for results returned by the trees and containers in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by tree construction, queries, mutation and the auxiliary containers.
///
/// Every error is reported at the point of detection. A failed operation leaves the tree exactly
/// as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The key cannot be stored in an ordered tree (e.g. a NaN float).
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// A key was absent from a bulk construction sequence.
    #[error("keys must not be null")]
    NullKey,

    /// A key or value disagrees with the type recorded by the tree.
    #[error("{what} must be of type {expected}, found {found}")]
    TypeMismatch {
        /// Either `"key"` or `"value"`.
        what: &'static str,
        /// The type recorded by the tree (or by the first entry of a sequence).
        expected: &'static str,
        /// The type that was offered instead.
        found: &'static str,
    },

    /// Bulk construction saw the same key twice.
    #[error("duplicate key {0}")]
    DuplicateKey(Key),

    /// The sequence does not describe a binary search tree in the named order.
    #[error("sequence is not a valid {0} encoding of a binary search tree")]
    InvalidEncoding(Encoding),

    /// No node holds the key.
    #[error("key {0} not found")]
    NotFound(Key),

    /// The tree was queried before any key type was ever recorded.
    #[error("key type not defined")]
    KeyTypeUndefined,

    /// `pop`, `top` or `dequeue` on an empty container.
    #[error("container is empty")]
    EmptyContainer,
}
