//! Lazily synchronized dual-representation containers.
//!
//! # Responsibility
//! - Keep an in-memory structured value and its text encoding consistent.
//! - Materialize whichever representation is missing only when it is read.
//! - Optionally carry elements through a wire type `T2` at the text boundary.
//!
//! # Invariants
//! - When both caches are present, decoding the text yields the structured
//!   value.
//! - Structural mutations always regenerate the text from the new value.
//! - Assigning text discards the structured cache.
//! - Changing adapters never re-encodes an already cached text.
//!
//! # Concurrency
//! - Reads may fill a cache, so they take `&mut self`. Wrap a container in a
//!   lock before sharing it across threads.

use crate::codec::CodecError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod adapter;
mod engine;
mod list;
mod map;
mod object;
pub mod shape;

pub use adapter::{Adapters, BackwardFn, ForwardFn};
pub use engine::{CacheState, SyncedValue};
pub use list::SyncedList;
pub use map::SyncedMap;
pub use object::SyncedObject;
pub use shape::{EmptyShape, Keyed, Sequence, Shape, Single};

pub type ContainerResult<T> = Result<T, ContainerError>;

/// Errors raised by container reads and mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Cached text is malformed or does not match the container shape.
    Decode {
        shape: &'static str,
        source: CodecError,
    },
    /// Structured value cannot be encoded by the configured codec.
    Encode {
        shape: &'static str,
        source: CodecError,
    },
    /// Positional operation outside `0..len` (or `0..=len` for inserts).
    IndexOutOfRange { index: usize, len: usize },
    /// Keyed replacement or lookup on an absent key.
    KeyNotFound(String),
    /// Keyed add on a key that is already present.
    DuplicateKey(String),
}

impl Display for ContainerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode { shape, source } => {
                write!(f, "cannot decode {shape} container text: {source}")
            }
            Self::Encode { shape, source } => {
                write!(f, "cannot encode {shape} container value: {source}")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::KeyNotFound(key) => write!(f, "key not found: {key}"),
            Self::DuplicateKey(key) => write!(f, "key already present: {key}"),
        }
    }
}

impl Error for ContainerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode { source, .. } | Self::Encode { source, .. } => Some(source),
            Self::IndexOutOfRange { .. } | Self::KeyNotFound(_) | Self::DuplicateKey(_) => None,
        }
    }
}
