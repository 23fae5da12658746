//! Pagination and reordering views over materialized sequences.
//!
//! # Responsibility
//! - Slice an owned sequence into fixed-size pages.
//! - Reorder the whole sequence by a named attribute of its elements.
//!
//! # Invariants
//! - `total_count` is captured once at construction.
//! - Page size is never zero.
//! - Out-of-range pages are empty, not errors.
//! - Unknown reorder keys leave the sequence untouched.

use crate::container::ContainerError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod paged_list;
pub mod sort_key;

pub use paged_list::{Comparer, PageInfo, PagedList};

pub type PagingResult<T> = Result<T, PagingError>;

/// Errors raised by paging operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagingError {
    /// Caller-provided argument is outside the accepted domain.
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },
    /// Source container could not be materialized.
    Source(ContainerError),
}

impl Display for PagingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { name, reason } => {
                write!(f, "invalid argument `{name}`: {reason}")
            }
            Self::Source(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PagingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument { .. } => None,
            Self::Source(err) => Some(err),
        }
    }
}

impl From<ContainerError> for PagingError {
    fn from(value: ContainerError) -> Self {
        Self::Source(value)
    }
}
