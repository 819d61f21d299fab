//! # listr
//!
//! **List-of-lists sparse storage for N-dimensional arrays.**
//!
//! listr stores an N-dimensional array as nested ordered linked lists, one
//! level per dimension, keeping only the coordinates that were explicitly
//! written. Every other coordinate reads as a per-storage default value.
//!
//! ## Features
//!
//! - **Coordinate access**: read, insert and remove single elements, with
//!   empty intermediate lists pruned on removal
//! - **Sparse-aware equality**: cost proportional to stored elements
//! - **Conversions**: type-converting deep copies and dense to sparse
//!   construction through a registry of dtype pairs
//! - **Runtime typing**: [`list::AnyListStorage`] selects the element type
//!   from a [`dtype::DType`]
//! - **Host collector hook**: storages of object references report every
//!   reference they hold
//!
//! ## Quick Start
//!
//! ```rust
//! use listr::prelude::*;
//!
//! let mut m = ListStorage::new([3, 3], 0i64)?;
//! m.insert(&[0, 0], 5)?;
//! m.insert(&[2, 2], 7)?;
//!
//! let copy = m.cast::<f64>()?;
//! assert_eq!(copy.get_ref(&[2, 2])?, &7.0);
//! assert_eq!(m.nnz(), 2);
//! # Ok::<(), listr::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `f16` (default): Half-precision floats (F16, BF16)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod list;
pub mod shape;
pub mod storage;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element, ObjectRef, Scalar, ScalarValue};
    pub use crate::error::{Error, Result};
    pub use crate::list::{AnyListStorage, InsertMode, ListStorage, Slice};
    pub use crate::shape::Shape;
    pub use crate::storage::SparseStorage;
}
