//! List-of-lists sparse storage
//!
//! A [`ListStorage`] keeps one ordered singly-linked [`List`] per nesting
//! level: the root list is keyed by the dimension 0 coordinate, each of its
//! nodes owns the list for dimension 1, and the innermost nodes hold the
//! stored scalars. Coordinates without a node chain read as the storage's
//! default value, and intermediate lists never stay empty: removal prunes
//! them on the way back up.
//!
//! [`AnyListStorage`] is the runtime-typed counterpart, dispatching to a
//! `ListStorage<T>` per [`DType`](crate::dtype::DType).

mod any;
mod conversion;
mod core;
mod eqeq;
mod iter;
mod node;
mod slice;

pub use any::AnyListStorage;
pub use self::core::ListStorage;
pub use iter::Iter;
pub use node::{InsertMode, List, Node, NodeValue, Nodes};
pub use slice::Slice;
