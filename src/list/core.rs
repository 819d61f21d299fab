//! Core list storage: struct, lifecycle, coordinate accessors

use std::fmt;

use crate::dtype::{DType, Element, Scalar};
use crate::error::{Error, Result};
use crate::shape::Shape;
use crate::storage::SparseStorage;

use super::iter::Iter;
use super::node::{InsertMode, List, NodeValue};
use super::slice::Slice;

/// List-of-lists sparse storage
///
/// Dimension 0 is the root list; each of its nodes holds the list for
/// dimension 1, and so on down to dimension `rank - 1`, whose nodes hold the
/// stored scalars. Every coordinate without a node chain reads as the
/// default value.
///
/// ```
/// use listr::list::ListStorage;
///
/// let mut m = ListStorage::new([3, 3], 0i64)?;
/// m.insert(&[0, 0], 5)?;
/// m.insert(&[2, 2], 7)?;
///
/// assert_eq!(m.get_ref(&[1, 1])?, &0);
/// assert_eq!(m.remove(&[0, 0])?, Some(5));
/// assert_eq!(m.count_elements(), 1);
/// # Ok::<(), listr::error::Error>(())
/// ```
#[derive(Clone)]
pub struct ListStorage<T: Scalar> {
    pub(crate) shape: Shape,
    pub(crate) default: T,
    pub(crate) rows: List<T>,
}

impl<T: Scalar> ListStorage<T> {
    /// Create an empty storage
    ///
    /// The storage takes ownership of `shape` and `default`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `shape` has no dimensions.
    pub fn new(shape: impl Into<Shape>, default: T) -> Result<Self> {
        let shape = shape.into();
        check_rank(&shape)?;
        tracing::debug!(dtype = %T::DTYPE, shape = %shape, "created list storage");
        Ok(Self::from_parts(shape, default, List::new()))
    }

    pub(crate) fn from_parts(shape: Shape, default: T, rows: List<T>) -> Self {
        Self {
            shape,
            default,
            rows,
        }
    }

    /// Returns the shape
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the number of dimensions
    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Returns the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Returns the value of every coordinate without a stored element
    #[inline]
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Returns the root list (dimension 0)
    #[inline]
    pub fn rows(&self) -> &List<T> {
        &self.rows
    }

    /// Returns the number of elements of the equivalent dense array
    #[inline]
    pub fn max_elements(&self) -> usize {
        self.shape.max_elements()
    }

    fn check_coords(&self, coords: &[usize]) -> Result<()> {
        if coords.len() != self.rank() {
            return Err(Error::RankMismatch {
                expected: self.rank(),
                got: coords.len(),
            });
        }
        for (dim, (&index, &size)) in coords.iter().zip(self.shape.iter()).enumerate() {
            if index >= size {
                return Err(Error::IndexOutOfBounds { dim, index, size });
            }
        }
        Ok(())
    }

    /// Borrow the value at `coords`
    ///
    /// Returns the default value when nothing is stored there.
    pub fn get_ref(&self, coords: &[usize]) -> Result<&T> {
        self.check_coords(coords)?;
        let Some((&leaf, path)) = coords.split_last() else {
            return Ok(&self.default);
        };

        let mut list = &self.rows;
        for &key in path {
            match list.find(key).and_then(|node| node.value().as_branch()) {
                Some(nested) => list = nested,
                None => return Ok(&self.default),
            }
        }

        Ok(list
            .find(leaf)
            .and_then(|node| node.value().as_leaf())
            .unwrap_or(&self.default))
    }

    /// Range retrieval
    ///
    /// List storage only supports single-coordinate access; use
    /// [`get_ref`](Self::get_ref).
    pub fn get(&self, _slice: &Slice) -> Result<Self> {
        Err(Error::not_implemented("range access on list storage"))
    }

    /// Store `value` at `coords`, replacing any stored value
    ///
    /// Missing intermediate lists are created on the way down.
    pub fn insert(&mut self, coords: &[usize], value: T) -> Result<&T> {
        self.check_coords(coords)?;
        let Some((&leaf, path)) = coords.split_last() else {
            return Err(Error::Internal("empty coordinates passed validation".into()));
        };

        let mut list = &mut self.rows;
        for &key in path {
            let node = list.insert(InsertMode::FindOrCreate, key, NodeValue::Branch(List::new()));
            list = node
                .value_mut()
                .as_branch_mut()
                .ok_or_else(|| Error::Internal(format!("scalar above leaf level at key {key}")))?;
        }

        list.insert(InsertMode::Overwrite, leaf, NodeValue::Leaf(value))
            .value()
            .as_leaf()
            .ok_or_else(|| Error::Internal("leaf insert produced a branch".into()))
    }

    /// Remove and return the value stored at `coords`
    ///
    /// Returns `Ok(None)` without touching the storage if nothing is stored
    /// there. Intermediate lists emptied by the removal are removed from
    /// their parents, up to the root.
    pub fn remove(&mut self, coords: &[usize]) -> Result<Option<T>> {
        self.check_coords(coords)?;
        Ok(remove_pruning(&mut self.rows, coords))
    }

    /// Number of stored elements
    pub fn count_elements(&self) -> usize {
        self.rows.count_leaves()
    }

    /// Number of stored elements off the main diagonal
    ///
    /// # Errors
    ///
    /// Returns `NotImplemented` unless the storage has rank 2.
    pub fn count_off_diagonal(&self) -> Result<usize> {
        if self.rank() != 2 {
            return Err(Error::not_implemented(
                "off-diagonal element count for rank other than 2",
            ));
        }

        let count: usize = self
            .rows
            .iter()
            .filter_map(|row| row.value().as_branch().map(|cols| (row.key(), cols)))
            .map(|(i, cols)| cols.iter().filter(|col| col.key() != i).count())
            .sum();
        Ok(count)
    }

    /// Visit the default and every stored value, for host collectors
    ///
    /// A no-op unless `T::TRACED`.
    pub fn trace<F: FnMut(&T)>(&self, mut visit: F) {
        if !T::TRACED {
            return;
        }
        visit(&self.default);
        self.rows.trace(&mut visit);
    }

    /// Iterate over stored elements as `(coords, value)` in row-major order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.rows, self.rank())
    }
}

impl<T: Element> ListStorage<T> {
    /// Create an empty storage whose default is zero
    pub fn zeros(shape: impl Into<Shape>) -> Result<Self> {
        Self::new(shape, T::zero())
    }
}

pub(crate) fn check_rank(shape: &Shape) -> Result<()> {
    if shape.is_empty() {
        return Err(Error::InvalidArgument {
            arg: "shape",
            reason: "list storage needs at least one dimension".into(),
        });
    }
    Ok(())
}

fn remove_pruning<T>(list: &mut List<T>, coords: &[usize]) -> Option<T> {
    let (&key, rest) = coords.split_first()?;
    if rest.is_empty() {
        return list.remove(key).and_then(NodeValue::into_leaf);
    }

    let nested = list.find_mut(key)?.value_mut().as_branch_mut()?;
    let removed = remove_pruning(nested, rest)?;
    if nested.is_empty() {
        list.remove(key);
        tracing::trace!(key, depth = coords.len(), "pruned empty branch");
    }
    Some(removed)
}

impl<T: Scalar> SparseStorage for ListStorage<T> {
    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn nnz(&self) -> usize {
        self.count_elements()
    }

    fn dtype(&self) -> DType {
        T::DTYPE
    }

    fn max_elements(&self) -> usize {
        self.shape.max_elements()
    }
}

impl<T: Scalar> fmt::Debug for ListStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListStorage")
            .field("dtype", &T::DTYPE)
            .field("shape", &self.shape)
            .field("default", &self.default)
            .field("rows", &self.rows)
            .finish()
    }
}
