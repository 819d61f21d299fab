//! Type-converting copies and dense construction

use crate::dtype::cast::{cast_scalar, ensure_registered};
use crate::dtype::Scalar;
use crate::error::{Error, Result};
use crate::shape::Shape;

use super::core::{check_rank, ListStorage};
use super::node::{InsertMode, List, Node, NodeValue};

impl<T: Scalar> ListStorage<T> {
    /// Deep copy with every stored scalar and the default converted to `U`
    ///
    /// The copy shares nothing with `self` and keeps its sparsity pattern.
    ///
    /// # Errors
    ///
    /// Returns `TypeConversion` if no conversion is registered from `T` to
    /// `U`. Nothing is allocated in that case.
    pub fn cast<U: Scalar>(&self) -> Result<ListStorage<U>> {
        ensure_registered(T::DTYPE, U::DTYPE)?;
        let _span = tracing::debug_span!(
            "list_cast",
            from = %T::DTYPE,
            to = %U::DTYPE,
            shape = %self.shape
        )
        .entered();

        let default = cast_scalar::<T, U>(&self.default)?;
        let rows = self.rows.try_map(&mut |value| cast_scalar::<T, U>(value))?;
        Ok(ListStorage::from_parts(self.shape.clone(), default, rows))
    }

    /// Build a storage from a row-major dense buffer
    ///
    /// Elements equal to `zero` are left out, compared in the source type.
    /// Intermediate lists that would end up empty are never attached. The
    /// default of the new storage is `zero` converted to `T`.
    ///
    /// ```
    /// use listr::list::ListStorage;
    ///
    /// let dense = [0i32, 3, 0, 0, 0, 0];
    /// let m = ListStorage::<f64>::from_dense(&dense, [2, 3], &0)?;
    /// assert_eq!(m.count_elements(), 1);
    /// assert_eq!(m.get_ref(&[0, 1])?, &3.0);
    /// assert!(m.rows().find(1).is_none());
    /// # Ok::<(), listr::error::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `dense.len()` differs from the element
    /// count of `shape`, `TypeConversion` if no conversion is registered from
    /// `S` to `T`.
    pub fn from_dense<S: Scalar>(dense: &[S], shape: impl Into<Shape>, zero: &S) -> Result<Self> {
        let shape = shape.into();
        check_rank(&shape)?;
        if dense.len() != shape.max_elements() {
            return Err(Error::shape_mismatch(&shape, &[dense.len()]));
        }
        ensure_registered(S::DTYPE, T::DTYPE)?;

        let _span = tracing::debug_span!(
            "list_from_dense",
            from = %S::DTYPE,
            to = %T::DTYPE,
            shape = %shape
        )
        .entered();

        let default = cast_scalar::<S, T>(zero)?;
        let mut pos = 0;
        let rows = build_level(dense, &shape, zero, &mut pos)?;
        let storage = Self::from_parts(shape, default, rows);
        tracing::debug!(nnz = storage.count_elements(), "built list storage from dense");
        Ok(storage)
    }
}

/// Build the list for the outermost of `dims`, consuming elements from `pos`
fn build_level<S: Scalar, T: Scalar>(
    dense: &[S],
    dims: &[usize],
    zero: &S,
    pos: &mut usize,
) -> Result<List<T>> {
    let mut list = List::new();
    let Some((&extent, inner)) = dims.split_first() else {
        return Ok(list);
    };

    // Keys arrive in ascending order, so every node after the first is
    // appended directly behind its predecessor.
    let mut prev: Option<&mut Node<T>> = None;
    for key in 0..extent {
        let value = if inner.is_empty() {
            let element = dense
                .get(*pos)
                .ok_or_else(|| Error::Internal(format!("dense buffer exhausted at {pos}")))?;
            *pos += 1;
            if element == zero {
                continue;
            }
            NodeValue::Leaf(cast_scalar::<S, T>(element)?)
        } else {
            let nested = build_level(dense, inner, zero, pos)?;
            if nested.is_empty() {
                continue;
            }
            NodeValue::Branch(nested)
        };

        prev = Some(match prev.take() {
            Some(node) => node.insert_after(key, value),
            None => list.insert(InsertMode::FindOrCreate, key, value),
        });
    }

    Ok(list)
}
