//! Common interface of sparse storages

use crate::dtype::DType;

/// Trait for sparse storages
///
/// Implemented by the typed [`ListStorage`](crate::list::ListStorage) and the
/// runtime-typed [`AnyListStorage`](crate::list::AnyListStorage).
pub trait SparseStorage {
    /// Returns the per-dimension extents
    fn shape(&self) -> &[usize];

    /// Returns the number of dimensions
    #[inline]
    fn rank(&self) -> usize {
        self.shape().len()
    }

    /// Returns the number of explicitly stored elements
    fn nnz(&self) -> usize;

    /// Returns the data type of stored values
    fn dtype(&self) -> DType;

    /// Returns the number of elements of the equivalent dense array
    #[inline]
    fn max_elements(&self) -> usize {
        self.shape()
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .unwrap_or(usize::MAX)
    }

    /// Returns the sparsity ratio (fraction of coordinates holding the default)
    ///
    /// Sparsity = 1.0 - (nnz / max_elements)
    #[inline]
    fn sparsity(&self) -> f64 {
        let total = self.max_elements() as f64;
        if total == 0.0 {
            0.0
        } else {
            1.0 - (self.nnz() as f64 / total)
        }
    }

    /// Returns the density ratio (fraction of stored coordinates)
    ///
    /// Density = nnz / max_elements = 1.0 - sparsity
    #[inline]
    fn density(&self) -> f64 {
        1.0 - self.sparsity()
    }

    /// Returns true if nothing is stored
    #[inline]
    fn is_empty(&self) -> bool {
        self.nnz() == 0
    }
}
