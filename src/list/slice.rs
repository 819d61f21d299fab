//! Coordinate slices

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::shape::STACK_DIMS;

/// A block of coordinates: a starting corner and a length per dimension
///
/// List storage reads single coordinates only; range retrieval through
/// [`ListStorage::get`](super::ListStorage::get) reports `NotImplemented`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    coords: SmallVec<[usize; STACK_DIMS]>,
    lengths: SmallVec<[usize; STACK_DIMS]>,
}

impl Slice {
    /// A single coordinate
    pub fn point(coords: &[usize]) -> Self {
        Self {
            coords: coords.iter().copied().collect(),
            lengths: coords.iter().map(|_| 1).collect(),
        }
    }

    /// A block starting at `coords` spanning `lengths`
    ///
    /// # Errors
    ///
    /// Returns `RankMismatch` if the two slices differ in length.
    pub fn range(coords: &[usize], lengths: &[usize]) -> Result<Self> {
        if coords.len() != lengths.len() {
            return Err(Error::RankMismatch {
                expected: coords.len(),
                got: lengths.len(),
            });
        }
        Ok(Self {
            coords: coords.into(),
            lengths: lengths.into(),
        })
    }

    /// Starting coordinate
    pub fn coords(&self) -> &[usize] {
        &self.coords
    }

    /// Length per dimension
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Returns true if the slice covers exactly one coordinate
    pub fn is_point(&self) -> bool {
        self.lengths.iter().all(|&len| len == 1)
    }
}
