//! Error types for listr

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using listr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in listr storage operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Shape mismatch between two storages, or between a dense buffer and its shape
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Coordinate tuple length does not match the storage rank
    #[error("Rank mismatch: expected {expected} coordinates, got {got}")]
    RankMismatch {
        /// Rank of the storage
        expected: usize,
        /// Number of coordinates supplied
        got: usize,
    },

    /// Coordinate out of bounds
    #[error("Index {index} out of bounds for dimension {dim} of size {size}")]
    IndexOutOfBounds {
        /// Dimension the coordinate addresses
        dim: usize,
        /// The invalid coordinate
        index: usize,
        /// Extent of the dimension
        size: usize,
    },

    /// Unsupported dtype for an operation
    #[error("Unsupported dtype {dtype:?} for operation '{op}'")]
    UnsupportedDType {
        /// The unsupported dtype
        dtype: DType,
        /// The operation name
        op: &'static str,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Left-hand side dtype
        lhs: DType,
        /// Right-hand side dtype
        rhs: DType,
    },

    /// No conversion is registered for the dtype pair
    #[error("No conversion registered from {from} to {to}")]
    TypeConversion {
        /// Source dtype
        from: DType,
        /// Destination dtype
        to: DType,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Feature not implemented by list storage
    #[error("Not implemented: {feature}")]
    NotImplemented {
        /// Description of the unimplemented feature
        feature: &'static str,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an unsupported dtype error
    pub fn unsupported_dtype(dtype: DType, op: &'static str) -> Self {
        Self::UnsupportedDType { dtype, op }
    }

    /// Create a type conversion error for a dtype pair
    pub fn type_conversion(from: DType, to: DType) -> Self {
        Self::TypeConversion { from, to }
    }

    /// Create a not implemented error
    pub fn not_implemented(feature: &'static str) -> Self {
        Self::NotImplemented { feature }
    }
}
