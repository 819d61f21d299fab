//! Dtype-pair conversion registry
//!
//! Every conversion goes through [`ScalarValue`]: the source widens with
//! [`Scalar::to_value`], the destination narrows with [`Scalar::from_value`].
//! [`is_registered`] answers ahead of time whether a pair converts at all, so
//! a storage-wide cast can fail before it allocates anything.
//!
//! | from \ to        | real (int, float, bool) | complex | object |
//! |------------------|-------------------------|---------|--------|
//! | real             | yes                     | yes     | no     |
//! | complex          | no                      | yes     | no     |
//! | object           | no                      | no      | yes    |
//!
//! Narrowing within the real types is deterministic:
//! - int -> int wraps (two's complement truncation)
//! - float -> int truncates toward zero, saturates at the bounds, NaN -> 0
//! - int -> float and float -> narrower float round to nearest
//! - numeric -> bool is `!= 0`, bool -> numeric is 0 or 1

use super::{DType, DTypeSet, Scalar};
use crate::error::{Error, Result};

/// Check whether a conversion is registered from one dtype to another
pub fn is_registered(from: DType, to: DType) -> bool {
    if from == to {
        return true;
    }

    if DTypeSet::REAL.contains(from) {
        return DTypeSet::REAL.union(DTypeSet::COMPLEX).contains(to);
    }
    if DTypeSet::COMPLEX.contains(from) {
        return DTypeSet::COMPLEX.contains(to);
    }

    // Object references only convert to themselves
    false
}

/// Check whether a conversion between two dtypes round-trips every value
///
/// Used by callers that want to refuse narrowing casts up front.
pub fn is_lossless(from: DType, to: DType) -> bool {
    use DType::*;

    if from == to {
        return true;
    }

    match (from, to) {
        // Bool fits everywhere numeric
        (Bool, I8 | I16 | I32 | I64 | U8 | U16 | U32 | U64) => true,
        (Bool, F16 | BF16 | F32 | F64 | Complex64 | Complex128) => true,

        // Signed integer widening
        (I8, I16 | I32 | I64) => true,
        (I16, I32 | I64) => true,
        (I32, I64) => true,

        // Unsigned integer widening
        (U8, U16 | U32 | U64 | I16 | I32 | I64) => true,
        (U16, U32 | U64 | I32 | I64) => true,
        (U32, U64 | I64) => true,

        // Integer to float (within mantissa range)
        (I8 | U8, F16 | BF16 | F32 | F64) => true,
        (I16 | U16, F32 | F64) => true,
        (I32 | U32, F64) => true,

        // Float widening
        (F16 | BF16, F32 | F64) => true,
        (F32, F64) => true,

        // Real to complex with a wide enough component
        (I8 | U8 | I16 | U16 | F16 | BF16 | F32, Complex64 | Complex128) => true,
        (I32 | U32 | F64, Complex128) => true,
        (Complex64, Complex128) => true,

        _ => false,
    }
}

/// Convert one scalar between element types
///
/// Fails with [`Error::TypeConversion`] if the pair is not registered.
#[inline]
pub fn cast_scalar<S: Scalar, D: Scalar>(value: &S) -> Result<D> {
    D::from_value(value.to_value()).ok_or_else(|| Error::type_conversion(S::DTYPE, D::DTYPE))
}

/// Fail early unless a conversion is registered for the pair
#[inline]
pub fn ensure_registered(from: DType, to: DType) -> Result<()> {
    if is_registered(from, to) {
        Ok(())
    } else {
        Err(Error::type_conversion(from, to))
    }
}
