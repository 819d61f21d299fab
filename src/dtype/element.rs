//! Traits mapping Rust types to DType

use super::{Complex128, Complex64, DType, ObjectRef, ScalarValue};
use std::fmt::Debug;

/// Trait for types that can be stored in a list storage
///
/// This trait connects Rust's type system to the runtime dtype system. Every
/// storage algorithm is generic over it; equality between stored values is
/// the type's `PartialEq`.
///
/// # Conversions
///
/// `to_value` widens a scalar into a [`ScalarValue`] without loss.
/// `from_value` narrows a [`ScalarValue`] into `Self`, returning `None` when
/// no conversion exists from that kind of value (complex into real, or
/// anything into or out of an object reference).
pub trait Scalar: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Whether values of this type must be reported to a host collector
    const TRACED: bool = false;

    /// Widen into a dynamically typed value
    fn to_value(&self) -> ScalarValue;

    /// Narrow from a dynamically typed value
    fn from_value(value: ScalarValue) -> Option<Self>;
}

/// Numeric scalars with an additive identity
pub trait Element: Scalar + Copy {
    /// Zero value
    fn zero() -> Self;
}

// ============================================================================
// Integers
//
// Int -> int wraps (two's complement truncation), float -> int truncates
// toward zero and saturates at the type bounds, NaN becomes 0.
// ============================================================================

macro_rules! impl_int_scalar {
    ($ty:ty, $dtype:ident) => {
        impl Scalar for $ty {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn to_value(&self) -> ScalarValue {
                ScalarValue::Int(*self as i128)
            }

            #[inline]
            fn from_value(value: ScalarValue) -> Option<Self> {
                match value {
                    ScalarValue::Bool(v) => Some(v as $ty),
                    ScalarValue::Int(v) => Some(v as $ty),
                    ScalarValue::Float(v) => Some(v as $ty),
                    ScalarValue::Complex(..) | ScalarValue::Object(_) => None,
                }
            }
        }

        impl Element for $ty {
            #[inline]
            fn zero() -> Self {
                0
            }
        }
    };
}

impl_int_scalar!(i64, I64);
impl_int_scalar!(i32, I32);
impl_int_scalar!(i16, I16);
impl_int_scalar!(i8, I8);
impl_int_scalar!(u64, U64);
impl_int_scalar!(u32, U32);
impl_int_scalar!(u16, U16);
impl_int_scalar!(u8, U8);

// ============================================================================
// Floating point
// ============================================================================

macro_rules! impl_float_scalar {
    ($ty:ty, $dtype:ident) => {
        impl Scalar for $ty {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn to_value(&self) -> ScalarValue {
                ScalarValue::Float(*self as f64)
            }

            #[inline]
            fn from_value(value: ScalarValue) -> Option<Self> {
                match value {
                    ScalarValue::Bool(v) => Some(v as u8 as $ty),
                    ScalarValue::Int(v) => Some(v as $ty),
                    ScalarValue::Float(v) => Some(v as $ty),
                    ScalarValue::Complex(..) | ScalarValue::Object(_) => None,
                }
            }
        }

        impl Element for $ty {
            #[inline]
            fn zero() -> Self {
                0.0
            }
        }
    };
}

impl_float_scalar!(f64, F64);
impl_float_scalar!(f32, F32);

// ============================================================================
// Half-precision floating point types (requires "f16" feature)
// ============================================================================

#[cfg(feature = "f16")]
macro_rules! impl_half_scalar {
    ($ty:ty, $dtype:ident) => {
        impl Scalar for $ty {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn to_value(&self) -> ScalarValue {
                ScalarValue::Float(self.to_f64())
            }

            #[inline]
            fn from_value(value: ScalarValue) -> Option<Self> {
                match value {
                    ScalarValue::Bool(v) => Some(<$ty>::from_f64(v as u8 as f64)),
                    ScalarValue::Int(v) => Some(<$ty>::from_f64(v as f64)),
                    ScalarValue::Float(v) => Some(<$ty>::from_f64(v)),
                    ScalarValue::Complex(..) | ScalarValue::Object(_) => None,
                }
            }
        }

        impl Element for $ty {
            #[inline]
            fn zero() -> Self {
                <$ty>::ZERO
            }
        }
    };
}

#[cfg(feature = "f16")]
impl_half_scalar!(half::f16, F16);
#[cfg(feature = "f16")]
impl_half_scalar!(half::bf16, BF16);

// ============================================================================
// Bool
// ============================================================================

impl Scalar for bool {
    const DTYPE: DType = DType::Bool;

    #[inline]
    fn to_value(&self) -> ScalarValue {
        ScalarValue::Bool(*self)
    }

    #[inline]
    fn from_value(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Bool(v) => Some(v),
            ScalarValue::Int(v) => Some(v != 0),
            ScalarValue::Float(v) => Some(v != 0.0),
            ScalarValue::Complex(..) | ScalarValue::Object(_) => None,
        }
    }
}

impl Element for bool {
    #[inline]
    fn zero() -> Self {
        false
    }
}

// ============================================================================
// Complex types
//
// Real values become complex values with a zero imaginary part. The reverse
// direction is not registered: dropping the imaginary part silently is lossy
// in a way no caller asks for.
// ============================================================================

macro_rules! impl_complex_scalar {
    ($ty:ty, $component:ty, $dtype:ident) => {
        impl Scalar for $ty {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn to_value(&self) -> ScalarValue {
                ScalarValue::Complex(self.re as f64, self.im as f64)
            }

            #[inline]
            fn from_value(value: ScalarValue) -> Option<Self> {
                match value {
                    ScalarValue::Bool(v) => Some(<$ty>::new(v as u8 as $component, 0.0)),
                    ScalarValue::Int(v) => Some(<$ty>::new(v as $component, 0.0)),
                    ScalarValue::Float(v) => Some(<$ty>::new(v as $component, 0.0)),
                    ScalarValue::Complex(re, im) => {
                        Some(<$ty>::new(re as $component, im as $component))
                    }
                    ScalarValue::Object(_) => None,
                }
            }
        }

        impl Element for $ty {
            #[inline]
            fn zero() -> Self {
                <$ty>::new(0.0, 0.0)
            }
        }
    };
}

impl_complex_scalar!(Complex64, f32, Complex64);
impl_complex_scalar!(Complex128, f64, Complex128);

// ============================================================================
// Object references
// ============================================================================

impl Scalar for ObjectRef {
    const DTYPE: DType = DType::Object;
    const TRACED: bool = true;

    #[inline]
    fn to_value(&self) -> ScalarValue {
        ScalarValue::Object(*self)
    }

    #[inline]
    fn from_value(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}
