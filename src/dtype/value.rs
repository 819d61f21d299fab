//! Dynamically typed scalar values

use super::{DType, ObjectRef};
use std::fmt;

/// A scalar whose element type is only known at runtime
///
/// `AnyListStorage` takes and returns scalars in this form, and every
/// dtype-to-dtype conversion passes through it: the source scalar is widened
/// into the variant matching its kind, then narrowed into the destination.
/// `Int` is wide enough to hold every supported integer exactly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScalarValue {
    /// Boolean
    Bool(bool),
    /// Any signed or unsigned integer
    Int(i128),
    /// Any real floating point value
    Float(f64),
    /// Complex value as (re, im)
    Complex(f64, f64),
    /// Host object reference
    Object(ObjectRef),
}

impl ScalarValue {
    /// The dtype that holds this value without loss
    ///
    /// Integers report `I64` even when the value only fits an unsigned or a
    /// wider type; it is the dtype named in conversion errors.
    pub const fn dtype(&self) -> DType {
        match self {
            Self::Bool(_) => DType::Bool,
            Self::Int(_) => DType::I64,
            Self::Float(_) => DType::F64,
            Self::Complex(..) => DType::Complex128,
            Self::Object(_) => DType::Object,
        }
    }

    /// Name of the value kind, for diagnostics
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Complex(..) => "complex",
            Self::Object(_) => "object",
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Complex(re, im) => write!(f, "{re}{im:+}i"),
            Self::Object(obj) => write!(f, "{obj:?}"),
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        Self::Int(value as i128)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        Self::Int(value as i128)
    }
}

impl From<u64> for ScalarValue {
    fn from(value: u64) -> Self {
        Self::Int(value as i128)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<ObjectRef> for ScalarValue {
    fn from(value: ObjectRef) -> Self {
        Self::Object(value)
    }
}
