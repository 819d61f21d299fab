//! Runtime-typed list storage
//!
//! [`AnyListStorage`] wraps a [`ListStorage`] of any supported element type
//! behind one enum, so callers that only learn the dtype at runtime can create,
//! access, compare and convert storages. Scalars cross this boundary as
//! [`ScalarValue`]s and are converted through the dtype-pair registry.

use std::any::Any;

use crate::dtype::{Complex128, Complex64, DType, ObjectRef, Scalar, ScalarValue};
use crate::error::{Error, Result};
use crate::shape::Shape;
use crate::storage::SparseStorage;

use super::core::ListStorage;
use super::slice::Slice;

/// List storage whose element type is chosen at runtime
#[derive(Clone, Debug)]
#[allow(missing_docs)]
pub enum AnyListStorage {
    F64(ListStorage<f64>),
    F32(ListStorage<f32>),
    #[cfg(feature = "f16")]
    F16(ListStorage<half::f16>),
    #[cfg(feature = "f16")]
    BF16(ListStorage<half::bf16>),
    I64(ListStorage<i64>),
    I32(ListStorage<i32>),
    I16(ListStorage<i16>),
    I8(ListStorage<i8>),
    U64(ListStorage<u64>),
    U32(ListStorage<u32>),
    U16(ListStorage<u16>),
    U8(ListStorage<u8>),
    Bool(ListStorage<bool>),
    Complex64(ListStorage<Complex64>),
    Complex128(ListStorage<Complex128>),
    Object(ListStorage<ObjectRef>),
}

/// Run `$body` with `$s` bound to the typed storage of any variant
macro_rules! dispatch_storage {
    ($storage:expr, $s:ident => $body:expr) => {
        match $storage {
            AnyListStorage::F64($s) => $body,
            AnyListStorage::F32($s) => $body,
            #[cfg(feature = "f16")]
            AnyListStorage::F16($s) => $body,
            #[cfg(feature = "f16")]
            AnyListStorage::BF16($s) => $body,
            AnyListStorage::I64($s) => $body,
            AnyListStorage::I32($s) => $body,
            AnyListStorage::I16($s) => $body,
            AnyListStorage::I8($s) => $body,
            AnyListStorage::U64($s) => $body,
            AnyListStorage::U32($s) => $body,
            AnyListStorage::U16($s) => $body,
            AnyListStorage::U8($s) => $body,
            AnyListStorage::Bool($s) => $body,
            AnyListStorage::Complex64($s) => $body,
            AnyListStorage::Complex128($s) => $body,
            AnyListStorage::Object($s) => $body,
        }
    };
}

/// Run `$body` with `$T` aliased to the Rust type of `$dtype`
///
/// Returns `UnsupportedDType` from the enclosing function for dtypes compiled
/// out of the crate.
macro_rules! with_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            DType::F64 => {
                type $T = f64;
                $body
            }
            DType::F32 => {
                type $T = f32;
                $body
            }
            DType::F16 => {
                #[cfg(feature = "f16")]
                {
                    type $T = half::f16;
                    $body
                }
                #[cfg(not(feature = "f16"))]
                {
                    return Err(Error::unsupported_dtype($dtype, $error_op));
                }
            }
            DType::BF16 => {
                #[cfg(feature = "f16")]
                {
                    type $T = half::bf16;
                    $body
                }
                #[cfg(not(feature = "f16"))]
                {
                    return Err(Error::unsupported_dtype($dtype, $error_op));
                }
            }
            DType::I64 => {
                type $T = i64;
                $body
            }
            DType::I32 => {
                type $T = i32;
                $body
            }
            DType::I16 => {
                type $T = i16;
                $body
            }
            DType::I8 => {
                type $T = i8;
                $body
            }
            DType::U64 => {
                type $T = u64;
                $body
            }
            DType::U32 => {
                type $T = u32;
                $body
            }
            DType::U16 => {
                type $T = u16;
                $body
            }
            DType::U8 => {
                type $T = u8;
                $body
            }
            DType::Bool => {
                type $T = bool;
                $body
            }
            DType::Complex64 => {
                type $T = Complex64;
                $body
            }
            DType::Complex128 => {
                type $T = Complex128;
                $body
            }
            DType::Object => {
                type $T = ObjectRef;
                $body
            }
        }
    };
}

macro_rules! impl_from_storage {
    ($($(#[$meta:meta])* $variant:ident => $ty:ty),* $(,)?) => {
        $(
            $(#[$meta])*
            impl From<ListStorage<$ty>> for AnyListStorage {
                #[inline]
                fn from(storage: ListStorage<$ty>) -> Self {
                    Self::$variant(storage)
                }
            }
        )*
    };
}

impl_from_storage! {
    F64 => f64,
    F32 => f32,
    #[cfg(feature = "f16")]
    F16 => half::f16,
    #[cfg(feature = "f16")]
    BF16 => half::bf16,
    I64 => i64,
    I32 => i32,
    I16 => i16,
    I8 => i8,
    U64 => u64,
    U32 => u32,
    U16 => u16,
    U8 => u8,
    Bool => bool,
    Complex64 => Complex64,
    Complex128 => Complex128,
    Object => ObjectRef,
}

impl AnyListStorage {
    /// Create an empty storage of `dtype`
    ///
    /// # Errors
    ///
    /// Returns `TypeConversion` if `default` does not convert into `dtype`,
    /// `UnsupportedDType` for a dtype compiled out of the crate, and
    /// `InvalidArgument` for a shape without dimensions.
    pub fn new(dtype: DType, shape: impl Into<Shape>, default: ScalarValue) -> Result<Self> {
        let shape = shape.into();
        with_dtype!(dtype, T => {
            let default = convert::<T>(default)?;
            Ok(ListStorage::<T>::new(shape, default)?.into())
        }, "new")
    }

    /// Build a storage of `dtype` from a row-major dense buffer
    ///
    /// See [`ListStorage::from_dense`].
    pub fn from_dense<S: Scalar>(
        dtype: DType,
        dense: &[S],
        shape: impl Into<Shape>,
        zero: &S,
    ) -> Result<Self> {
        let shape = shape.into();
        with_dtype!(dtype, T => {
            Ok(ListStorage::<T>::from_dense(dense, shape, zero)?.into())
        }, "from_dense")
    }

    /// Returns the element type
    pub fn dtype(&self) -> DType {
        dispatch_storage!(self, s => s.dtype())
    }

    /// Returns the shape
    pub fn shape(&self) -> &Shape {
        dispatch_storage!(self, s => s.shape())
    }

    /// Returns the number of dimensions
    pub fn rank(&self) -> usize {
        self.shape().rank()
    }

    /// Returns the default value
    pub fn default_value(&self) -> ScalarValue {
        dispatch_storage!(self, s => s.default_value().to_value())
    }

    /// Read the value at `coords`
    pub fn value_at(&self, coords: &[usize]) -> Result<ScalarValue> {
        dispatch_storage!(self, s => Ok(s.get_ref(coords)?.to_value()))
    }

    /// Range retrieval; always `NotImplemented`
    pub fn get(&self, slice: &Slice) -> Result<Self> {
        dispatch_storage!(self, s => s.get(slice).map(Self::from))
    }

    /// Store `value` at `coords`, converted to the storage dtype
    ///
    /// Returns the value as stored.
    pub fn insert(&mut self, coords: &[usize], value: ScalarValue) -> Result<ScalarValue> {
        dispatch_storage!(self, s => insert_value(s, coords, value))
    }

    /// Remove and return the value stored at `coords`
    pub fn remove(&mut self, coords: &[usize]) -> Result<Option<ScalarValue>> {
        dispatch_storage!(self, s => Ok(s.remove(coords)?.map(|v| v.to_value())))
    }

    /// Number of stored elements
    pub fn count_elements(&self) -> usize {
        dispatch_storage!(self, s => s.count_elements())
    }

    /// Number of stored elements off the main diagonal; rank 2 only
    pub fn count_off_diagonal(&self) -> Result<usize> {
        dispatch_storage!(self, s => s.count_off_diagonal())
    }

    /// Compare two storages coordinate by coordinate
    ///
    /// # Errors
    ///
    /// Returns `DTypeMismatch` if the dtypes differ and `ShapeMismatch` if the
    /// shapes differ.
    pub fn eqeq(&self, other: &Self) -> Result<bool> {
        let (lhs, rhs) = (self.dtype(), other.dtype());
        if lhs != rhs {
            return Err(Error::DTypeMismatch { lhs, rhs });
        }
        dispatch_storage!(self, s => match other.downcast_ref() {
            Some(o) => s.eqeq(o),
            None => Err(Error::Internal(format!("{rhs} storage failed to downcast"))),
        })
    }

    /// Deep copy converted to `dtype`
    ///
    /// # Errors
    ///
    /// Returns `TypeConversion` if no conversion is registered for the pair.
    pub fn cast_copy(&self, dtype: DType) -> Result<Self> {
        dispatch_storage!(self, s => cast_into(s, dtype))
    }

    /// Visit every stored object reference and the default, for host
    /// collectors
    ///
    /// A no-op for every variant except `Object`.
    pub fn trace<F: FnMut(&ObjectRef)>(&self, visit: F) {
        if let Self::Object(s) = self {
            s.trace(visit);
        }
    }

    /// Borrow the typed storage if its element type is `T`
    pub fn downcast_ref<T: Scalar>(&self) -> Option<&ListStorage<T>> {
        dispatch_storage!(self, s => (s as &dyn Any).downcast_ref())
    }

    /// Borrow the typed storage if its element type is `T`
    pub fn downcast_mut<T: Scalar>(&mut self) -> Option<&mut ListStorage<T>> {
        dispatch_storage!(self, s => (s as &mut dyn Any).downcast_mut())
    }
}

fn convert<T: Scalar>(value: ScalarValue) -> Result<T> {
    T::from_value(value).ok_or_else(|| Error::type_conversion(value.dtype(), T::DTYPE))
}

fn insert_value<T: Scalar>(
    storage: &mut ListStorage<T>,
    coords: &[usize],
    value: ScalarValue,
) -> Result<ScalarValue> {
    let value = convert::<T>(value)?;
    Ok(storage.insert(coords, value)?.to_value())
}

fn cast_into<S: Scalar>(storage: &ListStorage<S>, dtype: DType) -> Result<AnyListStorage> {
    with_dtype!(dtype, T => {
        Ok(storage.cast::<T>()?.into())
    }, "cast_copy")
}

impl PartialEq for AnyListStorage {
    fn eq(&self, other: &Self) -> bool {
        self.eqeq(other).unwrap_or(false)
    }
}

impl SparseStorage for AnyListStorage {
    fn shape(&self) -> &[usize] {
        AnyListStorage::shape(self)
    }

    fn nnz(&self) -> usize {
        self.count_elements()
    }

    fn dtype(&self) -> DType {
        AnyListStorage::dtype(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_converts_default() {
        let m = AnyListStorage::new(DType::U8, [2, 2], ScalarValue::Int(3)).unwrap();
        assert_eq!(m.dtype(), DType::U8);
        assert_eq!(m.default_value(), ScalarValue::Int(3));
        assert_eq!(m.value_at(&[1, 1]).unwrap(), ScalarValue::Int(3));

        let err = AnyListStorage::new(DType::F64, [2], ScalarValue::Complex(1.0, 1.0)).unwrap_err();
        assert_eq!(err, Error::type_conversion(DType::Complex128, DType::F64));
    }

    #[test]
    fn test_insert_remove_round_trip() {
        let mut m = AnyListStorage::new(DType::I16, [3, 3], 0i64.into()).unwrap();
        assert_eq!(m.insert(&[2, 1], 70000i64.into()).unwrap(), ScalarValue::Int(4464));
        assert_eq!(m.count_elements(), 1);
        assert_eq!(m.remove(&[2, 1]).unwrap(), Some(ScalarValue::Int(4464)));
        assert_eq!(m.remove(&[2, 1]).unwrap(), None);
        assert!(m.downcast_ref::<i16>().unwrap().rows().is_empty());
    }

    #[test]
    fn test_eqeq_checks_dtype() {
        let a = AnyListStorage::new(DType::I32, [2], 0i64.into()).unwrap();
        let b = AnyListStorage::new(DType::I64, [2], 0i64.into()).unwrap();
        assert_eq!(
            a.eqeq(&b),
            Err(Error::DTypeMismatch {
                lhs: DType::I32,
                rhs: DType::I64
            })
        );
        assert!(a != b);
        assert_eq!(a.eqeq(&a.clone()), Ok(true));
    }

    #[test]
    fn test_cast_copy() {
        let mut m = AnyListStorage::new(DType::F64, [2, 2], 0.5.into()).unwrap();
        m.insert(&[0, 1], 2.75.into()).unwrap();

        let ints = m.cast_copy(DType::I32).unwrap();
        assert_eq!(ints.dtype(), DType::I32);
        assert_eq!(ints.value_at(&[0, 1]).unwrap(), ScalarValue::Int(2));
        assert_eq!(ints.default_value(), ScalarValue::Int(0));

        let complex = m.cast_copy(DType::Complex128).unwrap();
        assert_eq!(complex.value_at(&[0, 1]).unwrap(), ScalarValue::Complex(2.75, 0.0));
        assert_eq!(
            complex.cast_copy(DType::F32).unwrap_err(),
            Error::type_conversion(DType::Complex128, DType::F32)
        );
    }

    #[test]
    fn test_trace_object_variant_only() {
        let mut objs = AnyListStorage::new(DType::Object, [3], ObjectRef::NIL.into()).unwrap();
        objs.insert(&[2], ObjectRef::new(5).into()).unwrap();
        let mut seen = Vec::new();
        objs.trace(|obj| seen.push(*obj));
        assert_eq!(seen, vec![ObjectRef::NIL, ObjectRef::new(5)]);

        let nums = AnyListStorage::new(DType::F32, [3], 1.0.into()).unwrap();
        let mut visited = 0;
        nums.trace(|_| visited += 1);
        assert_eq!(visited, 0);
    }

    #[test]
    fn test_sparse_storage_impl() {
        let mut m = AnyListStorage::from(ListStorage::new([2, 5], false).unwrap());
        m.insert(&[1, 4], true.into()).unwrap();
        assert_eq!(m.nnz(), 1);
        assert_eq!(SparseStorage::shape(&m), &[2, 5]);
        assert!((m.density() - 0.1).abs() < 1e-12);
    }

    #[cfg(not(feature = "f16"))]
    #[test]
    fn test_half_dtypes_compiled_out() {
        let err = AnyListStorage::new(DType::F16, [2], 0.0.into()).unwrap_err();
        assert_eq!(err, Error::unsupported_dtype(DType::F16, "new"));
    }
}
