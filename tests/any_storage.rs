//! Integration tests for runtime-typed list storage

use listr::dtype::{DType, ObjectRef, ScalarValue};
use listr::error::Error;
use listr::list::{AnyListStorage, ListStorage};
use listr::storage::SparseStorage;

#[test]
fn test_every_available_dtype_round_trips_a_value() {
    for dtype in DType::ALL.into_iter().filter(|d| d.is_available()) {
        let (default, value) = match dtype {
            DType::Object => (
                ScalarValue::Object(ObjectRef::NIL),
                ScalarValue::Object(ObjectRef::new(11)),
            ),
            DType::Bool => (ScalarValue::Bool(false), ScalarValue::Bool(true)),
            d if d.is_complex() => (ScalarValue::Complex(0.0, 0.0), ScalarValue::Complex(1.0, 2.0)),
            d if d.is_float() => (ScalarValue::Float(0.0), ScalarValue::Float(1.5)),
            _ => (ScalarValue::Int(0), ScalarValue::Int(3)),
        };

        let mut m = AnyListStorage::new(dtype, [2, 3], default).unwrap();
        assert_eq!(m.dtype(), dtype);
        assert_eq!(m.insert(&[1, 2], value).unwrap(), value, "{dtype}");
        assert_eq!(m.value_at(&[1, 2]).unwrap(), value);
        assert_eq!(m.value_at(&[0, 0]).unwrap(), default);

        let copy = m.clone();
        assert!(m.eqeq(&copy).unwrap());
        assert_eq!(m.remove(&[1, 2]).unwrap(), Some(value));
        assert_eq!(m.nnz(), 0);
        assert!(!m.eqeq(&copy).unwrap());
    }
}

#[test]
fn test_insert_rejects_unconvertible_value() {
    let mut m = AnyListStorage::new(DType::I32, [2], ScalarValue::Int(0)).unwrap();
    assert_eq!(
        m.insert(&[0], ScalarValue::Object(ObjectRef::new(1))),
        Err(Error::type_conversion(DType::Object, DType::I32))
    );
    assert_eq!(m.count_elements(), 0);
}

#[test]
fn test_cast_copy_matches_typed_cast() {
    let mut typed = ListStorage::new([3, 3], 0u16).unwrap();
    typed.insert(&[0, 2], 513).unwrap();
    typed.insert(&[2, 0], 7).unwrap();
    let any = AnyListStorage::from(typed.clone());

    let cast = any.cast_copy(DType::U8).unwrap();
    let expected = AnyListStorage::from(typed.cast::<u8>().unwrap());
    assert_eq!(cast, expected);
    assert_eq!(cast.value_at(&[0, 2]).unwrap(), ScalarValue::Int(1));
    assert_eq!(cast.downcast_ref::<u8>().map(|s| s.count_elements()), Some(2));
    assert!(cast.downcast_ref::<u16>().is_none());
}

#[test]
fn test_from_dense_runtime() {
    let dense = [0.0, 1.0, 0.0, 2.0];
    let m = AnyListStorage::from_dense(DType::I8, &dense, [2, 2], &0.0).unwrap();
    assert_eq!(m.dtype(), DType::I8);
    assert_eq!(m.count_elements(), 2);
    assert_eq!(m.count_off_diagonal().unwrap(), 1);
    assert_eq!(m.default_value(), ScalarValue::Int(0));
}

#[test]
fn test_downcast_mut_edits_in_place() {
    let mut m = AnyListStorage::new(DType::F64, [2, 2], ScalarValue::Float(0.0)).unwrap();
    if let Some(typed) = m.downcast_mut::<f64>() {
        typed.insert(&[1, 1], 4.0).unwrap();
    }
    assert_eq!(m.value_at(&[1, 1]).unwrap(), ScalarValue::Float(4.0));
}

#[test]
fn test_errors_pass_through() {
    let m = AnyListStorage::new(DType::U32, [2, 2, 2], ScalarValue::Int(0)).unwrap();
    assert!(matches!(m.count_off_diagonal(), Err(Error::NotImplemented { .. })));
    assert!(matches!(
        m.value_at(&[0, 0]),
        Err(Error::RankMismatch {
            expected: 3,
            got: 2
        })
    ));
    assert!(matches!(
        AnyListStorage::new(DType::U32, Vec::<usize>::new(), ScalarValue::Int(0)),
        Err(Error::InvalidArgument { .. })
    ));
}
