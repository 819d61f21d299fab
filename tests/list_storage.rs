//! Integration tests for list storage lifecycle and coordinate access

mod common;

use common::{all_coords, assert_pruned, storage_with, stored};
use listr::error::Error;
use listr::list::{ListStorage, Slice};
use listr::storage::SparseStorage;

#[test]
fn test_rank_two_scenario() {
    let mut m = ListStorage::new([3, 3], 0i64).unwrap();
    m.insert(&[0, 0], 5).unwrap();
    m.insert(&[2, 2], 7).unwrap();

    assert_eq!(m.get_ref(&[1, 1]).unwrap(), &0);
    assert_eq!(m.remove(&[0, 0]).unwrap(), Some(5));
    assert_eq!(m.count_elements(), 1);
    assert_eq!(m.get_ref(&[0, 0]).unwrap(), &0);
    assert_eq!(m.get_ref(&[2, 2]).unwrap(), &7);
    assert!(m.rows().find(0).is_none());
}

#[test]
fn test_never_inserted_reads_default() {
    let m = storage_with(&[2, 3, 4], -1i32, &[(&[1, 2, 3], 8)]);
    for coords in all_coords(&[2, 3, 4]) {
        let expected = if coords == [1, 2, 3] { 8 } else { -1 };
        assert_eq!(m.get_ref(&coords).unwrap(), &expected, "at {coords:?}");
    }
}

#[test]
fn test_insert_then_remove_restores_default() {
    let mut m = ListStorage::new([4, 4], 0.0f64).unwrap();
    m.insert(&[3, 1], 2.5).unwrap();
    assert_eq!(m.get_ref(&[3, 1]).unwrap(), &2.5);
    assert_eq!(m.remove(&[3, 1]).unwrap(), Some(2.5));
    assert_eq!(m.get_ref(&[3, 1]).unwrap(), &0.0);
    assert!(m.rows().is_empty());
    assert!(m.is_empty());
}

#[test]
fn test_pruning_at_every_level() {
    let entries: &[(&[usize], u16)] = &[
        (&[0, 0, 0, 0], 1),
        (&[0, 0, 1, 0], 2),
        (&[0, 1, 0, 0], 3),
        (&[1, 1, 1, 1], 4),
    ];
    let mut m = storage_with(&[2, 2, 2, 2], 0, entries);

    for (coords, value) in entries {
        assert_eq!(m.remove(coords).unwrap(), Some(*value));
        assert_pruned(m.rows());
    }
    assert!(m.rows().is_empty());
}

#[test]
fn test_clone_is_distinct_but_equal() {
    let m = storage_with(&[3, 3], 0u32, &[(&[0, 1], 4), (&[2, 0], 9)]);
    let mut copy = m.clone();
    assert!(m.eqeq(&copy).unwrap());

    copy.insert(&[1, 1], 6).unwrap();
    copy.remove(&[0, 1]).unwrap();
    assert_eq!(m.get_ref(&[0, 1]).unwrap(), &4);
    assert_eq!(m.get_ref(&[1, 1]).unwrap(), &0);
    assert!(!m.eqeq(&copy).unwrap());
}

#[test]
fn test_iter_is_row_major() {
    let m = storage_with(
        &[3, 3],
        0i8,
        &[(&[2, 0], 3), (&[0, 2], 2), (&[0, 0], 1), (&[2, 2], 4)],
    );
    assert_eq!(
        stored(&m),
        vec![
            (vec![0, 0], 1),
            (vec![0, 2], 2),
            (vec![2, 0], 3),
            (vec![2, 2], 4)
        ]
    );
}

#[test]
fn test_sparsity_and_density() {
    let m = storage_with(&[4, 5], 0u8, &[(&[0, 0], 1), (&[3, 4], 1)]);
    assert_eq!(m.nnz(), 2);
    assert_eq!(SparseStorage::max_elements(&m), 20);
    assert!((m.density() - 0.1).abs() < 1e-12);
    assert!((m.sparsity() - 0.9).abs() < 1e-12);
}

#[test]
fn test_validation_errors() {
    let mut m = ListStorage::new([2, 2], 0i32).unwrap();
    assert!(matches!(
        m.insert(&[0, 0, 0], 1),
        Err(Error::RankMismatch {
            expected: 2,
            got: 3
        })
    ));
    assert!(matches!(
        m.get_ref(&[0, 2]),
        Err(Error::IndexOutOfBounds {
            dim: 1,
            index: 2,
            size: 2
        })
    ));
    assert!(matches!(
        m.get(&Slice::range(&[0, 0], &[2, 2]).unwrap()),
        Err(Error::NotImplemented { .. })
    ));
    assert!(m.rows().is_empty());
}

#[test]
fn test_rank_one_storage() {
    let mut v = ListStorage::new([10], false).unwrap();
    v.insert(&[9], true).unwrap();
    v.insert(&[0], true).unwrap();
    assert_eq!(v.rows().len(), 2);
    assert_eq!(v.remove(&[9]).unwrap(), Some(true));
    assert_eq!(v.remove(&[9]).unwrap(), None);
    assert_eq!(v.count_elements(), 1);
}
