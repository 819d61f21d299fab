//! Common test utilities
#![allow(dead_code)]

use listr::dtype::Scalar;
use listr::list::{List, ListStorage, NodeValue};

/// Build a storage and insert every `(coords, value)` entry in order
pub fn storage_with<T: Scalar>(shape: &[usize], default: T, entries: &[(&[usize], T)]) -> ListStorage<T> {
    let mut storage = ListStorage::new(shape, default).expect("valid shape");
    for (coords, value) in entries {
        storage.insert(coords, value.clone()).expect("valid coords");
    }
    storage
}

/// Collect the stored elements as owned `(coords, value)` pairs
pub fn stored<T: Scalar>(storage: &ListStorage<T>) -> Vec<(Vec<usize>, T)> {
    storage.iter().map(|(c, v)| (c, v.clone())).collect()
}

/// Assert no intermediate list below `list` is empty and keys ascend
pub fn assert_pruned<T>(list: &List<T>) {
    let mut last = None;
    for node in list.iter() {
        if let Some(prev) = last {
            assert!(node.key() > prev, "keys out of order: {prev} then {}", node.key());
        }
        last = Some(node.key());
        if let NodeValue::Branch(nested) = node.value() {
            assert!(!nested.is_empty(), "empty branch left at key {}", node.key());
            assert_pruned(nested);
        }
    }
}

/// Visit every coordinate of `shape` in row-major order
pub fn all_coords(shape: &[usize]) -> Vec<Vec<usize>> {
    let mut out = vec![Vec::new()];
    for &extent in shape {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                (0..extent).map(move |i| {
                    let mut coords = prefix.clone();
                    coords.push(i);
                    coords
                })
            })
            .collect();
    }
    out
}
