//! Sparse-aware equality
//!
//! Two storages of the same shape are equal when every coordinate reads the
//! same value. The comparison walks only stored nodes: a coordinate stored on
//! one side is compared against the other side's default, and the two
//! defaults are compared only if some coordinate was stored on neither side.

use crate::dtype::Scalar;
use crate::error::{Error, Result};

use super::core::ListStorage;
use super::node::{List, Node, NodeValue};

impl<T: Scalar> ListStorage<T> {
    /// Compare two storages coordinate by coordinate
    ///
    /// Runs in time proportional to the stored elements of both sides.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the shapes differ.
    pub fn eqeq(&self, other: &Self) -> Result<bool> {
        if self.shape != other.shape {
            return Err(Error::shape_mismatch(&self.shape, &other.shape));
        }
        let _span = tracing::debug_span!("list_eqeq", dtype = %T::DTYPE, shape = %self.shape)
            .entered();
        Ok(storages_equal(self, other))
    }
}

impl<T: Scalar> PartialEq for ListStorage<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && storages_equal(self, other)
    }
}

fn storages_equal<T: Scalar>(left: &ListStorage<T>, right: &ListStorage<T>) -> bool {
    let defaults_equal = || left.default == right.default;
    let mut checked = 0usize;

    let walked = match (left.rows.is_empty(), right.rows.is_empty()) {
        (true, true) => return defaults_equal(),
        (true, false) => all_equal_to(&right.rows, &left.default, &mut checked),
        (false, true) => all_equal_to(&left.rows, &right.default, &mut checked),
        (false, false) => lists_equal(
            &left.rows,
            &right.rows,
            &left.default,
            &right.default,
            &mut checked,
        ),
    };

    // Any coordinate stored on neither side reads default on both
    walked && (checked >= left.max_elements() || defaults_equal())
}

fn all_equal_to<T: PartialEq>(list: &List<T>, value: &T, checked: &mut usize) -> bool {
    list.iter().all(|node| node_equal_to(node, value, checked))
}

fn node_equal_to<T: PartialEq>(node: &Node<T>, value: &T, checked: &mut usize) -> bool {
    match node.value() {
        NodeValue::Leaf(stored) => {
            *checked += 1;
            stored == value
        }
        NodeValue::Branch(nested) => all_equal_to(nested, value, checked),
    }
}

fn lists_equal<T: PartialEq>(
    left: &List<T>,
    right: &List<T>,
    left_default: &T,
    right_default: &T,
    checked: &mut usize,
) -> bool {
    let mut l = left.first();
    let mut r = right.first();

    loop {
        match (l, r) {
            (None, None) => return true,
            (Some(ln), None) => {
                if !node_equal_to(ln, right_default, checked) {
                    return false;
                }
                l = ln.next();
            }
            (None, Some(rn)) => {
                if !node_equal_to(rn, left_default, checked) {
                    return false;
                }
                r = rn.next();
            }
            (Some(ln), Some(rn)) if ln.key() < rn.key() => {
                if !node_equal_to(ln, right_default, checked) {
                    return false;
                }
                l = ln.next();
            }
            (Some(ln), Some(rn)) if rn.key() < ln.key() => {
                if !node_equal_to(rn, left_default, checked) {
                    return false;
                }
                r = rn.next();
            }
            (Some(ln), Some(rn)) => {
                let equal = match (ln.value(), rn.value()) {
                    (NodeValue::Leaf(a), NodeValue::Leaf(b)) => {
                        *checked += 1;
                        a == b
                    }
                    (NodeValue::Branch(a), NodeValue::Branch(b)) => {
                        lists_equal(a, b, left_default, right_default, checked)
                    }
                    _ => false,
                };
                if !equal {
                    return false;
                }
                l = ln.next();
                r = rn.next();
            }
        }
    }
}
