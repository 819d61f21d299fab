//! Row-major iteration over stored elements

use super::node::{List, Node, NodeValue};

/// Iterator over the stored elements of a [`ListStorage`](super::ListStorage)
///
/// Yields `(coords, value)` pairs in ascending row-major order. Coordinates
/// holding only the default value are skipped.
pub struct Iter<'a, T> {
    // One cursor per nesting level currently being walked
    cursors: Vec<Option<&'a Node<T>>>,
    coords: Vec<usize>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(rows: &'a List<T>, rank: usize) -> Self {
        let mut cursors = Vec::with_capacity(rank);
        cursors.push(rows.first());
        Self {
            cursors,
            coords: vec![0; rank],
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Vec<usize>, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.cursors.len().checked_sub(1)?;
            match self.cursors[depth] {
                None => {
                    self.cursors.pop();
                    if let Some(parent) = self.cursors.last_mut() {
                        *parent = parent.and_then(Node::next);
                    }
                }
                Some(node) => {
                    self.coords[depth] = node.key();
                    match node.value() {
                        NodeValue::Leaf(value) => {
                            self.cursors[depth] = node.next();
                            return Some((self.coords.clone(), value));
                        }
                        NodeValue::Branch(nested) => self.cursors.push(nested.first()),
                    }
                }
            }
        }
    }
}
