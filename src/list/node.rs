//! Ordered singly-linked lists keyed by coordinate
//!
//! A [`List`] is one nesting level of a list storage: its nodes carry the
//! coordinate of that level as key, in strictly ascending order, and either a
//! scalar (leaf level) or the owned list of the next level down.

use std::fmt;

type Link<T> = Option<Box<Node<T>>>;

/// How [`List::insert`] treats a key that is already present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// Keep the existing node and drop the supplied value
    FindOrCreate,
    /// Replace the existing value, dropping the old one
    Overwrite,
}

/// Value held by a node
#[derive(Clone)]
pub enum NodeValue<T> {
    /// Scalar at the leaf level
    Leaf(T),
    /// Nested list at an intermediate level
    Branch(List<T>),
}

impl<T> NodeValue<T> {
    /// The scalar, if this is a leaf
    #[inline]
    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Branch(_) => None,
        }
    }

    /// The nested list, if this is a branch
    #[inline]
    pub fn as_branch(&self) -> Option<&List<T>> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(list) => Some(list),
        }
    }

    /// The nested list, if this is a branch
    #[inline]
    pub fn as_branch_mut(&mut self) -> Option<&mut List<T>> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(list) => Some(list),
        }
    }

    /// Unwrap a leaf into its scalar
    #[inline]
    pub fn into_leaf(self) -> Option<T> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Branch(_) => None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(value) => value.fmt(f),
            Self::Branch(list) => list.fmt(f),
        }
    }
}

/// One entry of a [`List`]
pub struct Node<T> {
    key: usize,
    value: NodeValue<T>,
    next: Link<T>,
}

impl<T> Node<T> {
    fn boxed(key: usize, value: NodeValue<T>, next: Link<T>) -> Box<Self> {
        Box::new(Self { key, value, next })
    }

    /// Coordinate of this node at its nesting level
    #[inline]
    pub fn key(&self) -> usize {
        self.key
    }

    /// Value held by this node
    #[inline]
    pub fn value(&self) -> &NodeValue<T> {
        &self.value
    }

    /// Value held by this node
    #[inline]
    pub fn value_mut(&mut self) -> &mut NodeValue<T> {
        &mut self.value
    }

    /// Following node, if any
    #[inline]
    pub fn next(&self) -> Option<&Node<T>> {
        self.next.as_deref()
    }

    /// Link a new node directly after this one in O(1)
    ///
    /// The caller guarantees `key` sorts strictly between this node's key and
    /// the following node's key.
    pub fn insert_after(&mut self, key: usize, value: NodeValue<T>) -> &mut Node<T> {
        debug_assert!(key > self.key, "insert_after: key {key} <= {}", self.key);
        debug_assert!(
            self.next.as_deref().map_or(true, |next| key < next.key),
            "insert_after: key {key} does not precede the following node"
        );
        let next = self.next.take();
        self.next.insert(Node::boxed(key, value, next))
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// Strictly ascending, key-unique singly-linked list
pub struct List<T> {
    first: Link<T>,
}

impl<T> List<T> {
    /// Create an empty list
    #[inline]
    pub const fn new() -> Self {
        Self { first: None }
    }

    /// Returns true if the list holds no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Number of nodes at this level (not counting nested lists)
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// First node, if any
    #[inline]
    pub fn first(&self) -> Option<&Node<T>> {
        self.first.as_deref()
    }

    /// Iterate over the nodes of this level in ascending key order
    #[inline]
    pub fn iter(&self) -> Nodes<'_, T> {
        Nodes {
            next: self.first.as_deref(),
        }
    }

    /// Find the node with the given key
    pub fn find(&self, key: usize) -> Option<&Node<T>> {
        for node in self.iter() {
            if node.key >= key {
                return (node.key == key).then_some(node);
            }
        }
        None
    }

    /// Find the node with the given key
    pub fn find_mut(&mut self, key: usize) -> Option<&mut Node<T>> {
        let mut cursor = self.first.as_deref_mut();
        while let Some(node) = cursor {
            if node.key >= key {
                return (node.key == key).then_some(node);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Link of the first node whose key is not less than `key`
    fn seek_mut(&mut self, key: usize) -> &mut Link<T> {
        let mut link = &mut self.first;
        while link.as_deref().is_some_and(|node| node.key < key) {
            link = match link {
                Some(node) => &mut node.next,
                None => unreachable!("link checked non-empty"),
            };
        }
        link
    }

    /// Insert `value` at `key`, keeping keys in ascending order
    ///
    /// With [`InsertMode::FindOrCreate`] an existing node is returned
    /// untouched and `value` is dropped. With [`InsertMode::Overwrite`] the
    /// existing value is replaced and dropped.
    pub fn insert(&mut self, mode: InsertMode, key: usize, value: NodeValue<T>) -> &mut Node<T> {
        let link = self.seek_mut(key);
        if !link.as_deref().is_some_and(|node| node.key == key) {
            let next = link.take();
            return link.insert(Node::boxed(key, value, next));
        }

        match link.as_deref_mut() {
            Some(node) => {
                if mode == InsertMode::Overwrite {
                    node.value = value;
                }
                node
            }
            None => unreachable!("key {key} checked present"),
        }
    }

    /// Detach the node at `key` and return its value
    ///
    /// Does not look into nested lists.
    pub fn remove(&mut self, key: usize) -> Option<NodeValue<T>> {
        let link = self.seek_mut(key);
        if !link.as_deref().is_some_and(|node| node.key == key) {
            return None;
        }
        let mut node = link.take()?;
        *link = node.next.take();
        Some(node.value)
    }

    /// Visit every scalar reachable from this list, in ascending order
    pub fn trace<F: FnMut(&T)>(&self, visit: &mut F) {
        for node in self.iter() {
            match &node.value {
                NodeValue::Leaf(value) => visit(value),
                NodeValue::Branch(list) => list.trace(visit),
            }
        }
    }

    /// Number of scalars reachable from this list
    pub fn count_leaves(&self) -> usize {
        self.iter()
            .map(|node| match &node.value {
                NodeValue::Leaf(_) => 1,
                NodeValue::Branch(list) => list.count_leaves(),
            })
            .sum()
    }

    /// Deep copy with every scalar passed through `f`
    ///
    /// Stops at the first error; the partial copy is dropped.
    pub fn try_map<U, E, F>(&self, f: &mut F) -> Result<List<U>, E>
    where
        F: FnMut(&T) -> Result<U, E>,
    {
        let mut out = List::new();
        let mut tail = &mut out.first;
        for node in self.iter() {
            let value = match &node.value {
                NodeValue::Leaf(value) => NodeValue::Leaf(f(value)?),
                NodeValue::Branch(list) => NodeValue::Branch(list.try_map(f)?),
            };
            let appended = tail.insert(Node::boxed(node.key, value, None));
            tail = &mut appended.next;
        }
        Ok(out)
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        let mut out = List::new();
        let mut tail = &mut out.first;
        for node in self.iter() {
            let appended = tail.insert(Node::boxed(node.key, node.value.clone(), None));
            tail = &mut appended.next;
        }
        out
    }
}

// Unlink iteratively; the default recursive drop would use one stack frame
// per node.
impl<T> Drop for List<T> {
    fn drop(&mut self) {
        let mut link = self.first.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|node| (node.key, &node.value)))
            .finish()
    }
}

/// Iterator over the nodes of one [`List`] level
pub struct Nodes<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Nodes<'a, T> {
    type Item = &'a Node<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_list(entries: &[(usize, i32)]) -> List<i32> {
        let mut list = List::new();
        for &(key, value) in entries {
            list.insert(InsertMode::Overwrite, key, NodeValue::Leaf(value));
        }
        list
    }

    fn keys<T>(list: &List<T>) -> Vec<usize> {
        list.iter().map(Node::key).collect()
    }

    #[test]
    fn test_insert_keeps_ascending_order() {
        let list = leaf_list(&[(5, 50), (1, 10), (3, 30), (0, 0), (9, 90)]);
        assert_eq!(keys(&list), vec![0, 1, 3, 5, 9]);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_find() {
        let list = leaf_list(&[(2, 20), (4, 40)]);
        assert_eq!(list.find(4).and_then(|n| n.value().as_leaf()), Some(&40));
        assert!(list.find(3).is_none());
        assert!(list.find(0).is_none());
        assert!(list.find(7).is_none());
        assert!(List::<i32>::new().find(0).is_none());
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let mut list = leaf_list(&[(2, 20)]);
        let node = list.insert(InsertMode::Overwrite, 2, NodeValue::Leaf(21));
        assert_eq!(node.value().as_leaf(), Some(&21));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_find_or_create_keeps_existing() {
        let mut list = leaf_list(&[(2, 20)]);
        let node = list.insert(InsertMode::FindOrCreate, 2, NodeValue::Leaf(99));
        assert_eq!(node.value().as_leaf(), Some(&20));

        let node = list.insert(InsertMode::FindOrCreate, 1, NodeValue::Leaf(10));
        assert_eq!(node.key(), 1);
        assert_eq!(keys(&list), vec![1, 2]);
    }

    #[test]
    fn test_insert_after() {
        let mut list = List::new();
        let first = list.insert(InsertMode::FindOrCreate, 1, NodeValue::Leaf(1));
        let second = first.insert_after(4, NodeValue::Leaf(4));
        second.insert_after(6, NodeValue::Leaf(6));
        if let Some(node) = list.find_mut(1) {
            node.insert_after(2, NodeValue::Leaf(2));
        }
        assert_eq!(keys(&list), vec![1, 2, 4, 6]);
    }

    #[test]
    fn test_remove() {
        let mut list = leaf_list(&[(0, 0), (3, 30), (8, 80)]);
        assert!(list.remove(5).is_none());
        assert_eq!(list.remove(3).and_then(NodeValue::into_leaf), Some(30));
        assert_eq!(keys(&list), vec![0, 8]);
        assert_eq!(list.remove(0).and_then(NodeValue::into_leaf), Some(0));
        assert_eq!(list.remove(8).and_then(NodeValue::into_leaf), Some(80));
        assert!(list.is_empty());
        assert!(list.remove(8).is_none());
    }

    #[test]
    fn test_nested_count_and_trace() {
        let mut rows: List<i32> = List::new();
        for (row, col, value) in [(0, 1, 1), (0, 2, 2), (3, 0, 3)] {
            let node = rows.insert(InsertMode::FindOrCreate, row, NodeValue::Branch(List::new()));
            if let Some(cols) = node.value_mut().as_branch_mut() {
                cols.insert(InsertMode::Overwrite, col, NodeValue::Leaf(value));
            }
        }
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.count_leaves(), 3);

        let mut seen = Vec::new();
        rows.trace(&mut |v| seen.push(*v));
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_clone_is_independent() {
        let list = leaf_list(&[(1, 1), (2, 2)]);
        let mut copy = list.clone();
        copy.insert(InsertMode::Overwrite, 1, NodeValue::Leaf(100));
        copy.remove(2);
        assert_eq!(list.find(1).and_then(|n| n.value().as_leaf()), Some(&1));
        assert!(list.find(2).is_some());
    }

    #[test]
    fn test_try_map_stops_on_error() {
        let list = leaf_list(&[(0, 1), (1, -1), (2, 3)]);
        let mapped: Result<List<u32>, i32> =
            list.try_map(&mut |v| u32::try_from(*v).map_err(|_| *v));
        assert_eq!(mapped.err(), Some(-1));

        let doubled: Result<List<i64>, ()> = list.try_map(&mut |v| Ok(*v as i64 * 2));
        let doubled = doubled.unwrap_or_default();
        assert_eq!(doubled.find(2).and_then(|n| n.value().as_leaf()), Some(&6));
    }

    #[test]
    fn test_long_list_clone_and_drop() {
        let mut list = List::new();
        let mut prev = list.insert(InsertMode::FindOrCreate, 0, NodeValue::Leaf(0u8));
        for key in 1..200_000 {
            prev = prev.insert_after(key, NodeValue::Leaf(1));
        }
        let copy = list.clone();
        assert_eq!(copy.len(), 200_000);
        drop(list);
        drop(copy);
    }

    #[test]
    fn test_debug_format() {
        let list = leaf_list(&[(1, 10), (4, 40)]);
        assert_eq!(format!("{list:?}"), "{1: 10, 4: 40}");
    }
}
