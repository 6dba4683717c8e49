use std::fmt;

use generational_arena::Index;

use crate::domain::tree::SearchTree;

/// Tree node stored in the search tree's arena.
///
/// Children are arena indices owned exclusively by this node; a node is
/// reachable from exactly one parent slot (or the root slot).
#[derive(Debug, Clone)]
pub struct BstNode<T> {
    /// Value held by this node
    pub value: T,
    /// Index of the left child, holding strictly smaller values
    pub left: Option<Index>,
    /// Index of the right child, holding strictly larger values
    pub right: Option<Index>,
}

impl<T> BstNode<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn child(&self, side: Side) -> Option<Index> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Index>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

/// Which child slot of a parent a node hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Read-only handle to a node inside a [`SearchTree`].
///
/// Handed out by `find`, `root` and the traversals. The handle borrows the
/// whole tree, so it cannot outlive a traversal callback's borrow nor be used
/// to mutate the ordering.
pub struct NodeRef<'a, T> {
    tree: &'a SearchTree<T>,
    idx: Index,
    node: &'a BstNode<T>,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(tree: &'a SearchTree<T>, idx: Index, node: &'a BstNode<T>) -> Self {
        Self { tree, idx, node }
    }

    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    /// Arena index of the node; stable for as long as the node is alive.
    pub fn index(&self) -> Index {
        self.idx
    }

    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.node.left.and_then(|idx| self.tree.node_ref(idx))
    }

    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.node.right.and_then(|idx| self.tree.node_ref(idx))
    }

    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    pub(crate) fn left_index(&self) -> Option<Index> {
        self.node.left
    }

    pub(crate) fn right_index(&self) -> Option<Index> {
        self.node.right
    }

    /// Height of the subtree rooted here; a leaf has height 0.
    pub fn height(&self) -> isize {
        self.tree.subtree_height(Some(self.idx))
    }

    /// Identity comparison: true only for the very same node.
    pub fn same_node(&self, other: &NodeRef<'_, T>) -> bool {
        self.idx == other.idx
    }
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.idx)
            .field("value", &self.node.value)
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn given_fresh_node_when_checking_leaf_then_true() {
        let node = BstNode::new(7);
        assert!(node.is_leaf());
        assert_eq!(node.value, 7);
    }

    #[rstest]
    fn given_tree_when_walking_handles_then_children_match_shape() {
        let tree = SearchTree::from_elements([2, 1, 3]);
        let root = tree.root().unwrap();
        assert_eq!(*root.value(), 2);
        assert_eq!(root.left().map(|n| *n.value()), Some(1));
        assert_eq!(root.right().map(|n| *n.value()), Some(3));
        assert_eq!(root.height(), 1);
        assert!(root.left().unwrap().is_leaf());
    }

    #[rstest]
    fn given_two_handles_when_comparing_identity_then_only_same_node_matches() {
        let tree = SearchTree::from_elements([2, 1, 3]);
        let root = tree.root().unwrap();
        let found = tree.find(&2).unwrap();
        let left = root.left().unwrap();
        assert!(root.same_node(&found));
        assert!(!root.same_node(&left));
        assert_eq!(format!("{}", left), "1");
    }
}
