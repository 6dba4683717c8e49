//! Depth-first and breadth-first traversals.
//!
//! All traversals are iterative: pre-, in- and post-order keep an explicit
//! stack of arena indices, level order a FIFO queue. The visitor entry points
//! on [`SearchTree`] drive the lazy iterators and pass each node's position in
//! the visiting sequence, counted once per visit starting at 0.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::arena::NodeRef;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::SearchTree;

/// Traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Breadth-first, shallowest nodes first
    Level,
    /// Node, then left subtree, then right subtree
    Pre,
    /// Left subtree, node, right subtree: ascending values
    #[default]
    In,
    /// Left subtree, right subtree, then node
    Post,
}

impl Order {
    pub const ALL: [Order; 4] = [Order::Level, Order::Pre, Order::In, Order::Post];

    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Level => "level",
            Order::Pre => "pre",
            Order::In => "in",
            Order::Post => "post",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "level" | "level-order" | "bfs" => Ok(Order::Level),
            "pre" | "pre-order" | "preorder" => Ok(Order::Pre),
            "in" | "in-order" | "inorder" => Ok(Order::In),
            "post" | "post-order" | "postorder" => Ok(Order::Post),
            other => Err(DomainError::UnknownOrder(other.to_string())),
        }
    }
}

/// Dynamically dispatched visitor: `(value, node, position)`.
pub type DynVisitor<'v, T> = dyn FnMut(&T, NodeRef<'_, T>, usize) + 'v;

impl<T> SearchTree<T> {
    pub fn iter_level_order(&self) -> LevelOrderIter<'_, T> {
        LevelOrderIter::new(self)
    }

    pub fn iter_pre_order(&self) -> PreOrderIter<'_, T> {
        PreOrderIter::new(self)
    }

    pub fn iter_in_order(&self) -> InOrderIter<'_, T> {
        InOrderIter::new(self)
    }

    pub fn iter_post_order(&self) -> PostOrderIter<'_, T> {
        PostOrderIter::new(self)
    }

    /// Iterator for `order`, boxed so the order can be picked at runtime.
    pub fn iter(&self, order: Order) -> Box<dyn Iterator<Item = NodeRef<'_, T>> + '_> {
        match order {
            Order::Level => Box::new(self.iter_level_order()),
            Order::Pre => Box::new(self.iter_pre_order()),
            Order::In => Box::new(self.iter_in_order()),
            Order::Post => Box::new(self.iter_post_order()),
        }
    }

    #[instrument(level = "trace", skip_all)]
    pub fn level_order<'a, F>(&'a self, visitor: F)
    where
        F: FnMut(&'a T, NodeRef<'a, T>, usize),
    {
        visit_all(self.iter_level_order(), visitor);
    }

    #[instrument(level = "trace", skip_all)]
    pub fn pre_order<'a, F>(&'a self, visitor: F)
    where
        F: FnMut(&'a T, NodeRef<'a, T>, usize),
    {
        visit_all(self.iter_pre_order(), visitor);
    }

    #[instrument(level = "trace", skip_all)]
    pub fn in_order<'a, F>(&'a self, visitor: F)
    where
        F: FnMut(&'a T, NodeRef<'a, T>, usize),
    {
        visit_all(self.iter_in_order(), visitor);
    }

    #[instrument(level = "trace", skip_all)]
    pub fn post_order<'a, F>(&'a self, visitor: F)
    where
        F: FnMut(&'a T, NodeRef<'a, T>, usize),
    {
        visit_all(self.iter_post_order(), visitor);
    }

    /// Runtime-selected traversal.
    ///
    /// A missing visitor is rejected before any node is touched.
    #[instrument(level = "debug", skip(self, visitor))]
    pub fn traverse(&self, order: Order, visitor: Option<&mut DynVisitor<'_, T>>) -> DomainResult<()> {
        let visitor = visitor.ok_or(DomainError::MissingVisitor { order })?;
        for (position, node) in self.iter(order).enumerate() {
            visitor(node.value(), node, position);
        }
        Ok(())
    }
}

fn visit_all<'a, T: 'a, I, F>(nodes: I, mut visitor: F)
where
    I: Iterator<Item = NodeRef<'a, T>>,
    F: FnMut(&'a T, NodeRef<'a, T>, usize),
{
    for (position, node) in nodes.enumerate() {
        visitor(node.value(), node, position);
    }
}

/// Breadth-first iterator over a FIFO queue seeded with the root.
pub struct LevelOrderIter<'a, T> {
    tree: &'a SearchTree<T>,
    queue: VecDeque<Option<Index>>,
}

impl<'a, T> LevelOrderIter<'a, T> {
    fn new(tree: &'a SearchTree<T>) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(tree.root_index());
        Self { tree, queue }
    }
}

impl<'a, T> Iterator for LevelOrderIter<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.queue.pop_front() {
            // absent children are dropped here without enqueuing anything
            let Some((idx, node)) = self.tree.entry(slot) else {
                continue;
            };
            self.queue.push_back(node.left);
            self.queue.push_back(node.right);
            return Some(NodeRef::new(self.tree, idx, node));
        }
        None
    }
}

/// Pre-order: visit, stash the right child, descend left.
pub struct PreOrderIter<'a, T> {
    tree: &'a SearchTree<T>,
    stack: Vec<Index>,
    current: Option<Index>,
}

impl<'a, T> PreOrderIter<'a, T> {
    fn new(tree: &'a SearchTree<T>) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: tree.root_index(),
        }
    }
}

impl<'a, T> Iterator for PreOrderIter<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.current.take().or_else(|| self.stack.pop());
        let (idx, node) = self.tree.entry(slot)?;
        if let Some(right) = node.right {
            self.stack.push(right);
        }
        self.current = node.left;
        Some(NodeRef::new(self.tree, idx, node))
    }
}

/// In-order: push while descending left, visit on pop, then go right.
pub struct InOrderIter<'a, T> {
    tree: &'a SearchTree<T>,
    stack: Vec<Index>,
    current: Option<Index>,
}

impl<'a, T> InOrderIter<'a, T> {
    fn new(tree: &'a SearchTree<T>) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: tree.root_index(),
        }
    }
}

impl<'a, T> Iterator for InOrderIter<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, node)) = self.tree.entry(self.current) {
            self.stack.push(idx);
            self.current = node.left;
        }
        let (idx, node) = self.tree.entry(self.stack.pop())?;
        self.current = node.right;
        Some(NodeRef::new(self.tree, idx, node))
    }
}

/// Post-order with a single stack.
///
/// `prev` holds the index of the last visited node. A node on top of the
/// stack is visited once its right child is absent or is `prev`; the check is
/// by index so equal values never confuse it.
pub struct PostOrderIter<'a, T> {
    tree: &'a SearchTree<T>,
    stack: Vec<Index>,
    current: Option<Index>,
    prev: Option<Index>,
}

impl<'a, T> PostOrderIter<'a, T> {
    fn new(tree: &'a SearchTree<T>) -> Self {
        Self::starting_at(tree, tree.root_index())
    }

    /// Post-order over the subtree rooted at `start` only.
    pub(crate) fn starting_at(tree: &'a SearchTree<T>, start: Option<Index>) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: start,
            prev: None,
        }
    }
}

impl<'a, T> Iterator for PostOrderIter<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((idx, node)) = self.tree.entry(self.current) {
                self.stack.push(idx);
                self.current = node.left;
                continue;
            }
            let (top, node) = self.tree.entry(self.stack.last().copied())?;
            match node.right {
                Some(right) if self.prev != Some(right) => self.current = Some(right),
                _ => {
                    self.stack.pop();
                    self.prev = Some(top);
                    return Some(NodeRef::new(self.tree, top, node));
                }
            }
        }
    }
}
