use std::cmp::Ordering;
use std::collections::HashMap;
use std::mem;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

use crate::domain::arena::{BstNode, NodeRef, Side};
use crate::domain::builder;
use crate::domain::traversal::PostOrderIter;

/// Parent link of a node position: `None` is the root slot.
type Slot = Option<(Index, Side)>;

/// Outcome of a binary search walk.
#[derive(Debug, Clone, Copy)]
struct Probe {
    /// Node holding the searched value, if present
    node: Option<Index>,
    /// Slot of that node, or the empty slot where the value would attach
    slot: Slot,
}

/// Binary search tree over an ordered element type.
///
/// Nodes live in a generational arena and are addressed by [`Index`]. The
/// stored values always form a set in ascending in-order sequence. Height
/// balance holds right after construction and after [`SearchTree::rebalance`];
/// `insert` and `remove_value` do not restore it.
#[derive(Debug, Clone)]
pub struct SearchTree<T> {
    /// Arena storage for all tree nodes
    arena: Arena<BstNode<T>>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl<T> Default for SearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SearchTree<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Build a balanced tree ordering the construction with `compare`.
    ///
    /// The comparator is used for the initial sort and de-duplication only.
    /// Later `insert`/`remove_value` calls use `T`'s natural order, so the
    /// comparator must agree with it for the tree to stay searchable.
    pub fn from_elements_by<F>(elements: impl IntoIterator<Item = T>, compare: F) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut arena = Arena::new();
        let root = builder::build_by(&mut arena, elements, compare);
        Self { arena, root }
    }

    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.and_then(|idx| self.node_ref(idx))
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn min(&self) -> Option<&T> {
        self.extreme(Side::Left)
    }

    pub fn max(&self) -> Option<&T> {
        self.extreme(Side::Right)
    }

    fn extreme(&self, side: Side) -> Option<&T> {
        let (_, mut node) = self.entry(self.root)?;
        while let Some((_, next)) = self.entry(node.child(side)) {
            node = next;
        }
        Some(&node.value)
    }

    /// True when every node's subtrees differ in height by at most one.
    #[instrument(level = "debug", skip(self))]
    pub fn is_balanced(&self) -> bool {
        self.fold_heights(self.root, true).is_some()
    }

    /// Height of the subtree at `idx`: -1 when absent, 0 for a leaf.
    pub(crate) fn subtree_height(&self, idx: Option<Index>) -> isize {
        self.fold_heights(idx, false).unwrap_or(-1)
    }

    /// Post-order fold of child heights below `start`.
    ///
    /// Child heights are dropped from the map once their parent is computed,
    /// so it holds at most one entry per pending subtree. With `balanced_only`
    /// the fold stops with `None` at the first node whose subtrees differ by
    /// more than one.
    fn fold_heights(&self, start: Option<Index>, balanced_only: bool) -> Option<isize> {
        let Some(start) = start else {
            return Some(-1);
        };
        let mut heights: HashMap<Index, isize> = HashMap::new();
        for node in PostOrderIter::starting_at(self, Some(start)) {
            let (left, right) = (node.left_index(), node.right_index());
            let left = left.and_then(|idx| heights.remove(&idx)).unwrap_or(-1);
            let right = right.and_then(|idx| heights.remove(&idx)).unwrap_or(-1);
            if balanced_only && (left - right).abs() > 1 {
                trace!(index = ?node.index(), left, right, "unbalanced node");
                return None;
            }
            heights.insert(node.index(), 1 + left.max(right));
        }
        heights.remove(&start)
    }

    pub(crate) fn root_index(&self) -> Option<Index> {
        self.root
    }

    pub(crate) fn entry(&self, idx: Option<Index>) -> Option<(Index, &BstNode<T>)> {
        let idx = idx?;
        self.arena.get(idx).map(|node| (idx, node))
    }

    pub(crate) fn node_ref(&self, idx: Index) -> Option<NodeRef<'_, T>> {
        self.arena.get(idx).map(|node| NodeRef::new(self, idx, node))
    }

    fn set_slot(&mut self, slot: Slot, child: Option<Index>) {
        match slot {
            None => self.root = child,
            Some((parent, side)) => {
                if let Some(node) = self.arena.get_mut(parent) {
                    node.set_child(side, child);
                }
            }
        }
    }

    /// Leftmost node below `start`, with the slot it hangs from.
    fn leftmost(&self, start: Index, slot: Slot) -> (Index, Slot) {
        let (mut current, mut slot) = (start, slot);
        while let Some((_, node)) = self.entry(Some(current)) {
            match node.left {
                Some(left) => {
                    slot = Some((current, Side::Left));
                    current = left;
                }
                None => break,
            }
        }
        (current, slot)
    }
}

impl<T: Ord> SearchTree<T> {
    /// Build a balanced tree holding the distinct `elements`.
    #[instrument(level = "debug", skip_all)]
    pub fn from_elements(elements: impl IntoIterator<Item = T>) -> Self {
        let mut arena = Arena::new();
        let root = builder::build(&mut arena, elements);
        Self { arena, root }
    }

    fn probe(&self, value: &T) -> Probe {
        let mut slot = None;
        let mut current = self.root;
        while let Some((idx, node)) = self.entry(current) {
            let side = match value.cmp(&node.value) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    return Probe {
                        node: Some(idx),
                        slot,
                    }
                }
            };
            slot = Some((idx, side));
            current = node.child(side);
        }
        Probe { node: None, slot }
    }

    /// Attach `value` as a new leaf. Returns false if it was already present.
    ///
    /// No rebalancing happens; ascending or descending runs of inserts grow
    /// the height linearly.
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, value: T) -> bool {
        let probe = self.probe(&value);
        if probe.node.is_some() {
            trace!("value already present");
            return false;
        }
        let idx = self.arena.insert(BstNode::new(value));
        self.set_slot(probe.slot, Some(idx));
        debug!(?idx, "attached leaf");
        true
    }

    /// Remove `value`. Returns false and leaves the tree untouched if absent.
    ///
    /// A node with two children trades values with its in-order successor,
    /// which then has at most one child. The node holding the value is
    /// unlinked by moving its only child (or nothing) into its parent slot.
    #[instrument(level = "trace", skip_all)]
    pub fn remove_value(&mut self, value: &T) -> bool {
        let probe = self.probe(value);
        let Some(target) = probe.node else {
            trace!("value not present");
            return false;
        };
        let Some((_, node)) = self.entry(Some(target)) else {
            return false;
        };
        let (mut doomed, mut slot) = (target, probe.slot);

        if let (Some(_), Some(right)) = (node.left, node.right) {
            let (successor, successor_slot) = self.leftmost(right, Some((target, Side::Right)));
            if let (Some(a), Some(b)) = self.arena.get2_mut(target, successor) {
                mem::swap(&mut a.value, &mut b.value);
            }
            debug!(?target, ?successor, "swapped with in-order successor");
            doomed = successor;
            slot = successor_slot;
        }

        let orphan = self.entry(Some(doomed)).and_then(|(_, n)| n.left.or(n.right));
        self.set_slot(slot, orphan);
        self.arena.remove(doomed);
        debug!(?doomed, ?orphan, "unlinked node");
        true
    }

    /// Node holding `value`, if any.
    #[instrument(level = "trace", skip_all)]
    pub fn find(&self, value: &T) -> Option<NodeRef<'_, T>> {
        self.probe(value).node.and_then(|idx| self.node_ref(idx))
    }

    pub fn contains(&self, value: &T) -> bool {
        self.probe(value).node.is_some()
    }

    /// Height of the subtree rooted at `value`, or `None` if absent.
    #[instrument(level = "trace", skip_all)]
    pub fn height(&self, value: &T) -> Option<isize> {
        self.find(value).map(|node| node.height())
    }

    /// Number of edges from the root to the node holding `value`.
    ///
    /// The walk stops on the located node's index, not on an equal value.
    #[instrument(level = "trace", skip_all)]
    pub fn depth(&self, value: &T) -> Option<usize> {
        let target = self.probe(value).node?;
        let mut steps = 0;
        let mut current = self.root;
        while let Some((idx, node)) = self.entry(current) {
            if idx == target {
                return Some(steps);
            }
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                _ => node.right,
            };
            steps += 1;
        }
        None
    }

    /// Rebuild a balanced shape holding the same values.
    #[instrument(level = "debug", skip(self))]
    pub fn rebalance(&mut self) {
        let order: Vec<Index> = self.iter_in_order().map(|node| node.index()).collect();
        let values: Vec<T> = order
            .into_iter()
            .filter_map(|idx| self.arena.remove(idx))
            .map(|node| node.value)
            .collect();
        self.clear();
        debug!(len = values.len(), "rebuilding from in-order values");
        self.root = builder::build(&mut self.arena, values);
    }

    /// Stored values in ascending order.
    pub fn values(&self) -> Vec<&T> {
        self.iter_in_order().map(|node| node.value()).collect()
    }
}

impl<T: Ord> FromIterator<T> for SearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<T: Ord> Extend<T> for SearchTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}
