//! Balanced construction of a search tree from an unordered sequence.
//!
//! The input is sorted and de-duplicated, then the index range `[front, back]`
//! is split recursively at `front + (back - front) / 2`. The element at the
//! split point becomes the node for that range, the lower half its left
//! subtree and the upper half its right subtree. Every node of the result has
//! subtrees whose heights differ by at most one.

use std::cmp::Ordering;

use generational_arena::{Arena, Index};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::arena::BstNode;

/// Split point of the inclusive index range `[front, back]`.
pub fn midpoint(front: usize, back: usize) -> usize {
    front + (back - front) / 2
}

/// Sort ascending and drop repeated values.
pub fn sorted_distinct<T: Ord>(elements: impl IntoIterator<Item = T>) -> Vec<T> {
    elements.into_iter().sorted().dedup().collect()
}

/// Sort with `compare` and drop neighbours it reports as `Equal`.
pub fn sorted_distinct_by<T, F>(elements: impl IntoIterator<Item = T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    elements
        .into_iter()
        .sorted_by(&mut compare)
        .dedup_by(|a, b| compare(a, b) == Ordering::Equal)
        .collect()
}

/// Build a balanced tree of the distinct `elements` into `arena`.
///
/// Returns the root index, or `None` for empty input.
#[instrument(level = "debug", skip_all)]
pub fn build<T: Ord>(arena: &mut Arena<BstNode<T>>, elements: impl IntoIterator<Item = T>) -> Option<Index> {
    build_sorted(arena, sorted_distinct(elements))
}

/// Like [`build`], ordering the construction with `compare`.
#[instrument(level = "debug", skip_all)]
pub fn build_by<T, F>(
    arena: &mut Arena<BstNode<T>>,
    elements: impl IntoIterator<Item = T>,
    compare: F,
) -> Option<Index>
where
    F: FnMut(&T, &T) -> Ordering,
{
    build_sorted(arena, sorted_distinct_by(elements, compare))
}

/// Build from values that are already ascending and distinct.
pub fn build_sorted<T>(arena: &mut Arena<BstNode<T>>, sorted: Vec<T>) -> Option<Index> {
    if sorted.is_empty() {
        return None;
    }
    let back = sorted.len() - 1;
    debug!(len = sorted.len(), "building balanced tree");
    let mut values = sorted.into_iter();
    build_range(arena, &mut values, 0, back)
}

/// Consumes `values` in ascending order while laying out `[front, back]`.
///
/// The left range is built before the split element is taken and the right
/// range after it, so the iterator yields exactly the element at each
/// midpoint. Recursion depth is bounded by the height of the result.
fn build_range<T, I>(arena: &mut Arena<BstNode<T>>, values: &mut I, front: usize, back: usize) -> Option<Index>
where
    I: Iterator<Item = T>,
{
    let mid = midpoint(front, back);
    let left = if front < mid {
        build_range(arena, values, front, mid - 1)
    } else {
        None
    };
    let value = values.next()?;
    let right = if mid < back {
        build_range(arena, values, mid + 1, back)
    } else {
        None
    };
    Some(arena.insert(BstNode { value, left, right }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn shape(arena: &Arena<BstNode<i32>>, idx: Option<Index>) -> String {
        match idx.and_then(|i| arena.get(i)) {
            None => "-".to_string(),
            Some(node) if node.is_leaf() => node.value.to_string(),
            Some(node) => format!(
                "{}({},{})",
                node.value,
                shape(arena, node.left),
                shape(arena, node.right)
            ),
        }
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(0, 1, 0)]
    #[case(0, 6, 3)]
    #[case(4, 6, 5)]
    #[case(2, 9, 5)]
    fn given_range_when_splitting_then_lower_middle_is_chosen(
        #[case] front: usize,
        #[case] back: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(midpoint(front, back), expected);
    }

    #[rstest]
    fn given_repeats_when_deduplicating_then_sorted_set_remains() {
        assert_eq!(sorted_distinct(vec![4, 1, 4, 3, 1]), vec![1, 3, 4]);
    }

    #[rstest]
    fn given_reverse_comparator_when_deduplicating_then_descending_set_remains() {
        let values = sorted_distinct_by(vec![2, 9, 2, 5], |a: &i32, b: &i32| b.cmp(a));
        assert_eq!(values, vec![9, 5, 2]);
    }

    #[rstest]
    #[case(vec![], "-")]
    #[case(vec![1], "1")]
    #[case(vec![2, 1], "1(-,2)")]
    #[case(vec![4, 3, 2, 1], "2(1,3(-,4))")]
    #[case(vec![5, 3, 8, 1, 4, 7, 9], "5(3(1,4),8(7,9))")]
    fn given_elements_when_building_then_shape_follows_midpoint_rule(
        #[case] input: Vec<i32>,
        #[case] expected: &str,
    ) {
        let mut arena = Arena::new();
        let root = build(&mut arena, input);
        assert_eq!(shape(&arena, root), expected);
    }

    #[rstest]
    fn given_duplicates_when_building_then_one_node_per_value() {
        let mut arena = Arena::new();
        build(&mut arena, vec![1, 7, 4, 23, 8, 9, 4, 3, 5, 7, 9, 67, 6345, 324]);
        assert_eq!(arena.len(), 11);
    }
}
