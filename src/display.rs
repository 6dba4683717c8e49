//! Read-only renderers for search trees.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use termtree::Tree;
use tracing::instrument;

use crate::domain::{NodeRef, SearchTree};

const EMPTY: &str = "(empty)";
const ABSENT: &str = "∅";

/// How the binary prints a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    /// Top-down outline, left child listed first
    Tree,
    /// Rotated layout: right subtree above, left subtree below
    #[default]
    Sideways,
}

impl Display for DisplayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayStyle::Tree => f.write_str("tree"),
            DisplayStyle::Sideways => f.write_str("sideways"),
        }
    }
}

pub trait TreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: Display> TreeConvert for NodeRef<'_, T> {
    fn to_tree_string(&self) -> Tree<String> {
        let (left, right) = (self.left(), self.right());
        // a lone child keeps its side visible through a placeholder sibling
        let leaves: Vec<Tree<String>> = match (left, right) {
            (None, None) => Vec::new(),
            (l, r) => [l, r]
                .into_iter()
                .map(|child| match child {
                    Some(node) => node.to_tree_string(),
                    None => Tree::new(ABSENT.to_string()),
                })
                .collect(),
        };
        Tree::new(self.value().to_string()).with_leaves(leaves)
    }
}

impl<T: Display> TreeConvert for SearchTree<T> {
    #[instrument(level = "debug", skip_all)]
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root) => root.to_tree_string(),
            None => Tree::new(EMPTY.to_string()),
        }
    }
}

/// Render the subtree at `node` rotated a quarter turn.
///
/// Larger values sit above their parent, smaller ones below; each line ends
/// with a newline.
pub fn render_sideways<T: Display>(node: Option<NodeRef<'_, T>>) -> String {
    let mut out = String::new();
    match node {
        Some(node) => sideways(&mut out, node, "", true),
        None => {
            out.push_str(EMPTY);
            out.push('\n');
        }
    }
    out
}

fn sideways<T: Display>(out: &mut String, node: NodeRef<'_, T>, prefix: &str, is_left: bool) {
    if let Some(right) = node.right() {
        let gutter = if is_left { "│      " } else { "       " };
        sideways(out, right, &format!("{prefix}{gutter}"), false);
    }
    let connector = if is_left { "└───── " } else { "┌───── " };
    out.push_str(&format!("{prefix}{connector}{}\n", node.value()));
    if let Some(left) = node.left() {
        let gutter = if is_left { "       " } else { "│      " };
        sideways(out, left, &format!("{prefix}{gutter}"), true);
    }
}

/// Render the subtree at `node` in `style`.
pub fn render<T: Display>(node: Option<NodeRef<'_, T>>, style: DisplayStyle) -> String {
    match style {
        DisplayStyle::Sideways => render_sideways(node),
        DisplayStyle::Tree => match node {
            Some(node) => node.to_tree_string().to_string(),
            None => format!("{EMPTY}\n"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn given_three_nodes_when_rendering_sideways_then_right_is_on_top() {
        let tree = SearchTree::from_elements([1, 2, 3]);
        let expected = "│      ┌───── 3\n└───── 2\n       └───── 1\n";
        assert_eq!(render_sideways(tree.root()), expected);
    }

    #[rstest]
    fn given_empty_tree_when_rendering_then_placeholder() {
        let tree: SearchTree<i32> = SearchTree::new();
        assert_eq!(render(tree.root(), DisplayStyle::Sideways), "(empty)\n");
        assert_eq!(render(tree.root(), DisplayStyle::Tree), "(empty)\n");
        assert_eq!(tree.to_tree_string().to_string(), "(empty)\n");
    }

    #[rstest]
    fn given_lone_right_child_when_converting_then_left_placeholder_is_listed() {
        let mut tree = SearchTree::new();
        tree.extend([1, 2]);
        let rendered = tree.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "1");
        assert!(lines[1].ends_with(ABSENT));
        assert!(lines[2].ends_with('2'));
    }

    #[rstest]
    fn given_subtree_handle_when_rendering_then_only_subtree_is_printed() {
        let tree = SearchTree::from_elements([5, 3, 8, 1, 4, 7, 9]);
        let rendered = render_sideways(tree.find(&8));
        assert_eq!(rendered, "│      ┌───── 9\n└───── 8\n       └───── 7\n");
    }
}
