//! Binary search tree with balanced construction, iterative traversals and
//! on-demand rebalancing.
//!
//! ```
//! use rsbst::SearchTree;
//!
//! let mut tree = SearchTree::from_elements([5, 3, 8, 1, 4, 7, 9]);
//! tree.extend([10, 11, 12]);
//! assert!(!tree.is_balanced());
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use display::{DisplayStyle, TreeConvert};
pub use domain::{DomainError, DomainResult, NodeRef, Order, SearchTree};
