//! Domain layer: the search tree and its algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod traversal;
pub mod tree;

pub use arena::{BstNode, NodeRef};
pub use error::{DomainError, DomainResult};
pub use traversal::{InOrderIter, LevelOrderIter, Order, PostOrderIter, PreOrderIter};
pub use tree::SearchTree;
