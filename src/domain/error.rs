//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::Order;

/// Domain errors represent misuse of the tree API.
///
/// Lookups that miss are not errors: `find`, `height` and `depth` answer
/// `None` and `remove_value` answers `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid argument: no visitor supplied for {order} traversal")]
    MissingVisitor { order: Order },

    #[error("unknown traversal order: {0} (expected level, pre, in or post)")]
    UnknownOrder(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
