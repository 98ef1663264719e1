//! Tree manipulation errors.

use thiserror::Error;

use crate::node::NodeKind;

/// Errors raised when a tree operation is applied to the wrong kind of node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A map operation was applied to a non-map node.
    #[error("Expected a map node, found {found}")]
    NotAMap { found: NodeKind },

    /// An array operation was applied to a non-array node.
    #[error("Expected an array node, found {found}")]
    NotAnArray { found: NodeKind },

    /// Map keys must be non-empty.
    #[error("Map keys must not be empty")]
    EmptyKey,
}
