//! Parser error types for meta-parser.

use meta_core::{NodeKind, TreeError};

/// Errors that can occur while extracting or normalizing test metadata.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Array '{id}' referenced by ARRAY_SIZE in field '{field}' was not found")]
    ArraySizeUnresolved { field: String, id: String },

    #[error("Malformed ARRAY_SIZE expression in field '{field}'")]
    MalformedArraySize { field: String },

    #[error("Cannot convert {field} value {value} to {expected}")]
    Coercion {
        field: String,
        value: String,
        expected: NodeKind,
    },

    #[error("Cannot convert {field} from {found} to {expected}")]
    KindMismatch {
        field: String,
        found: NodeKind,
        expected: NodeKind,
    },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl ParserError {
    /// Errors that only mean "this file has no usable metadata".
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ArraySizeUnresolved { .. } | Self::MalformedArraySize { .. }
        )
    }
}
