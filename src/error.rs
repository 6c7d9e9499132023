//! Error types for metadata and color-mapping operations.

use crate::metadata::{NodeId, NodeKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad failure category, stable across variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Requested column, row, or value key is absent.
    NotFound,
    /// A compressed index is out of range or non-integral.
    InvalidCompression,
    /// Unrecognized palette id, scope, or malformed construction input.
    InvalidArgument,
}

/// Errors raised by [`MetadataStore`](crate::MetadataStore) and
/// [`ColorMapper`](crate::ColorMapper).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    #[error("Column not found: '{column}'")]
    ColumnNotFound { column: String },

    #[error("No {kind} metadata row for node {node}")]
    RowNotFound { node: NodeId, kind: NodeKind },

    #[error("Column index {column} out of range for {kind} node {node} ({len} columns)")]
    CellNotFound {
        node: NodeId,
        kind: NodeKind,
        column: usize,
        len: usize,
    },

    #[error("Value '{value}' was not part of the color mapping")]
    ValueNotFound { value: String },

    #[error("Recurring value index {index} out of range (table holds {len} values)")]
    IndexOutOfRange { index: u64, len: usize },

    #[error("Compressed value is not a string or non-negative integer: {raw}")]
    MalformedCompressedValue { raw: String },

    #[error("Unknown palette: '{0}'")]
    UnknownPalette(String),

    #[error("Unknown scope: '{0}' (expected 'tip' or 'all')")]
    UnknownScope(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EncodingError>;

impl EncodingError {
    /// Taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ColumnNotFound { .. }
            | Self::RowNotFound { .. }
            | Self::CellNotFound { .. }
            | Self::ValueNotFound { .. } => ErrorKind::NotFound,
            Self::IndexOutOfRange { .. } | Self::MalformedCompressedValue { .. } => {
                ErrorKind::InvalidCompression
            }
            Self::UnknownPalette(_) | Self::UnknownScope(_) | Self::InvalidArgument(_) => {
                ErrorKind::InvalidArgument
            }
        }
    }

    /// Get an error code for this error type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound { .. } => "COLUMN_NOT_FOUND",
            Self::RowNotFound { .. } => "ROW_NOT_FOUND",
            Self::CellNotFound { .. } => "CELL_NOT_FOUND",
            Self::ValueNotFound { .. } => "VALUE_NOT_FOUND",
            Self::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            Self::MalformedCompressedValue { .. } => "MALFORMED_COMPRESSED_VALUE",
            Self::UnknownPalette(_) => "UNKNOWN_PALETTE",
            Self::UnknownScope(_) => "UNKNOWN_SCOPE",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
