//! Error types for merge operations.

use thiserror::Error;

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Errors that stop a resource list from being merged or ordered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// A resource has no value for the identifier field.
    #[error("resource {resource} has no '{field}' identifier")]
    IdentifierMissing { field: String, resource: String },

    /// A resource list holds this identifier twice.
    #[error("identifier '{identifier}' appears on more than one resource ('{field}')")]
    DuplicateIdentifier { field: String, identifier: String },
}
