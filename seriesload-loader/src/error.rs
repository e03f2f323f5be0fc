//! Error types for the loader.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for catalog collaborator calls.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type for loading a single record.
pub type LoadResult<T> = Result<T, LoadError>;

/// Failures reported by a catalog backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Backend could not be reached or is not serving requests.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the request (validation, permissions, conflicts).
    #[error("catalog rejected request: {0}")]
    Rejected(String),

    /// Named record does not exist.
    #[error("record not found: {0}")]
    NotFound(String),
}

/// Why a single record could not be loaded.
///
/// Every variant names the incoming record so batch reports can be traced
/// back to the feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// A resource has no stable identifier and cannot be merged or ordered.
    #[error("record '{record}': resource {resource} has no stable identifier")]
    IdentifierMissing { record: String, resource: String },

    /// Two resources of one record share an identifier.
    #[error("record '{record}': resources share identifier '{identifier}'")]
    DuplicateIdentifier { record: String, identifier: String },

    /// An invariant field differs between the matched and incoming record.
    #[error(
        "record '{record}': invariant field '{field}' differs (existing '{existing}', incoming '{incoming}')"
    )]
    InvariantMismatch {
        record: String,
        field: String,
        existing: String,
        incoming: String,
    },

    /// More than one existing record matches the identity search.
    #[error("record '{record}' matches {} existing records: {}", .candidates.len(), .candidates.join(", "))]
    AmbiguousMatch {
        record: String,
        candidates: Vec<String>,
    },

    /// The search or persistence collaborator failed.
    #[error("record '{record}': {source}")]
    Transport {
        record: String,
        #[source]
        source: CatalogError,
    },
}

/// Coarse classification of a [`LoadError`], for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadErrorKind {
    IdentifierMissing,
    DuplicateIdentifier,
    InvariantMismatch,
    AmbiguousMatch,
    Transport,
}

impl LoadError {
    /// Name of the incoming record that failed.
    pub fn record(&self) -> &str {
        match self {
            Self::IdentifierMissing { record, .. }
            | Self::DuplicateIdentifier { record, .. }
            | Self::InvariantMismatch { record, .. }
            | Self::AmbiguousMatch { record, .. }
            | Self::Transport { record, .. } => record,
        }
    }

    pub fn kind(&self) -> LoadErrorKind {
        match self {
            Self::IdentifierMissing { .. } => LoadErrorKind::IdentifierMissing,
            Self::DuplicateIdentifier { .. } => LoadErrorKind::DuplicateIdentifier,
            Self::InvariantMismatch { .. } => LoadErrorKind::InvariantMismatch,
            Self::AmbiguousMatch { .. } => LoadErrorKind::AmbiguousMatch,
            Self::Transport { .. } => LoadErrorKind::Transport,
        }
    }

    pub(crate) fn transport(record: &str) -> impl FnOnce(CatalogError) -> Self + '_ {
        move |source| Self::Transport {
            record: record.to_string(),
            source,
        }
    }
}
