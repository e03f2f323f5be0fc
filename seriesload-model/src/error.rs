//! Error types for loader profiles.

use thiserror::Error;

/// Result type for profile operations.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Errors raised while reading or validating a [`LoaderProfile`](crate::LoaderProfile).
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Profile file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile file is not valid TOML for a profile.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Profile parsed but cannot drive a loader.
    #[error("invalid profile: {0}")]
    Invalid(String),
}
