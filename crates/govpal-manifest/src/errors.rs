//! Manifest transport errors.
//!
//! These never escape [`crate::store::ManifestStore::load`] — they exist so
//! fetcher implementations can report *why* the fallback was used.

use thiserror::Error;

/// Errors raised while fetching or decoding a remote manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Transport-level failure.
    #[error("manifest request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status from the manifest collaborator.
    #[error("manifest request returned status {0}")]
    Status(u16),

    /// Response body was not a valid manifest.
    #[error("manifest decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, ManifestError>;
