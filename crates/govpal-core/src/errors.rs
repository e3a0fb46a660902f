//! Error hierarchy for the core types.
//!
//! The engine itself has no fatal failure path — collaborator failures
//! degrade to fallbacks and rules that don't fire. These errors exist for
//! the boundary: malformed records are rejected before they reach a ledger
//! or a document history.

use thiserror::Error;

/// Errors raised while validating boundary input.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An action record failed boundary validation.
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// A document analysis record failed boundary validation.
    #[error("invalid document analysis: {0}")]
    InvalidDocument(String),

    /// An adaptation event violated the added/removed invariant.
    #[error("invalid adaptation event: {0}")]
    InvalidEvent(String),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, CoreError>;
