//! Engine error types.

use thiserror::Error;

/// Errors surfaced by the engine layer.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No session registered under the given id.
    #[error("unknown session: {0}")]
    SessionNotFound(String),

    /// A record failed boundary validation.
    #[error(transparent)]
    Core(#[from] govpal_core::errors::CoreError),
}

/// Engine result alias.
pub type Result<T> = std::result::Result<T, EngineError>;
