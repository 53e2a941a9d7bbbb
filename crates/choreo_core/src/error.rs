//! Core error types

use thiserror::Error;

/// Errors surfaced by the animation core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChoreoError {
    /// An interpolator was selected by a name the core does not know
    #[error("unknown interpolator: {0}")]
    UnknownInterpolator(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, ChoreoError>;
