//! Error types for the knowledge base.

use holobind_algebra::AlgebraError;
use std::fmt;

/// Failure modes for knowledge-base mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum KbError {
    /// The rolling aggregate bundle could not be updated.
    Algebra(AlgebraError),
}

impl fmt::Display for KbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KbError::Algebra(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for KbError {}

impl From<AlgebraError> for KbError {
    fn from(e: AlgebraError) -> Self {
        KbError::Algebra(e)
    }
}

/// Alias for `std::result::Result<T, KbError>`.
pub type KbResult<T> = std::result::Result<T, KbError>;
