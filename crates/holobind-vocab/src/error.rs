//! Error types for the vocabulary.

use holobind_geometry::GeometryError;
use std::fmt;

/// Failure modes for vocabulary construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabError {
    /// The vocabulary's dimensionality is invalid.
    Geometry(GeometryError),
}

impl fmt::Display for VocabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocabError::Geometry(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for VocabError {}

impl From<GeometryError> for VocabError {
    fn from(e: GeometryError) -> Self {
        VocabError::Geometry(e)
    }
}

/// Alias for `std::result::Result<T, VocabError>`.
pub type VocabResult<T> = std::result::Result<T, VocabError>;
