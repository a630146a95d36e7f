//! Error types for the hyperdimensional algebra.

use holobind_geometry::GeometryError;
use std::fmt;

/// Failure modes for `bind`/`bundle`/`similarity`/`topK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    /// `bundle` was called with zero input vectors.
    EmptyBundle,
    /// A position index fell outside `1..=MAX_POSITIONS`.
    PositionOutOfRange {
        /// The rejected index.
        index: i64,
    },
    /// Two vectors of different geometry were combined.
    Geometry(GeometryError),
}

impl fmt::Display for AlgebraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgebraError::EmptyBundle => {
                write!(f, "bundle requires at least one input vector")
            }
            AlgebraError::PositionOutOfRange { index } => {
                write!(
                    f,
                    "position index {} out of range 1..={}",
                    index,
                    crate::position::MAX_POSITIONS
                )
            }
            AlgebraError::Geometry(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AlgebraError {}

impl From<GeometryError> for AlgebraError {
    fn from(e: GeometryError) -> Self {
        AlgebraError::Geometry(e)
    }
}

/// Alias for `std::result::Result<T, AlgebraError>`.
pub type AlgebraResult<T> = std::result::Result<T, AlgebraError>;
