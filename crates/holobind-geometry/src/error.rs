//! Error types for bit-vector geometry.
//!
//! Every [`BitVector`](crate::BitVector) is created and combined under a
//! fixed dimensionality `D`. The two ways that invariant can be violated —
//! an invalid `D` at construction, or two vectors of different `D` meeting
//! in an operation — are captured here.

use std::fmt;

/// Failure modes for bit-vector construction and combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// `D` was not a positive multiple of 32.
    InvalidGeometry {
        /// The rejected dimensionality.
        requested_bits: usize,
    },
    /// Two vectors with different `D` were passed to the same operation.
    GeometryMismatch {
        /// `D` of the left-hand operand.
        expected_bits: usize,
        /// `D` of the right-hand operand.
        found_bits: usize,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidGeometry { requested_bits } => write!(
                f,
                "invalid geometry: {} is not a positive multiple of 32",
                requested_bits
            ),
            GeometryError::GeometryMismatch {
                expected_bits,
                found_bits,
            } => write!(
                f,
                "geometry mismatch: expected {} bits, found {} bits",
                expected_bits, found_bits
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Alias for `std::result::Result<T, GeometryError>`.
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;
