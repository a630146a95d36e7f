//! Argument position codes.
//!
//! Statement encoding XORs each argument's stamp with a *position code*
//! before folding it into the statement vector, so that `love(John, Mary)`
//! and `love(Mary, John)` don't collide even though XOR is commutative.
//! `Pᵢ = stamp("__POS_i__", D)` — there's nothing special about position
//! codes beyond being stamps of a reserved naming convention, but they're
//! looked up often enough (once per argument, on every encode) that it's
//! worth caching them per session instead of re-hashing the name string
//! each time.

use crate::error::{AlgebraError, AlgebraResult};
use crate::stamp::stamp;
use holobind_geometry::BitVector;

/// The highest argument position a statement may address.
pub const MAX_POSITIONS: usize = 20;

/// A memoised `i -> Pᵢ` lookup table for one fixed dimensionality.
///
/// Not shared across sessions — per §5 of the design, a lazy per-session
/// cache is the cheapest correct implementation, since computing a stamp
/// is already only `O(D/32)` integer operations.
pub struct PositionCodes {
    dimensions: usize,
    cache: Vec<Option<BitVector>>,
}

impl PositionCodes {
    /// Creates an empty cache for vectors of `dimensions` bits.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            cache: (0..MAX_POSITIONS).map(|_| None).collect(),
        }
    }

    /// Returns `Pᵢ`, computing and caching it on first access.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::PositionOutOfRange`] for `i < 1` or
    /// `i > MAX_POSITIONS`.
    pub fn position(&mut self, i: usize) -> AlgebraResult<BitVector> {
        if i < 1 || i > MAX_POSITIONS {
            return Err(AlgebraError::PositionOutOfRange { index: i as i64 });
        }
        let slot = &mut self.cache[i - 1];
        if let Some(cached) = slot {
            return Ok(cached.clone());
        }
        let computed = stamp(&format!("__POS_{}__", i), self.dimensions)?;
        *slot = Some(computed.clone());
        Ok(computed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_index_returns_same_vector() {
        let mut codes = PositionCodes::new(64);
        let a = codes.position(1).unwrap();
        let b = codes.position(1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_indices_differ() {
        let mut codes = PositionCodes::new(64);
        let a = codes.position(1).unwrap();
        let b = codes.position(2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_zero_index() {
        let mut codes = PositionCodes::new(64);
        assert!(matches!(
            codes.position(0),
            Err(AlgebraError::PositionOutOfRange { index: 0 })
        ));
    }

    #[test]
    fn rejects_index_past_max() {
        let mut codes = PositionCodes::new(64);
        assert!(codes.position(MAX_POSITIONS + 1).is_err());
    }

    #[test]
    fn matches_direct_stamp_of_reserved_name() {
        let mut codes = PositionCodes::new(64);
        let cached = codes.position(3).unwrap();
        let direct = stamp("__POS_3__", 64).unwrap();
        assert_eq!(cached, direct);
    }
}
