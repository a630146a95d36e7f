//! Deterministic `name -> BitVector` stamping.
//!
//! A stamp is the one source of randomness in the whole engine, and it
//! isn't random at all: the same name, at the same dimensionality, always
//! produces the same vector, in any process, on any machine. That's what
//! lets two independent sessions agree on what `"Dog"` means without ever
//! talking to each other.
//!
//! # Algorithm
//!
//! 1. Hash the name's UTF-8 bytes with DJB2 to get a 32-bit seed.
//! 2. Seed an xorshift32 generator with it (mixed once so an all-zero
//!    DJB2 output, which xorshift cannot recover from, never reaches it).
//! 3. Draw one `u32` per word of the vector.
//!
//! Deliberately not built on the `rand` crate: `rand`'s generators are not
//! guaranteed to produce the same stream across crate versions, and a
//! stamp that drifts between builds would silently desynchronize two
//! sessions. A from-scratch xorshift32 is ~10 lines and never changes.

use holobind_geometry::{BitVector, GeometryResult};

/// Computes the DJB2 hash of `name`'s UTF-8 bytes.
fn djb2(name: &str) -> u32 {
    let mut hash: u32 = 5381;
    for byte in name.as_bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(*byte as u32);
    }
    hash
}

/// A tiny xorshift32 generator, seeded once and advanced per word.
struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    fn new(seed: u32) -> Self {
        // xorshift32 is undefined at state == 0; DJB2("") and a handful of
        // other short names hash to 0, so nudge away from it.
        Self {
            state: if seed == 0 { 0x9e3779b9 } else { seed },
        }
    }

    fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

/// Computes the deterministic stamp of `name` at dimensionality `dimensions`.
///
/// Pure and side-effect free: calling this twice with the same arguments,
/// in the same process or a different one, yields bit-identical vectors.
///
/// # Errors
///
/// Propagates [`holobind_geometry::GeometryError::InvalidGeometry`] when
/// `dimensions` is not a positive multiple of 32.
pub fn stamp(name: &str, dimensions: usize) -> GeometryResult<BitVector> {
    let seed = djb2(name);
    let mut rng = Xorshift32::new(seed);
    BitVector::from_words(dimensions, || rng.next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_same_dimensions_is_deterministic() {
        let a = stamp("Dog", 2048).unwrap();
        let b = stamp("Dog", 2048).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_names_usually_differ() {
        let a = stamp("Dog", 2048).unwrap();
        let b = stamp("Cat", 2048).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn same_name_different_dimensions_differ_in_length() {
        let a = stamp("Dog", 64).unwrap();
        let b = stamp("Dog", 2048).unwrap();
        assert_eq!(a.dimensions(), 64);
        assert_eq!(b.dimensions(), 2048);
    }

    #[test]
    fn empty_name_does_not_panic() {
        let v = stamp("", 64);
        assert!(v.is_ok());
    }

    #[test]
    fn density_is_roughly_half() {
        let v = stamp("SomeReasonablyLongAtomName", 4096).unwrap();
        let density = v.popcount() as f64 / v.dimensions() as f64;
        assert!((density - 0.5).abs() < 0.05, "density was {}", density);
    }

    #[test]
    fn invalid_geometry_propagates() {
        assert!(stamp("Dog", 33).is_err());
    }
}
