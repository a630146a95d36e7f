//! Fixed-width, bit-packed vectors over `{0, 1}^D`.
//!
//! A [`BitVector`] is the unit of storage for the whole engine: every
//! symbol, every statement, and the knowledge base's aggregate bundle are
//! all `BitVector`s of the same dimensionality `D`. Bits are packed into
//! `u32` words, `D` bits to a vector, `⌈D/32⌉` words per vector.
//!
//! # Value semantics
//!
//! `BitVector` is a plain value type (`Clone`, `PartialEq`, `Eq`, `Hash`).
//! Every operation that looks like mutation (`xor`, `and`, `or`, `not`)
//! returns a fresh vector rather than mutating in place; the only in-place
//! mutator is [`BitVector::set_bit`]/[`BitVector::clear_bit`], used while
//! building a vector word-by-word.

use crate::error::{GeometryError, GeometryResult};
use std::fmt;

/// A fixed-width vector of `D` bits, packed into 32-bit words.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitVector {
    bits: usize,
    words: Vec<u32>,
}

impl BitVector {
    /// Creates the all-zero vector of `bits` bits.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidGeometry`] unless `bits` is a
    /// positive multiple of 32.
    pub fn zero(bits: usize) -> GeometryResult<Self> {
        validate_geometry(bits)?;
        Ok(Self {
            bits,
            words: vec![0u32; bits / 32],
        })
    }

    /// Creates the all-ones vector of `bits` bits.
    pub fn ones(bits: usize) -> GeometryResult<Self> {
        validate_geometry(bits)?;
        Ok(Self {
            bits,
            words: vec![u32::MAX; bits / 32],
        })
    }

    /// Creates a vector of `bits` bits filled word-by-word from `rng`.
    ///
    /// `rng` is called once per word; callers typically pass a seeded
    /// generator (see [`crate::Stamp`](../holobind_algebra/struct.Stamp.html)
    /// in the algebra crate) to get deterministic output.
    pub fn from_words<F: FnMut() -> u32>(bits: usize, mut rng: F) -> GeometryResult<Self> {
        validate_geometry(bits)?;
        let word_count = bits / 32;
        let mut words = Vec::with_capacity(word_count);
        for _ in 0..word_count {
            words.push(rng());
        }
        Ok(Self { bits, words })
    }

    /// Builds a vector directly from a word slice. `words.len()` must equal
    /// `bits / 32`; this is an internal constructor used by the algebra
    /// crate's `bind`/`bundle`, which already know the geometry is sound.
    pub(crate) fn from_raw_words(bits: usize, words: Vec<u32>) -> Self {
        debug_assert_eq!(words.len(), bits / 32);
        Self { bits, words }
    }

    /// The dimensionality `D` of this vector, in bits.
    pub fn dimensions(&self) -> usize {
        self.bits
    }

    /// Read-only access to the packed words, for callers (e.g. `bundle`)
    /// that need to scan bit-by-bit without reallocating.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Reads the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.dimensions()`.
    pub fn get_bit(&self, index: usize) -> bool {
        assert!(index < self.bits, "bit index {} out of range", index);
        let word = self.words[index / 32];
        (word >> (index % 32)) & 1 == 1
    }

    /// Sets the bit at `index` to 1.
    pub fn set_bit(&mut self, index: usize) {
        assert!(index < self.bits, "bit index {} out of range", index);
        self.words[index / 32] |= 1 << (index % 32);
    }

    /// Sets the bit at `index` to 0.
    pub fn clear_bit(&mut self, index: usize) {
        assert!(index < self.bits, "bit index {} out of range", index);
        self.words[index / 32] &= !(1 << (index % 32));
    }

    /// Bitwise XOR. Self-inverse: `a.xor(&b).xor(&b) == a`.
    pub fn xor(&self, other: &BitVector) -> GeometryResult<BitVector> {
        self.check_same_geometry(other)?;
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| a ^ b)
            .collect();
        Ok(BitVector::from_raw_words(self.bits, words))
    }

    /// Bitwise AND.
    pub fn and(&self, other: &BitVector) -> GeometryResult<BitVector> {
        self.check_same_geometry(other)?;
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| a & b)
            .collect();
        Ok(BitVector::from_raw_words(self.bits, words))
    }

    /// Bitwise OR.
    pub fn or(&self, other: &BitVector) -> GeometryResult<BitVector> {
        self.check_same_geometry(other)?;
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| a | b)
            .collect();
        Ok(BitVector::from_raw_words(self.bits, words))
    }

    /// Bitwise NOT (complement).
    pub fn not(&self) -> BitVector {
        let words = self.words.iter().map(|w| !w).collect();
        BitVector::from_raw_words(self.bits, words)
    }

    /// Number of set bits, via the word-wise Kernighan trick
    /// (`count_ones` lowers to a hardware popcount intrinsic on every
    /// target that has one, so this stays branch-free in practice).
    pub fn popcount(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    fn check_same_geometry(&self, other: &BitVector) -> GeometryResult<()> {
        if self.bits != other.bits {
            return Err(GeometryError::GeometryMismatch {
                expected_bits: self.bits,
                found_bits: other.bits,
            });
        }
        Ok(())
    }
}

/// Checks that `bits` is a positive multiple of 32, the one shape every
/// `BitVector` must have.
pub fn validate_geometry(bits: usize) -> GeometryResult<()> {
    if bits == 0 || bits % 32 != 0 {
        return Err(GeometryError::InvalidGeometry {
            requested_bits: bits,
        });
    }
    Ok(())
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let density = self.popcount() as f64 / self.bits as f64;
        write!(
            f,
            "BitVector {{ bits: {}, density: {:.3}, words: [{:08x}, {:08x}, ..] }}",
            self.bits,
            density,
            self.words.first().copied().unwrap_or(0),
            self.words.get(1).copied().unwrap_or(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rejects_non_multiple_of_32() {
        assert!(matches!(
            BitVector::zero(33),
            Err(GeometryError::InvalidGeometry { requested_bits: 33 })
        ));
    }

    #[test]
    fn zero_rejects_zero_bits() {
        assert!(BitVector::zero(0).is_err());
    }

    #[test]
    fn zero_has_no_set_bits() {
        let v = BitVector::zero(64).unwrap();
        assert_eq!(v.popcount(), 0);
    }

    #[test]
    fn ones_has_all_bits_set() {
        let v = BitVector::ones(64).unwrap();
        assert_eq!(v.popcount(), 64);
    }

    #[test]
    fn set_and_get_bit_roundtrip() {
        let mut v = BitVector::zero(64).unwrap();
        v.set_bit(5);
        v.set_bit(40);
        assert!(v.get_bit(5));
        assert!(v.get_bit(40));
        assert!(!v.get_bit(6));
        assert_eq!(v.popcount(), 2);
    }

    #[test]
    fn clear_bit_unsets() {
        let mut v = BitVector::ones(32).unwrap();
        v.clear_bit(0);
        assert!(!v.get_bit(0));
        assert_eq!(v.popcount(), 31);
    }

    #[test]
    fn xor_is_self_inverse() {
        let a = BitVector::from_words(64, {
            let mut n = 0u32;
            move || {
                n = n.wrapping_add(0x9e3779b9);
                n
            }
        })
        .unwrap();
        let b = BitVector::ones(64).unwrap();
        let once = a.xor(&b).unwrap();
        let twice = once.xor(&b).unwrap();
        assert_eq!(a, twice);
    }

    #[test]
    fn xor_rejects_geometry_mismatch() {
        let a = BitVector::zero(32).unwrap();
        let b = BitVector::zero(64).unwrap();
        assert!(matches!(
            a.xor(&b),
            Err(GeometryError::GeometryMismatch { .. })
        ));
    }

    #[test]
    fn not_flips_every_bit() {
        let v = BitVector::zero(32).unwrap();
        let flipped = v.not();
        assert_eq!(flipped.popcount(), 32);
    }

    #[test]
    fn and_of_disjoint_masks_is_zero() {
        let mut a = BitVector::zero(32).unwrap();
        a.set_bit(0);
        let mut b = BitVector::zero(32).unwrap();
        b.set_bit(1);
        let anded = a.and(&b).unwrap();
        assert_eq!(anded.popcount(), 0);
    }

    #[test]
    fn or_of_disjoint_masks_unions() {
        let mut a = BitVector::zero(32).unwrap();
        a.set_bit(0);
        let mut b = BitVector::zero(32).unwrap();
        b.set_bit(1);
        let ored = a.or(&b).unwrap();
        assert_eq!(ored.popcount(), 2);
    }
}
