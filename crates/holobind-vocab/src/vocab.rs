//! The vocabulary: an interning table from atom name to deterministic stamp.

use crate::error::VocabResult;
use holobind_algebra::stamp;
use holobind_geometry::BitVector;
use std::collections::HashMap;

/// Interns atom names to their stamps, lazily.
///
/// Every name a session ever refers to — an operator, an identifier, a
/// synthetic hole or position name — lives in exactly one vocabulary.
/// Lookup is `O(1)`; creation is `O(D/32)` and happens at most once per
/// name, the first time it is seen.
pub struct Vocabulary {
    dimensions: usize,
    stamps: HashMap<String, BitVector>,
    insertion_order: Vec<String>,
}

impl Vocabulary {
    /// Creates an empty vocabulary for vectors of `dimensions` bits.
    ///
    /// # Errors
    ///
    /// Returns an error if `dimensions` is not a positive multiple of 32
    /// (checked eagerly here so every later `get_or_create` is infallible).
    pub fn new(dimensions: usize) -> VocabResult<Self> {
        holobind_geometry::validate_geometry(dimensions)?;
        Ok(Self {
            dimensions,
            stamps: HashMap::new(),
            insertion_order: Vec::new(),
        })
    }

    /// The dimensionality every stamp in this vocabulary shares.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Returns `name`'s stamp, creating and caching it on first reference.
    pub fn get_or_create(&mut self, name: &str) -> BitVector {
        if let Some(existing) = self.stamps.get(name) {
            return existing.clone();
        }
        // dimensions was validated in `new`, so this cannot fail.
        let vector = stamp(name, self.dimensions).expect("vocabulary dimensions already validated");
        self.stamps.insert(name.to_string(), vector.clone());
        self.insertion_order.push(name.to_string());
        vector
    }

    /// Returns `name`'s stamp without creating it, or `None` if absent.
    pub fn get(&self, name: &str) -> Option<BitVector> {
        self.stamps.get(name).cloned()
    }

    /// Whether `name` has already been interned.
    pub fn contains(&self, name: &str) -> bool {
        self.stamps.contains_key(name)
    }

    /// Iterates `(name, vector)` pairs in the order names were first seen.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &BitVector)> {
        self.insertion_order
            .iter()
            .map(move |name| (name.as_str(), self.stamps.get(name.as_str()).unwrap()))
    }

    /// The number of interned atoms.
    pub fn len(&self) -> usize {
        self.insertion_order.len()
    }

    /// Whether no atom has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.insertion_order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_create_is_idempotent() {
        let mut vocab = Vocabulary::new(64).unwrap();
        let a = vocab.get_or_create("Dog");
        let b = vocab.get_or_create("Dog");
        assert_eq!(a, b);
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn get_does_not_create() {
        let vocab = Vocabulary::new(64).unwrap();
        assert!(vocab.get("Dog").is_none());
        assert_eq!(vocab.len(), 0);
    }

    #[test]
    fn matches_direct_stamp() {
        let mut vocab = Vocabulary::new(64).unwrap();
        let interned = vocab.get_or_create("Dog");
        let direct = stamp("Dog", 64).unwrap();
        assert_eq!(interned, direct);
    }

    #[test]
    fn entries_preserve_insertion_order() {
        let mut vocab = Vocabulary::new(64).unwrap();
        vocab.get_or_create("Zebra");
        vocab.get_or_create("Apple");
        vocab.get_or_create("Mango");
        let names: Vec<&str> = vocab.entries().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Zebra", "Apple", "Mango"]);
    }

    #[test]
    fn rejects_invalid_dimensions() {
        assert!(Vocabulary::new(33).is_err());
    }

    #[test]
    fn reserved_and_synthetic_names_intern_like_any_other() {
        let mut vocab = Vocabulary::new(64).unwrap();
        let implies = vocab.get_or_create("Implies");
        let hole = vocab.get_or_create(&crate::reserved::hole_name("x"));
        assert_ne!(implies, hole);
        assert_eq!(vocab.len(), 2);
    }
}
