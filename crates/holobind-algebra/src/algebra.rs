//! The three operations that give binary HDC its holographic properties:
//! `bind`, `bundle`, and `similarity`.

use crate::error::{AlgebraError, AlgebraResult};
use holobind_geometry::BitVector;

/// Binds two vectors together by bitwise XOR.
///
/// Self-inverse (`bind(bind(a, b), b) == a`), associative, and
/// commutative. The result is dissimilar to both inputs, which is the
/// whole point: it lets `bind` compose a role and a filler into something
/// that can be packed into a bundle without the filler's identity leaking
/// through.
pub fn bind(a: &BitVector, b: &BitVector) -> AlgebraResult<BitVector> {
    Ok(a.xor(b)?)
}

/// Inverts a `bind`. Since XOR is self-inverse, this is literally the same
/// operation as [`bind`] — the name exists so call sites can say what they
/// mean ("I am unbinding a role from a composite") without it looking like
/// a typo for `bind`.
pub fn unbind(bound: &BitVector, key: &BitVector) -> AlgebraResult<BitVector> {
    bind(bound, key)
}

/// Superposes `vectors` by thresholded bitwise majority vote.
///
/// For each bit position, the result bit is `1` if a strict majority of
/// the inputs have it set, `0` if a strict majority have it clear, and —
/// on an exact tie (only possible with an even number of inputs) — taken
/// from `tie_breaker` if one is given, or left `0` otherwise.
///
/// # Errors
///
/// Returns [`AlgebraError::EmptyBundle`] if `vectors` is empty.
pub fn bundle(vectors: &[BitVector], tie_breaker: Option<&BitVector>) -> AlgebraResult<BitVector> {
    let first = vectors.first().ok_or(AlgebraError::EmptyBundle)?;
    if vectors.len() == 1 {
        return Ok(first.clone());
    }

    let dimensions = first.dimensions();
    for v in vectors {
        if v.dimensions() != dimensions {
            return Err(holobind_geometry::GeometryError::GeometryMismatch {
                expected_bits: dimensions,
                found_bits: v.dimensions(),
            }
            .into());
        }
    }
    let majority = (vectors.len() / 2) as u32;
    let is_even = vectors.len() % 2 == 0;

    let mut result = BitVector::zero(dimensions)?;
    for bit in 0..dimensions {
        let mut ones: u32 = 0;
        for v in vectors {
            if v.get_bit(bit) {
                ones += 1;
            }
        }
        let set = if ones > majority {
            true
        } else if is_even && ones == majority {
            tie_breaker.map(|t| t.get_bit(bit)).unwrap_or(false)
        } else {
            false
        };
        if set {
            result.set_bit(bit);
        }
    }
    Ok(result)
}

/// Similarity of `a` to `b`, in `[0, 1]`: `1 - normalized Hamming distance`.
///
/// `similarity(a, a) == 1`. Two independently-stamped vectors concentrate
/// tightly around `0.5` as `D` grows, which is what makes a similarity
/// above threshold meaningful evidence of shared structure rather than
/// chance.
pub fn similarity(a: &BitVector, b: &BitVector) -> AlgebraResult<f64> {
    let distance = a.xor(b)?;
    let hamming = distance.popcount() as f64;
    Ok(1.0 - hamming / distance.dimensions() as f64)
}

/// One entry of a [`top_k`] result: an atom's name and its similarity to
/// the query vector.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredAtom {
    /// The atom's name.
    pub name: String,
    /// Similarity of the atom's stamp to the query vector.
    pub similarity: f64,
}

/// Linearly scans `vocabulary` and returns the `k` entries most similar to
/// `query`, sorted descending by similarity. Ties keep the order
/// `vocabulary` presented them in (a stable sort over first-seen order),
/// so results are reproducible across runs for the same vocabulary.
pub fn top_k<'a, I>(query: &BitVector, vocabulary: I, k: usize) -> AlgebraResult<Vec<ScoredAtom>>
where
    I: IntoIterator<Item = (&'a str, &'a BitVector)>,
{
    let mut scored = Vec::new();
    for (name, vector) in vocabulary {
        scored.push(ScoredAtom {
            name: name.to_string(),
            similarity: similarity(query, vector)?,
        });
    }
    scored.sort_by(|a, b| b.similarity.partial_cmp(&a.similarity).unwrap());
    scored.truncate(k);
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stamp::stamp;
    use rand::Rng;

    fn random_vector(dimensions: usize) -> BitVector {
        let mut rng = rand::thread_rng();
        BitVector::from_words(dimensions, || rng.gen()).unwrap()
    }

    #[test]
    fn bind_is_commutative() {
        let a = stamp("a", 256).unwrap();
        let b = stamp("b", 256).unwrap();
        assert_eq!(bind(&a, &b).unwrap(), bind(&b, &a).unwrap());
    }

    #[test]
    fn bind_is_associative() {
        let a = stamp("a", 256).unwrap();
        let b = stamp("b", 256).unwrap();
        let c = stamp("c", 256).unwrap();
        let left = bind(&bind(&a, &b).unwrap(), &c).unwrap();
        let right = bind(&a, &bind(&b, &c).unwrap()).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn bind_is_self_inverse() {
        let a = stamp("a", 256).unwrap();
        let b = stamp("b", 256).unwrap();
        let bound = bind(&a, &b).unwrap();
        assert_eq!(bind(&bound, &b).unwrap(), a);
    }

    #[test]
    fn unbind_round_trips_bind() {
        let a = stamp("a", 256).unwrap();
        let b = stamp("b", 256).unwrap();
        let bound = bind(&a, &b).unwrap();
        assert_eq!(unbind(&bound, &b).unwrap(), a);
    }

    #[test]
    fn similarity_of_identical_vectors_is_one() {
        let a = stamp("a", 256).unwrap();
        assert_eq!(similarity(&a, &a).unwrap(), 1.0);
    }

    #[test]
    fn similarity_of_complements_is_zero() {
        let a = stamp("a", 256).unwrap();
        let not_a = a.not();
        assert_eq!(similarity(&a, &not_a).unwrap(), 0.0);
    }

    #[test]
    fn random_independent_stamps_concentrate_near_half() {
        for _ in 0..20 {
            let a = random_vector(2048);
            let b = random_vector(2048);
            let sim = similarity(&a, &b).unwrap();
            assert!((sim - 0.5).abs() < 0.05, "similarity was {}", sim);
        }
    }

    #[test]
    fn bundle_rejects_empty_input() {
        assert_eq!(bundle(&[], None), Err(AlgebraError::EmptyBundle));
    }

    #[test]
    fn bundle_of_one_is_a_clone() {
        let a = stamp("a", 256).unwrap();
        assert_eq!(bundle(&[a.clone()], None).unwrap(), a);
    }

    #[test]
    fn bundle_of_identical_copies_is_very_similar() {
        let a = stamp("a", 256).unwrap();
        let bundled = bundle(&[a.clone(), a.clone(), a.clone()], None).unwrap();
        assert!(similarity(&a, &bundled).unwrap() > 0.99);
    }

    #[test]
    fn bundle_majority_wins() {
        let a = stamp("a", 32).unwrap();
        let b = stamp("b", 32).unwrap();
        let bundled = bundle(&[a.clone(), a.clone(), b], None).unwrap();
        assert_eq!(bundled, a);
    }

    #[test]
    fn top_k_returns_best_match_first() {
        let a = stamp("Dog", 1024).unwrap();
        let b = stamp("Cat", 1024).unwrap();
        let c = stamp("Mammal", 1024).unwrap();
        let vocab = vec![("Dog", &a), ("Cat", &b), ("Mammal", &c)];
        let results = top_k(&a, vocab, 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Dog");
        assert_eq!(results[0].similarity, 1.0);
    }

    #[test]
    fn bundle_rejects_mismatched_geometry() {
        let a = stamp("a", 32).unwrap();
        let b = stamp("b", 64).unwrap();
        assert!(bundle(&[a, b], None).is_err());
    }

    #[test]
    fn top_k_truncates_to_k() {
        let a = stamp("Dog", 256).unwrap();
        let b = stamp("Cat", 256).unwrap();
        let c = stamp("Mammal", 256).unwrap();
        let vocab = vec![("Dog", &a), ("Cat", &b), ("Mammal", &c)];
        let results = top_k(&a, vocab, 1).unwrap();
        assert_eq!(results.len(), 1);
    }
}
