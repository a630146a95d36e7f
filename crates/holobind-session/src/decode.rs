//! `decode(vector)`: best-operator-then-per-position reconstruction of an
//! arbitrary vector back into a `(operator, args)` guess.

use holobind_algebra::{bind, top_k, PositionCodes};
use holobind_geometry::BitVector;
use holobind_vocab::Vocabulary;
use std::collections::HashSet;

/// How many argument positions `decode` attempts to fill in.
const MAX_DECODED_POSITIONS: usize = 5;

/// How many candidates `top_k` considers per position before taking the best.
const TOP_K: usize = 3;

/// One decoded argument slot.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedArgument {
    /// The best-matching vocabulary name for this position, or `None` if
    /// nothing cleared similarity zero (only possible against an empty
    /// vocabulary).
    pub name: Option<String>,
    /// That name's similarity to the decoded slot.
    pub similarity: f64,
}

/// The result of decoding an arbitrary vector against the vocabulary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodeOutcome {
    /// The best-matching operator name, restricted to names this session
    /// has actually seen used as an operator.
    pub operator: Option<String>,
    /// That operator's similarity to `vector`.
    pub operator_similarity: f64,
    /// Up to [`MAX_DECODED_POSITIONS`] decoded argument slots, in order.
    pub arguments: Vec<DecodedArgument>,
}

/// Decodes `vector` by finding the best-matching operator, then XORing it
/// (and each position code in turn) back out to recover each argument
/// slot by top-K lookup against the whole vocabulary.
///
/// `operators` restricts the first lookup to names this session has
/// actually registered as an operator — without it, `decode` would happily
/// "discover" that an argument identifier is the best operator match,
/// which defeats the purpose of a structured guess.
pub fn decode(
    vector: &BitVector,
    vocab: &mut Vocabulary,
    positions: &mut PositionCodes,
    operators: &HashSet<String>,
) -> DecodeOutcome {
    let operator_entries: Vec<(&str, &BitVector)> = vocab
        .entries()
        .filter(|(name, _)| operators.contains(*name))
        .collect();
    let best_operator = top_k(vector, operator_entries, 1)
        .ok()
        .and_then(|mut v| if v.is_empty() { None } else { Some(v.remove(0)) });

    let (operator_name, operator_similarity) = match &best_operator {
        Some(scored) => (Some(scored.name.clone()), scored.similarity),
        None => (None, 0.0),
    };

    let mut arguments = Vec::new();
    if let Some(op) = &operator_name {
        let op_stamp = vocab.get_or_create(op);
        for i in 1..=MAX_DECODED_POSITIONS {
            let Ok(position) = positions.position(i) else {
                break;
            };
            let Ok(with_op_removed) = bind(vector, &op_stamp) else {
                break;
            };
            let Ok(slot) = bind(&with_op_removed, &position) else {
                break;
            };
            let candidates = top_k(&slot, vocab.entries(), TOP_K).unwrap_or_default();
            arguments.push(match candidates.into_iter().next() {
                Some(best) => DecodedArgument {
                    name: Some(best.name),
                    similarity: best.similarity,
                },
                None => DecodedArgument {
                    name: None,
                    similarity: 0.0,
                },
            });
        }
    }

    DecodeOutcome {
        operator: operator_name,
        operator_similarity,
        arguments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holobind_algebra::stamp;

    #[test]
    fn decodes_a_fresh_statement_back_to_its_operator_and_args() {
        let mut vocab = Vocabulary::new(1024).unwrap();
        let mut positions = PositionCodes::new(1024);
        let mut operators = HashSet::new();
        operators.insert("isA".to_string());

        let op = vocab.get_or_create("isA");
        let subject = vocab.get_or_create("Rex");
        let object = vocab.get_or_create("Dog");
        let p1 = positions.position(1).unwrap();
        let p2 = positions.position(2).unwrap();
        let vector = bind(&bind(&op, &bind(&p1, &subject).unwrap()).unwrap(), &bind(&p2, &object).unwrap())
            .unwrap();

        let outcome = decode(&vector, &mut vocab, &mut positions, &operators);
        assert_eq!(outcome.operator.as_deref(), Some("isA"));
        assert!(outcome.operator_similarity > 0.99);
        assert_eq!(outcome.arguments[0].name.as_deref(), Some("Rex"));
        assert_eq!(outcome.arguments[1].name.as_deref(), Some("Dog"));
    }

    #[test]
    fn empty_operator_set_yields_no_operator() {
        let mut vocab = Vocabulary::new(64).unwrap();
        let mut positions = PositionCodes::new(64);
        let vector = stamp("anything", 64).unwrap();
        let outcome = decode(&vector, &mut vocab, &mut positions, &HashSet::new());
        assert!(outcome.operator.is_none());
        assert!(outcome.arguments.is_empty());
    }
}
