//! The knowledge base: an ordered fact list, a rolling aggregate bundle,
//! and the rules registered alongside it.

use crate::contradiction::{check_contradictions, Contradiction};
use crate::error::KbResult;
use crate::fact::Fact;
use crate::rule::Rule;
use holobind_algebra::{bundle, similarity};
use holobind_encode::Metadata;
use holobind_geometry::BitVector;

/// The append-only store every query and proof reads from.
///
/// The fact list is the source of truth; the aggregate bundle is strictly
/// an optimization for coarse existence hints (never consulted by the
/// prover). Nothing here is ever retracted — not even a contradicted fact.
pub struct KnowledgeBase {
    dimensions: usize,
    facts: Vec<Fact>,
    aggregate: Option<BitVector>,
    rules: Vec<Rule>,
}

impl KnowledgeBase {
    /// An empty knowledge base for vectors of `dimensions` bits.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            facts: Vec::new(),
            aggregate: None,
            rules: Vec::new(),
        }
    }

    /// The dimensionality every fact vector shares.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Runs the contradiction monitor and appends `vector`/`metadata` as a
    /// new fact, updating the rolling bundle.
    ///
    /// `negated_signature` should be `Some` only when `metadata.operator`
    /// is `Not` and the caller has resolved what the statement's single
    /// `$ref` argument refers to (see [`check_contradictions`]).
    ///
    /// Never fails to insert: the returned warnings are informational, not
    /// a veto. The only error this can return is a geometry mismatch from
    /// the rolling bundle update, which would indicate a caller bug (a
    /// vector built at the wrong dimensionality), not a contradiction.
    pub fn insert_fact(
        &mut self,
        vector: BitVector,
        metadata: Metadata,
        name: Option<String>,
        negated_signature: Option<&str>,
    ) -> KbResult<Vec<Contradiction>> {
        let warnings = check_contradictions(&self.facts, &metadata, negated_signature);
        self.aggregate = Some(match self.aggregate.take() {
            Some(existing) => bundle(&[existing, vector.clone()], None)?,
            None => vector.clone(),
        });
        self.facts.push(Fact::new(vector, metadata, name));
        Ok(warnings)
    }

    /// Registers an already-built rule (see [`holobind_encode::RuleCandidate`]).
    pub fn register_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// All persisted facts, in learn order.
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// All registered rules, in registration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The fact persisted under `name`, if any.
    pub fn fact_by_name(&self, name: &str) -> Option<&Fact> {
        self.facts.iter().find(|f| f.name.as_deref() == Some(name))
    }

    /// The number of persisted facts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether no fact has been persisted yet.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Similarity of `query` to the rolling aggregate bundle, or `None`
    /// when the knowledge base is empty. A coarse existence hint only —
    /// never used by the prover, which always consults the fact list.
    pub fn aggregate_similarity(&self, query: &BitVector) -> KbResult<Option<f64>> {
        match &self.aggregate {
            Some(aggregate) => Ok(Some(similarity(aggregate, query)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(seed: u32) -> BitVector {
        let mut n = seed;
        BitVector::from_words(64, || {
            n = n.wrapping_mul(1103515245).wrapping_add(12345);
            n
        })
        .unwrap()
    }

    #[test]
    fn insert_fact_grows_the_list() {
        let mut kb = KnowledgeBase::new(64);
        kb.insert_fact(vector(1), Metadata::new("isA", vec!["Rex".into(), "Dog".into()]), None, None)
            .unwrap();
        assert_eq!(kb.len(), 1);
        assert!(!kb.is_empty());
    }

    #[test]
    fn contradiction_warning_does_not_block_insertion() {
        let mut kb = KnowledgeBase::new(64);
        kb.insert_fact(
            vector(1),
            Metadata::new("hasState", vec!["Box".into(), "Closed".into()]),
            None,
            None,
        )
        .unwrap();
        let warnings = kb
            .insert_fact(
                vector(2),
                Metadata::new("hasState", vec!["Box".into(), "Open".into()]),
                None,
                None,
            )
            .unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(kb.len(), 2);
    }

    #[test]
    fn fact_by_name_finds_persisted_alias() {
        let mut kb = KnowledgeBase::new(64);
        kb.insert_fact(
            vector(1),
            Metadata::new("isA", vec!["Rex".into(), "Dog".into()]),
            Some("g1".into()),
            None,
        )
        .unwrap();
        assert!(kb.fact_by_name("g1").is_some());
        assert!(kb.fact_by_name("missing").is_none());
    }

    #[test]
    fn aggregate_similarity_is_none_when_empty() {
        let kb = KnowledgeBase::new(64);
        assert_eq!(kb.aggregate_similarity(&vector(1)).unwrap(), None);
    }

    #[test]
    fn aggregate_similarity_is_high_for_a_freshly_inserted_singleton() {
        let mut kb = KnowledgeBase::new(64);
        let v = vector(7);
        kb.insert_fact(v.clone(), Metadata::new("isA", vec!["Rex".into(), "Dog".into()]), None, None)
            .unwrap();
        assert_eq!(kb.aggregate_similarity(&v).unwrap(), Some(1.0));
    }

    #[test]
    fn rules_start_empty() {
        let kb = KnowledgeBase::new(64);
        assert_eq!(kb.rules().len(), 0);
        // Rule registration (`From<RuleCandidate>` and the encoder's
        // reference-chasing) is exercised end-to-end in
        // holobind-session's scenario tests, where a full learn batch is
        // available to build a `RuleCandidate` from.
    }
}
