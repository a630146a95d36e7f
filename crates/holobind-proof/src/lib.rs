//! Depth-bounded backward chaining over a knowledge base: direct match,
//! transitive closure, rule application with unification and
//! backtracking, and disjointness refutation.
//!
//! Like `holobind-query`, this crate never surfaces a hard error from its
//! public entry point — a budget exhaustion, a parse-time oddity, or
//! simply not finding a proof all fold into a [`ProofOutcome`] with
//! `valid: false` and a `reason`.

mod condition;
mod engine;
mod error;
mod options;
mod outcome;
mod step;
mod unify;

pub use error::ProofError;
pub use options::{
    ProveOptions, DEFAULT_TIMEOUT, MAX_PROOF_DEPTH, MAX_REASONING_STEPS, NOT_PENALTY_CONFIDENCE,
    RULE_CONFIDENCE_MULTIPLIER, STRONG_MATCH_THRESHOLD, TRANSITIVE_CONFIDENCE_MULTIPLIER,
    TRANSITIVE_OPERATORS, WEAK_MATCH_THRESHOLD,
};
pub use outcome::ProofOutcome;
pub use step::Step;
pub use unify::{unify_statement, Bindings};

use engine::Search;
use holobind_algebra::PositionCodes;
use holobind_encode::{Encoder, Statement};
use holobind_kb::KnowledgeBase;
use holobind_vocab::Vocabulary;
use std::collections::HashSet;

/// Attempts to prove `goal` against `kb`, growing `vocab` and `positions`
/// as the search encodes goals and condition leaves it hasn't seen before.
///
/// Never panics and never returns a Rust error: every abort (depth, step,
/// or wall-clock budget exceeded) and every "no proof found" outcome folds
/// into `ProofOutcome { valid: false, reason: Some(_), .. }`.
pub fn prove(
    goal: &Statement,
    vocab: &mut Vocabulary,
    positions: &mut PositionCodes,
    kb: &KnowledgeBase,
    options: &ProveOptions,
) -> ProofOutcome {
    if kb.is_empty() {
        return ProofOutcome::failure("Empty knowledge base");
    }

    let encoder = Encoder::new(kb.dimensions());
    let mut search = Search::new(&encoder, vocab, positions, kb, options);

    match search.prove_goal(goal, 0, &HashSet::new()) {
        Ok(Some(success)) => ProofOutcome {
            valid: true,
            result: success.result,
            method: Some(success.method),
            confidence: Some(success.confidence),
            steps: success.steps,
            bindings: success.bindings,
            reason: None,
        },
        Ok(None) => ProofOutcome::failure("goal is not provable within the configured budget"),
        Err(e) => ProofOutcome::failure(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holobind_encode::{parse_source, Scope};
    use holobind_kb::KnowledgeBase;

    fn fresh(dimensions: usize) -> (Encoder, Vocabulary, PositionCodes, Scope) {
        (
            Encoder::new(dimensions),
            Vocabulary::new(dimensions).unwrap(),
            PositionCodes::new(dimensions),
            Scope::new(),
        )
    }

    fn learn(
        text: &str,
        encoder: &Encoder,
        vocab: &mut Vocabulary,
        positions: &mut PositionCodes,
        scope: &mut Scope,
        kb: &mut KnowledgeBase,
    ) {
        for statement in parse_source(text).unwrap() {
            let (vector, metadata) = encoder
                .encode_statement(&statement, vocab, positions, scope)
                .unwrap();
            if let Some(candidate) = encoder
                .try_build_rule_candidate(&statement, vocab, positions, scope)
                .unwrap()
            {
                kb.register_rule(candidate.into());
            }
            let name = statement.persist_name.clone();
            let should_persist = name.is_some() || statement.binding.is_none();
            if should_persist {
                kb.insert_fact(vector.clone(), metadata, name, None).unwrap();
            }
            if let Some(alias) = &statement.binding {
                scope.bind(alias, vector, statement);
            }
        }
    }

    #[test]
    fn empty_knowledge_base_fails_immediately() {
        let (_, mut vocab, mut positions, _scope) = fresh(64);
        let kb = KnowledgeBase::new(64);
        let goal = parse_source("isA Rex Animal").unwrap().remove(0);
        let outcome = prove(&goal, &mut vocab, &mut positions, &kb, &ProveOptions::default());
        assert!(!outcome.valid);
        assert_eq!(outcome.reason.as_deref(), Some("Empty knowledge base"));
    }

    #[test]
    fn direct_match_succeeds_above_strong_threshold() {
        let (encoder, mut vocab, mut positions, mut scope) = fresh(1024);
        let mut kb = KnowledgeBase::new(1024);
        learn("isA Rex Dog", &encoder, &mut vocab, &mut positions, &mut scope, &mut kb);

        let goal = parse_source("isA Rex Dog").unwrap().remove(0);
        let outcome = prove(&goal, &mut vocab, &mut positions, &kb, &ProveOptions::default());
        assert!(outcome.valid);
        assert_eq!(outcome.method.as_deref(), Some("direct"));
    }

    #[test]
    fn transitive_chain_proves_through_intermediates() {
        let (encoder, mut vocab, mut positions, mut scope) = fresh(1024);
        let mut kb = KnowledgeBase::new(1024);
        learn(
            "isA Rex Dog\nisA Dog Mammal\nisA Mammal Animal",
            &encoder,
            &mut vocab,
            &mut positions,
            &mut scope,
            &mut kb,
        );

        let goal = parse_source("isA Rex Animal").unwrap().remove(0);
        let outcome = prove(&goal, &mut vocab, &mut positions, &kb, &ProveOptions::default());
        assert!(outcome.valid);
        assert_eq!(outcome.method.as_deref(), Some("transitive_chain"));
        let facts: Vec<&str> = outcome.steps.iter().filter_map(|s| s.fact.as_deref()).collect();
        assert_eq!(facts, vec!["isA Rex Dog", "isA Dog Mammal", "isA Mammal Animal"]);
    }

    #[test]
    fn backward_chaining_with_unification_binds_the_variable() {
        let (encoder, mut vocab, mut positions, mut scope) = fresh(1024);
        let mut kb = KnowledgeBase::new(1024);
        learn(
            "@cond isA ?x Human\n@conc isA ?x Mortal\n@r Implies $cond $conc\nisA Socrates Human",
            &encoder,
            &mut vocab,
            &mut positions,
            &mut scope,
            &mut kb,
        );

        let goal = parse_source("isA Socrates Mortal").unwrap().remove(0);
        let outcome = prove(&goal, &mut vocab, &mut positions, &kb, &ProveOptions::default());
        assert!(outcome.valid);
        assert_eq!(outcome.method.as_deref(), Some("backward_chain_unified"));
        let bindings = outcome.bindings.expect("unification should bind x");
        assert_eq!(bindings.get("x"), Some(&"Socrates".to_string()));
    }

    #[test]
    fn conjunctive_rule_proves_with_backtracking() {
        let (encoder, mut vocab, mut positions, mut scope) = fresh(1024);
        let mut kb = KnowledgeBase::new(1024);
        learn(
            "has Alice Motive\nhas Alice Opportunity\nhas Alice Means\n\
             @c1 has ?x Motive\n@c2 has ?x Opportunity\n@c3 has ?x Means\n\
             @a1 And $c1 $c2\n@a2 And $a1 $c3\n\
             @conc isGuilty ?x\n@r Implies $a2 $conc",
            &encoder,
            &mut vocab,
            &mut positions,
            &mut scope,
            &mut kb,
        );

        let goal = parse_source("isGuilty Alice").unwrap().remove(0);
        let outcome = prove(&goal, &mut vocab, &mut positions, &kb, &ProveOptions::default());
        assert!(outcome.valid);
    }

    #[test]
    fn disjoint_containers_refute_a_located_in_goal() {
        let (encoder, mut vocab, mut positions, mut scope) = fresh(1024);
        let mut kb = KnowledgeBase::new(1024);
        learn(
            "locatedIn Tokyo Japan\nlocatedIn Japan Asia\nisA Asia Continent\n\
             isA Europe Continent\nmutuallyDisjoint Continent",
            &encoder,
            &mut vocab,
            &mut positions,
            &mut scope,
            &mut kb,
        );

        let goal = parse_source("locatedIn Tokyo Europe").unwrap().remove(0);
        let outcome = prove(&goal, &mut vocab, &mut positions, &kb, &ProveOptions::default());
        assert!(outcome.valid);
        assert_eq!(outcome.result, Some(false));
        assert_eq!(outcome.method.as_deref(), Some("disjoint_proof"));
    }

    #[test]
    fn unrelated_goal_is_not_provable() {
        let (encoder, mut vocab, mut positions, mut scope) = fresh(1024);
        let mut kb = KnowledgeBase::new(1024);
        learn("isA Rex Dog", &encoder, &mut vocab, &mut positions, &mut scope, &mut kb);

        let goal = parse_source("isA Fido Cat").unwrap().remove(0);
        let outcome = prove(&goal, &mut vocab, &mut positions, &kb, &ProveOptions::default());
        assert!(!outcome.valid);
    }
}
