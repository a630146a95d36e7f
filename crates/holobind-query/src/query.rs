//! Partial-vector construction and per-fact search over holes.

use crate::error::{QueryError, QueryResult};
use crate::outcome::{Alternative, Binding, QueryOutcome, ResultRow};
use holobind_algebra::{bind, similarity, top_k, PositionCodes};
use holobind_encode::{Argument, Encoder, Scope, Statement};
use holobind_kb::KnowledgeBase;
use holobind_vocab::Vocabulary;
use std::collections::{HashMap, HashSet};

/// The highest number of holes a single query may contain.
pub const MAX_HOLES: usize = 5;

/// The similarity a candidate must clear to count as a match, for both
/// the holeless full-statement scan and each hole's decode.
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

/// How many vocabulary atoms to consider per hole before accepting the
/// best one. Only the best is ever used as the hole's answer; the rest
/// back the `alternatives` list when they come from other accepted rows.
const TOP_K: usize = 3;

/// Resolves a (possibly hole-bearing) statement against a knowledge base.
pub struct QueryEngine {
    encoder: Encoder,
}

impl QueryEngine {
    /// Creates an engine for vectors of `dimensions` bits.
    pub fn new(dimensions: usize) -> Self {
        Self {
            encoder: Encoder::new(dimensions),
        }
    }

    /// Resolves `statement` against `kb`, growing `vocab` and `positions`
    /// as needed (an unresolved identifier introduces a new stamp safely
    /// — queries never fail because a name hasn't been seen before).
    ///
    /// Never panics and never returns an error: every failure mode is
    /// folded into a `QueryOutcome { success: false, reason: Some(_), .. }`.
    pub fn query(
        &self,
        statement: &Statement,
        vocab: &mut Vocabulary,
        positions: &mut PositionCodes,
        scope: &Scope,
        kb: &KnowledgeBase,
    ) -> QueryOutcome {
        match self.run(statement, vocab, positions, scope, kb) {
            Ok(outcome) => outcome,
            Err(e) => QueryOutcome::failure(e.to_string()),
        }
    }

    fn run(
        &self,
        statement: &Statement,
        vocab: &mut Vocabulary,
        positions: &mut PositionCodes,
        scope: &Scope,
        kb: &KnowledgeBase,
    ) -> QueryResult<QueryOutcome> {
        let mut holes = Vec::new();
        let mut knowns = Vec::new();
        for (index, argument) in statement.arguments.iter().enumerate() {
            let position = index + 1;
            match argument {
                Argument::Hole(name) => holes.push((position, name.clone())),
                other => knowns.push((position, other)),
            }
        }
        if holes.len() > MAX_HOLES {
            return Err(QueryError::TooManyHoles { found: holes.len() });
        }
        if kb.is_empty() {
            return Err(QueryError::EmptyKnowledgeBase);
        }

        if holes.is_empty() {
            self.run_holeless(statement, vocab, positions, scope, kb)
        } else {
            self.run_with_holes(statement, &knowns, &holes, vocab, positions, scope, kb)
        }
    }

    fn run_holeless(
        &self,
        statement: &Statement,
        vocab: &mut Vocabulary,
        positions: &mut PositionCodes,
        scope: &Scope,
        kb: &KnowledgeBase,
    ) -> QueryResult<QueryOutcome> {
        let (query_vector, _) = self
            .encoder
            .encode_statement(statement, vocab, positions, scope)
            .map_err(|_| QueryError::EmptyKnowledgeBase)?;

        let mut rows = Vec::new();
        for fact in kb.facts() {
            let sim = similarity(&query_vector, &fact.vector)?;
            if sim > SIMILARITY_THRESHOLD {
                rows.push(ResultRow {
                    fact_name: fact.name.clone(),
                    operator: fact.metadata.operator.clone(),
                    args: fact.metadata.args.clone(),
                    mean_similarity: sim,
                    hole_bindings: HashMap::new(),
                });
            }
        }
        rows.sort_by(|a, b| b.mean_similarity.partial_cmp(&a.mean_similarity).unwrap());

        let confidence = rows.first().map(|r| r.mean_similarity).unwrap_or(0.0);
        let ambiguous = rows.len() >= 2 && (rows[0].mean_similarity - rows[1].mean_similarity) < 0.1;
        let success = !rows.is_empty();

        Ok(QueryOutcome {
            success,
            bindings: HashMap::new(),
            confidence,
            ambiguous,
            reason: if success {
                None
            } else {
                Some("no fact cleared the similarity threshold".to_string())
            },
            all_results: rows,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn run_with_holes(
        &self,
        statement: &Statement,
        knowns: &[(usize, &Argument)],
        holes: &[(usize, String)],
        vocab: &mut Vocabulary,
        positions: &mut PositionCodes,
        scope: &Scope,
        kb: &KnowledgeBase,
    ) -> QueryResult<QueryOutcome> {
        let mut partial = vocab.get_or_create(&statement.operator);
        for (position, argument) in knowns {
            let position_code = positions.position(*position)?;
            let argument_vector = self
                .encoder
                .encode_argument(argument, vocab, scope, statement.line)
                .map_err(|_| QueryError::EmptyKnowledgeBase)?;
            let contribution = bind(&position_code, &argument_vector)?;
            partial = bind(&partial, &contribution)?;
        }

        let mut rows = Vec::new();
        for fact in kb.facts() {
            let candidate = bind(&fact.vector, &partial)?;
            let mut hole_bindings = HashMap::new();
            let mut similarities = Vec::new();
            let mut all_bound = true;

            for (position, hole_name) in holes {
                let position_code = positions.position(*position)?;
                let raw = bind(&candidate, &position_code)?;
                let ranked = top_k(&raw, vocab.entries(), TOP_K)?;
                let best = ranked.first();
                match best {
                    Some(best) if best.similarity > SIMILARITY_THRESHOLD => {
                        similarities.push(best.similarity);
                        hole_bindings.insert(
                            hole_name.clone(),
                            Binding {
                                answer: Some(best.name.clone()),
                                similarity: best.similarity,
                                alternatives: Vec::new(),
                            },
                        );
                    }
                    _ => {
                        all_bound = false;
                        hole_bindings.insert(hole_name.clone(), Binding::default());
                    }
                }
            }

            if all_bound {
                let mean = similarities.iter().sum::<f64>() / similarities.len() as f64;
                rows.push(ResultRow {
                    fact_name: fact.name.clone(),
                    operator: fact.metadata.operator.clone(),
                    args: fact.metadata.args.clone(),
                    mean_similarity: mean,
                    hole_bindings,
                });
            }
        }

        rows.sort_by(|a, b| b.mean_similarity.partial_cmp(&a.mean_similarity).unwrap());

        let confidence = rows.first().map(|r| r.mean_similarity).unwrap_or(0.0);
        let ambiguous = rows.len() >= 2 && (rows[0].mean_similarity - rows[1].mean_similarity) < 0.1;
        let success = !rows.is_empty();

        let bindings = if let Some(top) = rows.first() {
            let mut bindings = HashMap::new();
            for (_, hole_name) in holes {
                let top_binding = top
                    .hole_bindings
                    .get(hole_name)
                    .cloned()
                    .unwrap_or_default();
                let mut seen: HashSet<String> = HashSet::new();
                if let Some(value) = &top_binding.answer {
                    seen.insert(value.clone());
                }
                let mut alternatives = Vec::new();
                for row in rows.iter().skip(1) {
                    if let Some(binding) = row.hole_bindings.get(hole_name) {
                        if let Some(value) = &binding.answer {
                            if seen.insert(value.clone()) {
                                alternatives.push(Alternative {
                                    value: value.clone(),
                                    similarity: binding.similarity,
                                });
                            }
                        }
                    }
                }
                bindings.insert(
                    hole_name.clone(),
                    Binding {
                        answer: top_binding.answer,
                        similarity: top_binding.similarity,
                        alternatives,
                    },
                );
            }
            bindings
        } else {
            HashMap::new()
        };

        Ok(QueryOutcome {
            success,
            bindings,
            confidence,
            ambiguous,
            reason: if success {
                None
            } else {
                Some("no fact bound every hole above the similarity threshold".to_string())
            },
            all_results: rows,
        })
    }
}
