//! The backward-chaining search itself.

use crate::error::{InternalError, InternalResult, ProofError};
use crate::options::{
    ProveOptions, RULE_CONFIDENCE_MULTIPLIER, STRONG_MATCH_THRESHOLD, TRANSITIVE_CONFIDENCE_MULTIPLIER,
    TRANSITIVE_OPERATORS, WEAK_MATCH_THRESHOLD,
};
use crate::step::Step;
use crate::unify::{unify_statement, Bindings};
use holobind_algebra::{similarity, PositionCodes};
use holobind_encode::{ConditionPart, Encoder, Metadata, Scope, Statement};
use holobind_geometry::BitVector;
use holobind_kb::KnowledgeBase;
use holobind_vocab::Vocabulary;
use std::collections::HashSet;
use std::time::Instant;

/// What a successful branch of the search found, before it is folded into
/// the public [`crate::ProofOutcome`].
pub(crate) struct ProveSuccess {
    pub method: String,
    pub confidence: f64,
    pub steps: Vec<Step>,
    pub bindings: Option<Bindings>,
    pub result: Option<bool>,
}

/// One proof attempt's mutable working state: the shared vocabulary and
/// position-code cache (a goal or a rule's condition can introduce a name
/// neither has seen, same as a query can), plus the budget counters.
pub(crate) struct Search<'a> {
    pub(crate) encoder: &'a Encoder,
    pub(crate) vocab: &'a mut Vocabulary,
    pub(crate) positions: &'a mut PositionCodes,
    pub(crate) kb: &'a KnowledgeBase,
    options: &'a ProveOptions,
    start: Instant,
    steps: usize,
}

impl<'a> Search<'a> {
    pub(crate) fn new(
        encoder: &'a Encoder,
        vocab: &'a mut Vocabulary,
        positions: &'a mut PositionCodes,
        kb: &'a KnowledgeBase,
        options: &'a ProveOptions,
    ) -> Self {
        Self {
            encoder,
            vocab,
            positions,
            kb,
            options,
            start: Instant::now(),
            steps: 0,
        }
    }

    pub(crate) fn check_budget(&mut self, depth: usize) -> InternalResult<()> {
        self.steps += 1;
        if depth > self.options.max_depth {
            return Err(InternalError::Proof(ProofError::DepthExceeded));
        }
        if self.steps > self.options.max_steps {
            return Err(InternalError::Proof(ProofError::StepLimitExceeded));
        }
        if self.start.elapsed() > self.options.timeout {
            return Err(InternalError::Proof(ProofError::TimedOut));
        }
        Ok(())
    }

    pub(crate) fn encode_goal(&mut self, goal: &Statement) -> InternalResult<BitVector> {
        let scope = Scope::new();
        let (vector, _) = self
            .encoder
            .encode_statement(goal, self.vocab, self.positions, &scope)?;
        Ok(vector)
    }

    /// The single most similar fact in the knowledge base to `vector`, if
    /// any facts exist. Reads only `metadata`, never used by a caller to
    /// drift the proof's exact-lookup guarantees (similarity search only
    /// ever decides *whether* to accept a branch, not what a step's fact
    /// text names).
    pub(crate) fn best_match(&self, vector: &BitVector) -> InternalResult<Option<(f64, Metadata)>> {
        let mut best: Option<(f64, Metadata)> = None;
        for fact in self.kb.facts() {
            let sim = similarity(vector, &fact.vector)?;
            let better = best.as_ref().map(|(b, _)| sim > *b).unwrap_or(true);
            if better {
                best = Some((sim, fact.metadata.clone()));
            }
        }
        Ok(best)
    }

    /// Distinct `y` such that some fact asserts `{op, [subject, y]}`,
    /// excluding reserved words and `subject` itself.
    pub(crate) fn collect_intermediates(&self, op: &str, subject: &str) -> Vec<String> {
        let mut out = Vec::new();
        for fact in self.kb.facts() {
            if fact.metadata.operator != op || fact.metadata.args.len() != 2 {
                continue;
            }
            if fact.metadata.args[0] != subject {
                continue;
            }
            let y = &fact.metadata.args[1];
            if y != subject
                && !holobind_vocab::RESERVED_OPERATORS.contains(&y.as_str())
                && !out.contains(y)
            {
                out.push(y.clone());
            }
        }
        out
    }

    /// Distinct `x` such that some fact asserts `{op, [x, object]}`.
    pub(crate) fn collect_predecessors(&self, op: &str, object: &str) -> Vec<String> {
        let mut out = Vec::new();
        for fact in self.kb.facts() {
            if fact.metadata.operator != op || fact.metadata.args.len() != 2 {
                continue;
            }
            if fact.metadata.args[1] != object {
                continue;
            }
            let x = &fact.metadata.args[0];
            if x != object && !out.contains(x) {
                out.push(x.clone());
            }
        }
        out
    }

    /// `{operator, args}` pairs asserting `isA name T`, collected as `T`.
    pub(crate) fn types_of(&self, name: &str) -> HashSet<String> {
        self.kb
            .facts()
            .iter()
            .filter(|f| f.metadata.operator == "isA" && f.metadata.args.len() == 2 && f.metadata.args[0] == name)
            .map(|f| f.metadata.args[1].clone())
            .collect()
    }

    /// The main per-goal attempt. Tries, in order: a strong direct match,
    /// a transitive chain, rule application, a weak direct match, then
    /// disjointness refutation.
    pub(crate) fn prove_goal(
        &mut self,
        goal: &Statement,
        depth: usize,
        visited: &HashSet<String>,
    ) -> InternalResult<Option<ProveSuccess>> {
        self.check_budget(depth)?;

        let goal_vector = self.encode_goal(goal)?;
        let key = vector_key(&goal_vector);
        if visited.contains(&key) {
            return Ok(None);
        }
        let mut child_visited = visited.clone();
        child_visited.insert(key);

        let direct = self.best_match(&goal_vector)?;

        if let Some((sim, metadata)) = &direct {
            if *sim > STRONG_MATCH_THRESHOLD {
                return Ok(Some(ProveSuccess {
                    method: "direct".to_string(),
                    confidence: *sim,
                    steps: vec![Step::fact("direct_match", metadata.signature())],
                    bindings: None,
                    result: None,
                }));
            }
        }

        if let Some(success) = self.try_transitive(goal, depth, &child_visited)? {
            return Ok(Some(success));
        }

        if let Some(success) = self.try_rules(goal, depth, &child_visited)? {
            return Ok(Some(success));
        }

        if let Some((sim, metadata)) = &direct {
            if *sim > WEAK_MATCH_THRESHOLD && *sim <= STRONG_MATCH_THRESHOLD {
                return Ok(Some(ProveSuccess {
                    method: "weak_match".to_string(),
                    confidence: *sim,
                    steps: vec![Step::fact("weak_match", metadata.signature())],
                    bindings: None,
                    result: None,
                }));
            }
        }

        if let Some(success) = self.try_disjointness(goal, &child_visited)? {
            return Ok(Some(success));
        }

        Ok(None)
    }

    fn try_transitive(
        &mut self,
        goal: &Statement,
        depth: usize,
        visited: &HashSet<String>,
    ) -> InternalResult<Option<ProveSuccess>> {
        if goal.arguments.len() != 2 || !TRANSITIVE_OPERATORS.contains(&goal.operator.as_str()) {
            return Ok(None);
        }
        let subject = self.encoder.argument_name(&goal.arguments[0]);
        let object = self.encoder.argument_name(&goal.arguments[1]);
        let op = goal.operator.clone();

        match self.find_chain(&op, &subject, &object, depth, visited)? {
            Some(steps) => {
                let hops = steps.len();
                let confidence = TRANSITIVE_CONFIDENCE_MULTIPLIER.powi(hops as i32 - 1);
                let method = if hops == 1 { "transitive_direct" } else { "transitive_chain" };
                Ok(Some(ProveSuccess {
                    method: method.to_string(),
                    confidence,
                    steps,
                    bindings: None,
                    result: None,
                }))
            }
            None => Ok(None),
        }
    }

    fn find_chain(
        &mut self,
        op: &str,
        from: &str,
        to: &str,
        depth: usize,
        visited: &HashSet<String>,
    ) -> InternalResult<Option<Vec<Step>>> {
        self.check_budget(depth)?;
        let key = format!("{}:{}:{}", op, from, to);
        if visited.contains(&key) {
            return Ok(None);
        }
        let mut child_visited = visited.clone();
        child_visited.insert(key);

        let intermediates = self.collect_intermediates(op, from);
        if intermediates.iter().any(|y| y == to) {
            return Ok(Some(vec![Step::fact(
                "transitive_found",
                format!("{} {} {}", op, from, to),
            )]));
        }

        for y in intermediates {
            if let Some(mut rest) = self.find_chain(op, &y, to, depth + 1, &child_visited)? {
                let mut steps = vec![Step::fact("transitive_found", format!("{} {} {}", op, from, y))];
                steps.append(&mut rest);
                return Ok(Some(steps));
            }
        }
        Ok(None)
    }

    fn try_rules(
        &mut self,
        goal: &Statement,
        depth: usize,
        visited: &HashSet<String>,
    ) -> InternalResult<Option<ProveSuccess>> {
        let rules = self.kb.rules().to_vec();
        let goal_vector = self.encode_goal(goal)?;

        for rule in &rules {
            self.check_budget(depth)?;

            if !rule.has_variables {
                let sim = similarity(&goal_vector, &rule.conclusion_vector)?;
                if sim <= STRONG_MATCH_THRESHOLD {
                    continue;
                }
                let part = rule.condition_parts.clone().unwrap_or_else(|| ConditionPart::Leaf {
                    vector: rule.condition_vector.clone(),
                    ast: rule.condition_ast.clone(),
                });
                if let Some((_, cond_conf, steps)) =
                    self.condition_best(&part, depth + 1, visited, &Bindings::new())?
                {
                    let confidence = sim.min(cond_conf) * RULE_CONFIDENCE_MULTIPLIER;
                    return Ok(Some(ProveSuccess {
                        method: "backward_chain".to_string(),
                        confidence,
                        steps,
                        bindings: None,
                        result: None,
                    }));
                }
            } else if let Some(initial) =
                unify_statement(goal, &rule.conclusion_ast, self.encoder, &Bindings::new())
            {
                let part = rule.condition_parts.clone().unwrap_or_else(|| ConditionPart::Leaf {
                    vector: rule.condition_vector.clone(),
                    ast: rule.condition_ast.clone(),
                });
                if let Some((final_bindings, cond_conf, steps)) =
                    self.condition_best(&part, depth + 1, visited, &initial)?
                {
                    let confidence = cond_conf * RULE_CONFIDENCE_MULTIPLIER;
                    return Ok(Some(ProveSuccess {
                        method: "backward_chain_unified".to_string(),
                        confidence,
                        steps,
                        bindings: Some(final_bindings),
                        result: None,
                    }));
                }
            }
        }
        Ok(None)
    }

    fn try_disjointness(
        &mut self,
        goal: &Statement,
        _visited: &HashSet<String>,
    ) -> InternalResult<Option<ProveSuccess>> {
        if goal.operator != "locatedIn" || goal.arguments.len() != 2 {
            return Ok(None);
        }
        let subject = self.encoder.argument_name(&goal.arguments[0]);
        let object = self.encoder.argument_name(&goal.arguments[1]);

        let disjoint_types: HashSet<String> = self
            .kb
            .facts()
            .iter()
            .filter(|f| f.metadata.operator == "mutuallyDisjoint" && f.metadata.args.len() == 1)
            .map(|f| f.metadata.args[0].clone())
            .collect();
        if disjoint_types.is_empty() {
            return Ok(None);
        }
        let object_types = self.types_of(&object);
        if object_types.is_empty() {
            return Ok(None);
        }

        let mut visited_nodes = HashSet::new();
        visited_nodes.insert(subject.clone());
        let mut frontier = vec![(subject, Vec::<Step>::new())];
        let mut hop = 0;

        while !frontier.is_empty() && hop < self.options.max_depth {
            hop += 1;
            self.check_budget(hop)?;
            let mut next_frontier = Vec::new();
            for (node, steps_so_far) in &frontier {
                for c in self.collect_intermediates("locatedIn", node) {
                    if visited_nodes.contains(&c) {
                        continue;
                    }
                    visited_nodes.insert(c.clone());
                    let mut steps = steps_so_far.clone();
                    steps.push(Step::fact("transitive_found", format!("locatedIn {} {}", node, c)));

                    if c != object {
                        let c_types = self.types_of(&c);
                        if let Some(shared) = c_types.iter().find(|t| disjoint_types.contains(*t) && object_types.contains(*t)) {
                            let mut final_steps = steps.clone();
                            final_steps.push(Step::fact(
                                "disjoint_check",
                                format!("{} {} {}", shared, c, object),
                            ));
                            return Ok(Some(ProveSuccess {
                                method: "disjoint_proof".to_string(),
                                confidence: 1.0,
                                steps: final_steps,
                                bindings: None,
                                result: Some(false),
                            }));
                        }
                    }
                    next_frontier.push((c, steps));
                }
            }
            frontier = next_frontier;
        }
        Ok(None)
    }
}

/// A short, stable fingerprint of a goal vector for the `visited` set.
fn vector_key(vector: &BitVector) -> String {
    vector
        .words()
        .iter()
        .take(4)
        .map(|w| format!("{:08x}", w))
        .collect::<Vec<_>>()
        .join("")
}
