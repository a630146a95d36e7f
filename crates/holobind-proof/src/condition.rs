//! Proving a rule's condition: the `And`/`Or`/`Not`/leaf recursion with
//! backtracking over variable bindings.

use crate::engine::Search;
use crate::error::InternalResult;
use crate::options::{
    MAX_PROOF_DEPTH, NOT_PENALTY_CONFIDENCE, RULE_CONFIDENCE_MULTIPLIER, STRONG_MATCH_THRESHOLD,
    TRANSITIVE_CONFIDENCE_MULTIPLIER, TRANSITIVE_OPERATORS,
};
use crate::step::Step;
use crate::unify::Bindings;
use holobind_encode::{Argument, ConditionPart, Statement};
use holobind_geometry::BitVector;
use std::collections::HashSet;

/// One candidate way to satisfy a condition part: the bindings it
/// produces, its confidence, and the steps it appends to the proof log.
type Candidate = (Bindings, f64, Vec<Step>);

impl<'a> Search<'a> {
    /// The first candidate satisfying `part`, if any — what a rule
    /// application actually needs, since only the first consistent
    /// assignment is reported (backtracking already tried the rest).
    pub(crate) fn condition_best(
        &mut self,
        part: &ConditionPart,
        depth: usize,
        visited: &HashSet<String>,
        bindings: &Bindings,
    ) -> InternalResult<Option<Candidate>> {
        let mut candidates = self.part_candidates(part, depth, visited, bindings)?;
        Ok(if candidates.is_empty() {
            None
        } else {
            Some(candidates.remove(0))
        })
    }

    /// Every consistent way to satisfy `part`, used both directly and by
    /// `prove_and`'s backtracking over earlier parts.
    pub(crate) fn part_candidates(
        &mut self,
        part: &ConditionPart,
        depth: usize,
        visited: &HashSet<String>,
        bindings: &Bindings,
    ) -> InternalResult<Vec<Candidate>> {
        self.check_budget(depth)?;
        match part {
            ConditionPart::Leaf { vector, ast } => self.leaf_candidates(vector, ast, depth, visited, bindings),
            ConditionPart::And(parts) => match self.prove_and(parts, 0, depth, visited, bindings)? {
                Some(candidate) => Ok(vec![candidate]),
                None => Ok(Vec::new()),
            },
            ConditionPart::Or(parts) => {
                for p in parts {
                    let mut candidates = self.part_candidates(p, depth, visited, bindings)?;
                    if !candidates.is_empty() {
                        for candidate in candidates.iter_mut() {
                            candidate.1 *= RULE_CONFIDENCE_MULTIPLIER;
                        }
                        return Ok(candidates);
                    }
                }
                Ok(Vec::new())
            }
            ConditionPart::Not(inner) => {
                let inner_candidates = self.part_candidates(inner, depth, visited, bindings)?;
                if inner_candidates.is_empty() {
                    Ok(vec![(bindings.clone(), NOT_PENALTY_CONFIDENCE, Vec::new())])
                } else {
                    Ok(Vec::new())
                }
            }
        }
    }

    /// Backtracking conjunction: tries each candidate of `parts[index]` in
    /// turn, recursing into the rest; a dead end at any later part makes
    /// this part try its next candidate rather than failing outright.
    fn prove_and(
        &mut self,
        parts: &[ConditionPart],
        index: usize,
        depth: usize,
        visited: &HashSet<String>,
        bindings: &Bindings,
    ) -> InternalResult<Option<Candidate>> {
        if index == parts.len() {
            return Ok(Some((bindings.clone(), 1.0, Vec::new())));
        }
        let candidates = self.part_candidates(&parts[index], depth, visited, bindings)?;
        for (local_bindings, local_confidence, local_steps) in candidates {
            if let Some((final_bindings, rest_confidence, mut rest_steps)) =
                self.prove_and(parts, index + 1, depth, visited, &local_bindings)?
            {
                let mut steps = local_steps;
                steps.append(&mut rest_steps);
                return Ok(Some((final_bindings, local_confidence.min(rest_confidence), steps)));
            }
        }
        Ok(None)
    }

    fn leaf_candidates(
        &mut self,
        vector: &BitVector,
        ast: &Statement,
        depth: usize,
        visited: &HashSet<String>,
        bindings: &Bindings,
    ) -> InternalResult<Vec<Candidate>> {
        let has_holes = ast.arguments.iter().any(|a| matches!(a, Argument::Hole(_)));

        if !has_holes {
            if let Some((similarity, metadata)) = self.best_match(vector)? {
                if similarity > STRONG_MATCH_THRESHOLD {
                    return Ok(vec![(
                        bindings.clone(),
                        similarity,
                        vec![Step::fact("condition_match", metadata.signature())],
                    )]);
                }
            }
            return Ok(match self.prove_goal(ast, depth + 1, visited)? {
                Some(success) => vec![(bindings.clone(), success.confidence, success.steps)],
                None => Vec::new(),
            });
        }

        let mut out = Vec::new();
        for fact in self.kb.facts() {
            if fact.metadata.operator != ast.operator || fact.metadata.args.len() != ast.arguments.len() {
                continue;
            }
            let mut local = bindings.clone();
            let mut consistent = true;
            for (pattern_arg, fact_value) in ast.arguments.iter().zip(fact.metadata.args.iter()) {
                match pattern_arg {
                    Argument::Hole(var) => match local.get(var) {
                        Some(existing) if existing != fact_value => {
                            consistent = false;
                            break;
                        }
                        Some(_) => {}
                        None => {
                            local.insert(var.clone(), fact_value.clone());
                        }
                    },
                    other => {
                        if &self.encoder.argument_name(other) != fact_value {
                            consistent = false;
                            break;
                        }
                    }
                }
            }
            if consistent {
                out.push((local, 1.0, vec![Step::fact("condition_match", fact.metadata.signature())]));
            }
        }

        if out.is_empty()
            && ast.arguments.len() == 2
            && TRANSITIVE_OPERATORS.contains(&ast.operator.as_str())
        {
            return self.transitive_leaf_candidates(ast, bindings);
        }

        Ok(out)
    }

    /// When a leaf's exact pattern match finds nothing and the operator is
    /// transitive, falls back to a full closure search from whichever slot
    /// is already ground, binding the remaining variable to each reachable
    /// node ordered by hop distance. Not fully specified by name in the
    /// design this follows beyond "try transitive reasoning for that
    /// triple" — this is the resolution: closure search, nearest first.
    fn transitive_leaf_candidates(&self, ast: &Statement, bindings: &Bindings) -> InternalResult<Vec<Candidate>> {
        let (value0, var0) = resolve_slot(self, &ast.arguments[0], bindings);
        let (value1, var1) = resolve_slot(self, &ast.arguments[1], bindings);

        let mut out = Vec::new();
        match (value0, value1) {
            (Some(from), Some(to)) => {
                for (node, hop, steps) in self.closure_forward(&ast.operator, &from, MAX_PROOF_DEPTH) {
                    if node == to {
                        out.push((bindings.clone(), TRANSITIVE_CONFIDENCE_MULTIPLIER.powi(hop as i32), steps));
                        break;
                    }
                }
            }
            (Some(from), None) => {
                let var = var1.expect("unresolved slot carries its hole name");
                for (node, hop, steps) in self.closure_forward(&ast.operator, &from, MAX_PROOF_DEPTH) {
                    let mut local = bindings.clone();
                    local.insert(var.clone(), node);
                    out.push((local, TRANSITIVE_CONFIDENCE_MULTIPLIER.powi(hop as i32), steps));
                }
            }
            (None, Some(to)) => {
                let var = var0.expect("unresolved slot carries its hole name");
                for (node, hop, steps) in self.closure_backward(&ast.operator, &to, MAX_PROOF_DEPTH) {
                    let mut local = bindings.clone();
                    local.insert(var.clone(), node);
                    out.push((local, TRANSITIVE_CONFIDENCE_MULTIPLIER.powi(hop as i32), steps));
                }
            }
            (None, None) => {}
        }
        Ok(out)
    }

    fn closure_forward(&self, op: &str, from: &str, max_depth: usize) -> Vec<(String, usize, Vec<Step>)> {
        let mut visited = HashSet::new();
        visited.insert(from.to_string());
        let mut frontier = vec![(from.to_string(), Vec::<Step>::new())];
        let mut out = Vec::new();
        let mut hop = 0;

        while !frontier.is_empty() && hop < max_depth {
            hop += 1;
            let mut next_frontier = Vec::new();
            for (node, steps_so_far) in &frontier {
                for y in self.collect_intermediates(op, node) {
                    if visited.contains(&y) {
                        continue;
                    }
                    visited.insert(y.clone());
                    let mut steps = steps_so_far.clone();
                    steps.push(Step::fact("transitive_found", format!("{} {} {}", op, node, y)));
                    out.push((y.clone(), hop, steps.clone()));
                    next_frontier.push((y, steps));
                }
            }
            frontier = next_frontier;
        }
        out
    }

    fn closure_backward(&self, op: &str, to: &str, max_depth: usize) -> Vec<(String, usize, Vec<Step>)> {
        let mut visited = HashSet::new();
        visited.insert(to.to_string());
        let mut frontier = vec![(to.to_string(), Vec::<Step>::new())];
        let mut out = Vec::new();
        let mut hop = 0;

        while !frontier.is_empty() && hop < max_depth {
            hop += 1;
            let mut next_frontier = Vec::new();
            for (node, steps_so_far) in &frontier {
                for x in self.collect_predecessors(op, node) {
                    if visited.contains(&x) {
                        continue;
                    }
                    visited.insert(x.clone());
                    let mut steps = vec![Step::fact("transitive_found", format!("{} {} {}", op, x, node))];
                    steps.extend(steps_so_far.iter().cloned());
                    out.push((x.clone(), hop, steps.clone()));
                    next_frontier.push((x, steps));
                }
            }
            frontier = next_frontier;
        }
        out
    }
}

/// Resolves one argument slot to `(ground_value, hole_name)`: a `Hole`
/// already bound resolves like a constant; an unbound `Hole` yields
/// `(None, Some(var))`; anything else is a constant with no variable name.
fn resolve_slot(search: &Search<'_>, arg: &Argument, bindings: &Bindings) -> (Option<String>, Option<String>) {
    match arg {
        Argument::Hole(var) => match bindings.get(var) {
            Some(value) => (Some(value.clone()), Some(var.clone())),
            None => (None, Some(var.clone())),
        },
        other => (Some(search.encoder.argument_name(other)), None),
    }
}
