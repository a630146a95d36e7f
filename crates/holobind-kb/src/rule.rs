//! A registered `Implies(condition, conclusion)` statement, tracked
//! separately from the fact list so the prover can chain on it.

use holobind_encode::{ConditionPart, RuleCandidate, Statement};
use holobind_geometry::BitVector;

/// A backward-chaining rule.
///
/// Built from an [`RuleCandidate`] the encoder produced when an `Implies`
/// statement with two `$alias` references was learned. Kept distinct from
/// [`RuleCandidate`] so the knowledge base doesn't expose its registration
/// machinery (scope resolution, cycle-checked `And`/`Or` chasing) to
/// callers that only ever read rules back out.
#[derive(Debug, Clone)]
pub struct Rule {
    /// The binding name the `Implies` statement was learned under, if any.
    pub name: Option<String>,
    /// A reconstructed source-text rendering, for display/debugging.
    pub source_text: String,
    /// The condition statement's vector, as it was bound when registered
    /// (holes stamp under their synthetic names; ground identifiers stamp
    /// the same way a KB fact's would).
    pub condition_vector: BitVector,
    /// The conclusion statement's vector.
    pub conclusion_vector: BitVector,
    /// The condition's AST, for unification and metadata pattern matching.
    pub condition_ast: Statement,
    /// The conclusion's AST, for unification against a goal.
    pub conclusion_ast: Statement,
    /// Hole names (`?x`) appearing anywhere in the condition.
    pub condition_variables: Vec<String>,
    /// Hole names appearing anywhere in the conclusion.
    pub conclusion_variables: Vec<String>,
    /// Whether the conclusion has any hole — a quantified rule needs
    /// unification against the goal rather than a plain similarity check.
    pub has_variables: bool,
    /// The condition's compound `And`/`Or`/`Not` shape, or `None` when it
    /// is a single atomic statement.
    pub condition_parts: Option<ConditionPart>,
}

impl From<RuleCandidate> for Rule {
    fn from(candidate: RuleCandidate) -> Self {
        Self {
            name: candidate.name,
            source_text: candidate.source_text,
            condition_vector: candidate.condition_vector,
            conclusion_vector: candidate.conclusion_vector,
            condition_ast: candidate.condition_ast,
            conclusion_ast: candidate.conclusion_ast,
            condition_variables: candidate.condition_variables,
            conclusion_variables: candidate.conclusion_variables,
            has_variables: candidate.has_variables,
            condition_parts: candidate.condition_parts,
        }
    }
}
