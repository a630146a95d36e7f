//! The compound shape of a rule's antecedent, and the rule candidate the
//! encoder hands the knowledge base when an `Implies` statement is learned.

use crate::ast::Statement;
use holobind_geometry::BitVector;

/// The recursively nested shape of a rule condition.
///
/// Mirrors how `And`/`Or`/`Not` statements chain together: each compound
/// node's children are themselves conditions, resolved by chasing `$alias`
/// references back to the statements they were bound to.
#[derive(Debug, Clone)]
pub enum ConditionPart {
    And(Vec<ConditionPart>),
    Or(Vec<ConditionPart>),
    Not(Box<ConditionPart>),
    /// An atomic (non-compound) condition.
    Leaf { vector: BitVector, ast: Statement },
}

/// Everything the knowledge base needs to register an `Implies` statement
/// as a backward-chaining rule.
#[derive(Debug, Clone)]
pub struct RuleCandidate {
    /// The binding name the `Implies` statement was learned under, if any.
    pub name: Option<String>,
    /// The source line, reconstructed for display/debugging.
    pub source_text: String,
    pub condition_vector: BitVector,
    pub conclusion_vector: BitVector,
    pub condition_ast: Statement,
    pub conclusion_ast: Statement,
    /// Hole names (`?x`) appearing anywhere in the condition.
    pub condition_variables: Vec<String>,
    /// Hole names appearing anywhere in the conclusion.
    pub conclusion_variables: Vec<String>,
    /// Whether the conclusion contains any hole — a quantified rule needs
    /// unification against the goal rather than a plain similarity check.
    pub has_variables: bool,
    /// The condition's compound structure, or `None` when it is atomic.
    pub condition_parts: Option<ConditionPart>,
}
