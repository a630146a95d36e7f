//! The structured result a proof search resolves to.

use crate::step::Step;
use std::collections::HashMap;

/// The full result of attempting to prove a goal.
///
/// Named `ProofOutcome` rather than `ProofResult` to keep the latter free
/// for the workspace's usual `Result<T, E>` alias convention.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProofOutcome {
    /// Whether the search concluded anything at all — `true` for both a
    /// successful proof and a successful *refutation* (disjointness).
    pub valid: bool,
    /// `Some(false)` marks a refutation: the goal was proved false, not
    /// true. `Some(true)` or `None` otherwise.
    pub result: Option<bool>,
    /// Which strategy closed the proof (`direct`, `transitive_chain`,
    /// `transitive_direct`, `backward_chain`, `backward_chain_unified`,
    /// `weak_match`, `disjoint_proof`).
    pub method: Option<String>,
    /// The proof's overall confidence.
    pub confidence: Option<f64>,
    /// The ordered step log.
    pub steps: Vec<Step>,
    /// Variable bindings the proof resolved, if the goal was quantified.
    pub bindings: Option<HashMap<String, String>>,
    /// Why the search failed, set only when `valid` is `false`.
    pub reason: Option<String>,
}

impl ProofOutcome {
    /// Builds a failed outcome with `reason` attached.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Default::default()
        }
    }
}
