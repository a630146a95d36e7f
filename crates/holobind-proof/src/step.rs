//! One entry in a proof's step log.

use std::collections::HashMap;

/// A single proof step, as appended to the log on every success.
///
/// The narrative pretty-printer (owned by `holobind-session`) turns each
/// step's `fact` into a sentence; nothing in this crate renders text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Step {
    /// What happened: `direct_match`, `transitive_found`, `backward_chain`,
    /// `disjoint_check`, and so on.
    pub operation: String,
    /// The fact text this step matched against, if any (`"op arg1 arg2"`).
    pub fact: Option<String>,
    /// The name of the rule this step applied, if any.
    pub rule: Option<String>,
    /// Variable bindings introduced or confirmed by this step, if any.
    pub bindings: Option<HashMap<String, String>>,
    /// This step's own confidence contribution, if any.
    pub confidence: Option<f64>,
}

impl Step {
    /// Builds a step naming only its operation and fact.
    pub fn fact(operation: impl Into<String>, fact: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            fact: Some(fact.into()),
            ..Default::default()
        }
    }
}
