//! The structured result a query resolves to.

use std::collections::HashMap;

/// One alternative value a hole could have bound to, from a row other
/// than the primary result.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    /// The alternative's name.
    pub value: String,
    /// Similarity of that row's binding for this hole.
    pub similarity: f64,
}

/// What a single hole resolved to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Binding {
    /// The best-matching name, or `None` if no vocabulary atom cleared
    /// [`crate::SIMILARITY_THRESHOLD`] for this hole.
    pub answer: Option<String>,
    /// Similarity of `answer` to the decoded slot, `0.0` when `answer`
    /// is `None`.
    pub similarity: f64,
    /// Distinct values other accepted facts bound this hole to, ordered
    /// by the rank of the row they came from.
    pub alternatives: Vec<Alternative>,
}

/// One fact that matched the query's known arguments, with every hole
/// bound.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    /// The fact's `@a:id` persistence name, if any.
    pub fact_name: Option<String>,
    /// The fact's operator.
    pub operator: String,
    /// The fact's name-flattened arguments.
    pub args: Vec<String>,
    /// Mean similarity across this row's hole bindings.
    pub mean_similarity: f64,
    /// Per-hole bindings for this row alone (before cross-row alternative
    /// collection — see [`QueryOutcome::bindings`]).
    pub hole_bindings: HashMap<String, Binding>,
}

/// The full result of resolving a query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryOutcome {
    /// Whether at least one fact matched.
    pub success: bool,
    /// The primary result's per-hole bindings, with alternatives pulled
    /// from subsequent rows' distinct values.
    pub bindings: HashMap<String, Binding>,
    /// The primary result's mean hole similarity (`0.0` for a holeless
    /// query with no match, or a holeless query's top similarity).
    pub confidence: f64,
    /// Whether the gap between the first and second row's mean
    /// similarity is under `0.1` — a close call worth flagging.
    pub ambiguous: bool,
    /// Every accepted row, sorted descending by mean similarity.
    pub all_results: Vec<ResultRow>,
    /// Why the query failed, set only when `success` is `false`.
    pub reason: Option<String>,
}

impl QueryOutcome {
    /// Builds a failed outcome with `reason` attached.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Default::default()
        }
    }
}
