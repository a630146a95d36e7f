//! Tunable bounds for one proof search.

use std::time::Duration;

/// The deepest a recursive `proveGoal`/condition search may go before
/// aborting with [`crate::ProofError::DepthExceeded`].
pub const MAX_PROOF_DEPTH: usize = 10;

/// The most recursive entries (goal attempts, transitive hops, condition
/// parts) a single proof may spend before aborting with
/// [`crate::ProofError::StepLimitExceeded`].
pub const MAX_REASONING_STEPS: usize = 10_000;

/// The default wall-clock budget for a proof search.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// A fact counts as a strong direct match above this similarity.
pub const STRONG_MATCH_THRESHOLD: f64 = 0.7;

/// A fact counts as a weak direct match in `(WEAK_MATCH_THRESHOLD, STRONG_MATCH_THRESHOLD]`.
pub const WEAK_MATCH_THRESHOLD: f64 = 0.55;

/// Confidence multiplier applied once per rule application (`And`/`Or`
/// condition proving, and the final rule-match confidence).
pub const RULE_CONFIDENCE_MULTIPLIER: f64 = 0.95;

/// Confidence multiplier applied once per hop of a transitive chain.
pub const TRANSITIVE_CONFIDENCE_MULTIPLIER: f64 = 0.98;

/// The confidence penalty applied when a `Not` condition succeeds by
/// negation as failure. No particular value is mandated; this one is
/// chosen and held fixed for reproducibility.
pub const NOT_PENALTY_CONFIDENCE: f64 = 0.9;

/// The operators over which the prover performs transitive closure.
pub const TRANSITIVE_OPERATORS: &[&str] = &["isA", "locatedIn", "partOf", "subclassOf", "containedIn"];

/// Per-search tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProveOptions {
    /// Wall-clock budget for the whole search.
    pub timeout: Duration,
    /// Maximum recursion depth.
    pub max_depth: usize,
    /// Maximum recursive entries before aborting.
    pub max_steps: usize,
}

impl Default for ProveOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_depth: MAX_PROOF_DEPTH,
            max_steps: MAX_REASONING_STEPS,
        }
    }
}

impl ProveOptions {
    /// The default options with `timeout` overridden.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}
