//! Running counters the session exposes via `getReasoningStats` — purely
//! observational, never consulted by `query` or `prove` themselves.

use holobind_proof::ProofOutcome;
use holobind_query::QueryOutcome;
use std::collections::HashMap;

/// A snapshot of [`ReasoningStats`] returned to the caller, with the
/// derived `avg_proof_length` field included.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatsSnapshot {
    pub queries: u64,
    pub proofs: u64,
    pub successful_proofs: u64,
    pub kb_scans: u64,
    pub similarity_checks: u64,
    pub rule_attempts: u64,
    pub transitive_steps: u64,
    pub deepest_proof: usize,
    pub method_histogram: HashMap<String, u64>,
    pub avg_proof_length: f64,
}

/// The session's running reasoning counters.
///
/// Every `query`/`prove` call folds its outcome into these tallies; `step`
/// granularity (per-fact similarity checks, per-rule attempts) is
/// approximated from the outcome's step log rather than threaded out of
/// `holobind-query`/`holobind-proof` as a separate instrumentation
/// channel, since nothing downstream of this crate ever reads a
/// mid-search counter — only the end-of-call snapshot matters.
#[derive(Debug, Clone, Default)]
pub struct ReasoningStats {
    queries: u64,
    proofs: u64,
    successful_proofs: u64,
    kb_scans: u64,
    similarity_checks: u64,
    rule_attempts: u64,
    transitive_steps: u64,
    deepest_proof: usize,
    total_proof_steps: u64,
    method_histogram: HashMap<String, u64>,
}

impl ReasoningStats {
    /// A fresh, all-zero counter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one `query` call against a knowledge base of `kb_len` facts.
    pub fn record_query(&mut self, outcome: &QueryOutcome, kb_len: usize) {
        self.queries += 1;
        self.kb_scans += 1;
        self.similarity_checks += kb_len as u64;
        let _ = outcome;
    }

    /// Records one `prove` call's outcome.
    pub fn record_proof(&mut self, outcome: &ProofOutcome, kb_len: usize) {
        self.proofs += 1;
        self.kb_scans += 1;
        self.similarity_checks += kb_len as u64;
        if outcome.valid {
            self.successful_proofs += 1;
        }
        if let Some(method) = &outcome.method {
            *self.method_histogram.entry(method.clone()).or_insert(0) += 1;
        }
        for step in &outcome.steps {
            if step.rule.is_some() {
                self.rule_attempts += 1;
            }
            if step.operation == "transitive_found" || step.operation == "transitive_step" {
                self.transitive_steps += 1;
            }
        }
        self.total_proof_steps += outcome.steps.len() as u64;
        self.deepest_proof = self.deepest_proof.max(outcome.steps.len());
    }

    /// A point-in-time snapshot, with `avg_proof_length` derived.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            queries: self.queries,
            proofs: self.proofs,
            successful_proofs: self.successful_proofs,
            kb_scans: self.kb_scans,
            similarity_checks: self.similarity_checks,
            rule_attempts: self.rule_attempts,
            transitive_steps: self.transitive_steps,
            deepest_proof: self.deepest_proof,
            method_histogram: self.method_histogram.clone(),
            avg_proof_length: if self.proofs == 0 {
                0.0
            } else {
                self.total_proof_steps as f64 / self.proofs as f64
            },
        }
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
