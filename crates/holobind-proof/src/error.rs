//! Hard-abort failure modes for a proof search.
//!
//! These never reach a caller as a Rust `Result` error — the public
//! [`crate::prove`] entry point always folds them into a
//! [`crate::ProofOutcome`] with `valid: false` and a `reason`. The type
//! exists so the internal search can propagate a budget exhaustion up
//! through arbitrarily deep recursion with `?` instead of threading a
//! sentinel return value through every call site.

use holobind_algebra::AlgebraError;
use holobind_encode::EncodeError;
use std::fmt;

/// Why a proof search aborted outright, rather than simply failing to
/// find a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofError {
    /// `MAX_PROOF_DEPTH` recursive entries were exceeded.
    DepthExceeded,
    /// The configured wall-clock budget elapsed.
    TimedOut,
    /// `MAX_REASONING_STEPS` recursive entries were counted.
    StepLimitExceeded,
}

impl fmt::Display for ProofError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofError::DepthExceeded => write!(f, "maximum proof depth exceeded"),
            ProofError::TimedOut => write!(f, "proof search timed out"),
            ProofError::StepLimitExceeded => write!(f, "maximum reasoning steps exceeded"),
        }
    }
}

impl std::error::Error for ProofError {}

/// Wraps an [`AlgebraError`] surfaced while encoding a goal or candidate
/// during search, so the hot path can still use `?` even though the
/// public API never exposes this type directly.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum InternalError {
    Proof(ProofError),
    Algebra(AlgebraError),
    Encode(EncodeError),
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalError::Proof(e) => write!(f, "{}", e),
            InternalError::Algebra(e) => write!(f, "{}", e),
            InternalError::Encode(e) => write!(f, "{}", e),
        }
    }
}

impl From<ProofError> for InternalError {
    fn from(e: ProofError) -> Self {
        InternalError::Proof(e)
    }
}

impl From<AlgebraError> for InternalError {
    fn from(e: AlgebraError) -> Self {
        InternalError::Algebra(e)
    }
}

impl From<EncodeError> for InternalError {
    fn from(e: EncodeError) -> Self {
        InternalError::Encode(e)
    }
}

/// Internal plumbing result. Never exposed outside this crate.
pub(crate) type InternalResult<T> = std::result::Result<T, InternalError>;
