//! Error types for query resolution.
//!
//! `query` itself never surfaces these — the public entry point always
//! returns a [`crate::QueryOutcome`] with `success: false` and a reason
//! string. This type exists for the internal plumbing that builds that
//! outcome, matching the workspace's `Result<T, E>` convention.

use holobind_algebra::AlgebraError;
use std::fmt;

/// Failure modes while resolving a query's holes.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// The statement had more holes than [`crate::MAX_HOLES`] allows.
    TooManyHoles {
        /// The number of holes the statement actually had.
        found: usize,
    },
    /// The knowledge base had no facts to search.
    EmptyKnowledgeBase,
    /// The hyperdimensional algebra rejected a combination.
    Algebra(AlgebraError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::TooManyHoles { found } => {
                write!(f, "too many holes: found {}, max {}", found, crate::MAX_HOLES)
            }
            QueryError::EmptyKnowledgeBase => write!(f, "Empty knowledge base"),
            QueryError::Algebra(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<AlgebraError> for QueryError {
    fn from(e: AlgebraError) -> Self {
        QueryError::Algebra(e)
    }
}

/// Alias for `std::result::Result<T, QueryError>`.
pub type QueryResult<T> = std::result::Result<T, QueryError>;
