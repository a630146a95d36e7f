//! Error types for parsing and encoding.

use crate::ast::Span;
use holobind_algebra::AlgebraError;
use holobind_vocab::VocabError;
use std::fmt;

/// Failure modes while turning surface text into facts and rules.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// The line scanner or statement grammar rejected a line.
    ParseError {
        /// 1-based line number.
        line: usize,
        /// Byte span of the offending token, if localized.
        span: Option<Span>,
        /// What went wrong.
        message: String,
    },
    /// A `$a` reference did not resolve to any earlier binding in scope.
    UndefinedReference {
        /// 1-based line number of the referencing statement.
        line: usize,
        /// The unresolved alias.
        name: String,
    },
    /// The `@alias` DAG built while registering a rule contains a cycle.
    CycleInReferences {
        /// The alias at which the cycle was detected.
        name: String,
    },
    /// `Load "path"` failed to read the referenced theory.
    LoadFailed {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error's message.
        reason: String,
    },
    /// Vocabulary construction failed (invalid dimensionality).
    Vocab(VocabError),
    /// The algebra layer rejected a combination (geometry mismatch, or an
    /// empty list somehow reaching `bundle`).
    Algebra(AlgebraError),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::ParseError { line, message, .. } => {
                write!(f, "parse error on line {}: {}", line, message)
            }
            EncodeError::UndefinedReference { line, name } => {
                write!(f, "line {}: undefined reference ${}", line, name)
            }
            EncodeError::CycleInReferences { name } => {
                write!(f, "cyclic reference chain detected at @{}", name)
            }
            EncodeError::LoadFailed { path, reason } => {
                write!(f, "failed to load theory \"{}\": {}", path, reason)
            }
            EncodeError::Vocab(e) => write!(f, "{}", e),
            EncodeError::Algebra(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EncodeError {}

impl From<VocabError> for EncodeError {
    fn from(e: VocabError) -> Self {
        EncodeError::Vocab(e)
    }
}

impl From<AlgebraError> for EncodeError {
    fn from(e: AlgebraError) -> Self {
        EncodeError::Algebra(e)
    }
}

/// Alias for `std::result::Result<T, EncodeError>`.
pub type EncodeResult<T> = std::result::Result<T, EncodeError>;
