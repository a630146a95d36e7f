//! Error types for session construction.

use holobind_vocab::VocabError;
use std::fmt;

/// Failure modes for building a [`crate::Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The requested dimensionality is invalid.
    Vocab(VocabError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Vocab(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<VocabError> for SessionError {
    fn from(e: VocabError) -> Self {
        SessionError::Vocab(e)
    }
}

/// Alias for `std::result::Result<T, SessionError>`.
pub type SessionResult<T> = std::result::Result<T, SessionError>;
