//! The session façade: owns the vocabulary, scope, knowledge base, and
//! rule set, and exposes `learn` / `query` / `prove` / `decode` /
//! `summarize` / `elaborate` / `getReasoningStats` over them.
//!
//! This is the only crate in the workspace that touches a filesystem (to
//! resolve `Load "path"` directives) — everything below it stays pure and
//! is tested with in-memory fixtures.

mod decode;
mod error;
mod learn;
mod loader;
mod narrate;
mod session;
mod stats;

pub use decode::{decode, DecodeOutcome, DecodedArgument};
pub use error::{SessionError, SessionResult};
pub use learn::LearnOutcome;
pub use loader::FilesystemLoader;
pub use narrate::{DefaultNarrator, NarrativeGenerator};
pub use session::{Session, DEFAULT_DIMENSIONS};
pub use stats::{ReasoningStats, StatsSnapshot};

// Re-exported so callers don't need a direct dependency on every crate in
// the stack just to build a theory loader or read a proof's step log.
pub use holobind_encode::{InMemoryLoader, TheoryLoader};
pub use holobind_proof::{ProofOutcome, ProveOptions};
pub use holobind_query::QueryOutcome;
