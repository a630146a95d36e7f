//! Partial-vector query answering: hole decode via topK lookup against a
//! knowledge base's fact list.
//!
//! Like `holobind-encode`, this crate is pure — it never touches a
//! filesystem or a clock. It grows the vocabulary and position-code cache
//! it's given, since a query is allowed to mention a name the knowledge
//! base has never seen (it just won't match anything).

mod error;
mod outcome;
mod query;

pub use error::{QueryError, QueryResult};
pub use outcome::{Alternative, Binding, QueryOutcome, ResultRow};
pub use query::{QueryEngine, MAX_HOLES, SIMILARITY_THRESHOLD};
