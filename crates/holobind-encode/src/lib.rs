//! Surface syntax parsing and AST-to-`BitVector` encoding.
//!
//! This crate is intentionally IO-free: `Load`/`Unload` directives resolve
//! through the [`TheoryLoader`] trait rather than touching the filesystem
//! directly, so the encoder can be exercised with nothing but in-memory
//! fixtures.

mod ast;
mod condition;
mod encoder;
mod error;
mod lexer;
mod metadata;
mod parser;
mod scope;
mod theory_loader;

pub use ast::{Argument, Literal, Span, Statement};
pub use condition::{ConditionPart, RuleCandidate};
pub use encoder::Encoder;
pub use error::{EncodeError, EncodeResult};
pub use metadata::Metadata;
pub use parser::parse_source;
pub use scope::Scope;
pub use theory_loader::{InMemoryLoader, TheoryLoader};
