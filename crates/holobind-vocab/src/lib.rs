//! The vocabulary: a `name -> BitVector` interning table shared by every
//! higher layer of the reasoning engine.

mod error;
mod reserved;
mod vocab;

pub use error::{VocabError, VocabResult};
pub use reserved::{hole_name, position_name, EMPTY_LIST_NAME, RESERVED_OPERATORS};
pub use vocab::Vocabulary;
