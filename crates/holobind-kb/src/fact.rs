//! A single persisted `(vector, metadata, name?)` entry.

use holobind_encode::Metadata;
use holobind_geometry::BitVector;

/// One fact in the knowledge base.
///
/// `metadata` is the authoritative, exact view the prover matches
/// against; `vector` is the approximate view used for similarity search
/// and folded into the knowledge base's rolling bundle. A fact is never
/// mutated or removed once appended — the KB is append-only for the
/// session's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    /// The statement's encoded vector.
    pub vector: BitVector,
    /// The operator and name-flattened arguments, for exact lookup.
    pub metadata: Metadata,
    /// The `@a:id` persistence name this fact was learned under, if any.
    pub name: Option<String>,
}

impl Fact {
    /// Builds a fact from its encoded parts.
    pub fn new(vector: BitVector, metadata: Metadata, name: Option<String>) -> Self {
        Self {
            vector,
            metadata,
            name,
        }
    }
}
