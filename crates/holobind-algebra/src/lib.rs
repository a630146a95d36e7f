//! Deterministic stamping and the bind/bundle/similarity algebra that give
//! binary hyperdimensional vectors their holographic reasoning properties.

mod algebra;
mod error;
mod position;
mod stamp;

pub use algebra::{bind, bundle, similarity, top_k, unbind, ScoredAtom};
pub use error::{AlgebraError, AlgebraResult};
pub use position::{PositionCodes, MAX_POSITIONS};
pub use stamp::stamp;

pub use holobind_geometry::BitVector;
