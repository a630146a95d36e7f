//! # holobind-geometry
//!
//! Fixed-width, bit-packed vectors — the storage substrate for the whole
//! Holobind reasoning engine.
//!
//! This crate knows nothing about symbols, statements, or proofs. It
//! provides exactly one type, [`BitVector`], and the handful of
//! word-level operations (`xor`, `and`, `or`, `not`, `popcount`) that
//! every higher crate builds on. No allocation happens outside of
//! construction and the operations that must produce a fresh vector.
//!
//! # Design Principles
//!
//! This crate has no knowledge of hyperdimensional algebra (bind/bundle/
//! similarity live in `holobind-algebra`) and no I/O. It is the geometric
//! floor everything else stands on.

mod bitvector;
mod error;

pub use bitvector::{validate_geometry, BitVector};
pub use error::{GeometryError, GeometryResult};
