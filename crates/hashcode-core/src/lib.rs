//! Hashcode Core - deterministic structural hashing
//!
//! This crate provides the building blocks of the structural hash:
//! - The `Hashcode` trait and its implementations for primitives and std containers
//! - The `Combiner` used by derived and hand-written record hashes
//! - The dynamic `Value` type and the `StructuralHasher` that walks it
//!
//! Hashes are deterministic across runs and independent of map enumeration
//! order. They are not cryptographic.

pub mod combine;
pub mod engine;
pub mod error;
pub mod function;
pub mod traits;
pub mod value;

mod collections;
mod indirection;
mod primitive;

#[cfg(test)]
mod test_utils;

pub use combine::{Combiner, FALSE_HASH, PRIME, SEED, TRUE_HASH};
pub use engine::{try_hashcode, HashContext, StructuralHasher};
pub use error::{HashError, Result};
pub use hashcode_config::HashConfig;
pub use traits::{hashcode, Hashcode, KeyText};
pub use value::{Field, Record, Value, ValueKind};
