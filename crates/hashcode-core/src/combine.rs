//! The mixing law shared by every composite.
//!
//! All composites start from [`SEED`] and fold each child hash as
//! `acc = 31 * acc + child` in wrapping `u64` arithmetic. Records add the
//! sequence hash of their type name to the seed before folding fields.

use crate::engine::{HashContext, StructuralHasher};
use crate::error::Result;
use crate::traits::Hashcode;

/// Initial accumulator of every composite.
pub const SEED: u64 = 7;

/// Multiplier of the polynomial mixing step.
pub const PRIME: u64 = 31;

/// Hash of `true`.
pub const TRUE_HASH: u64 = 1231;

/// Hash of `false`.
pub const FALSE_HASH: u64 = 1237;

/// Hash of an absent value.
pub const ABSENT_HASH: u64 = 0;

/// Folds one child hash into an accumulator.
#[inline]
pub const fn mix(acc: u64, child: u64) -> u64 {
    acc.wrapping_mul(PRIME).wrapping_add(child)
}

/// Hash of an integer already normalized to `u64`.
#[inline]
pub const fn int_hash(value: u64) -> u64 {
    PRIME.wrapping_mul(value)
}

/// Hash of a float, taken from its IEEE-754 bit pattern.
#[inline]
pub fn float_hash(value: f64) -> u64 {
    int_hash(value.to_bits())
}

/// Hash of a byte string: the sequence of its byte values.
pub fn bytes_hash(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(SEED, |acc, &b| mix(acc, int_hash(u64::from(b))))
}

/// Seed of a record named `type_name`.
#[inline]
pub fn record_seed(type_name: &str) -> u64 {
    SEED.wrapping_add(bytes_hash(type_name.as_bytes()))
}

/// Running accumulator for composite hashes.
///
/// Used by `#[derive(Hashcode)]` and by manual implementations that want
/// the default record or sequence shape over a hand-picked field list.
///
/// ```
/// use hashcode_core::{Combiner, Hashcode};
///
/// struct Point {
///     x: i32,
///     y: i32,
///     label: String,
/// }
///
/// impl Hashcode for Point {
///     fn hashcode(&self) -> u64 {
///         // `label` is cosmetic and stays out of the hash
///         Combiner::record("Point").field(&self.x).field(&self.y).finish()
///     }
/// }
///
/// let a = Point { x: 1, y: 2, label: "a".into() };
/// let b = Point { x: 1, y: 2, label: "b".into() };
/// assert_eq!(a.hashcode(), b.hashcode());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combiner {
    acc: u64,
}

impl Combiner {
    /// Starts an ordered sequence.
    pub const fn sequence() -> Self {
        Self { acc: SEED }
    }

    /// Starts a record, mixing the type name into the seed.
    pub fn record(type_name: &str) -> Self {
        Self {
            acc: record_seed(type_name),
        }
    }

    /// Folds a precomputed child hash.
    #[inline]
    pub fn mix(mut self, child: u64) -> Self {
        self.acc = mix(self.acc, child);
        self
    }

    /// Folds the hash of `value`.
    #[inline]
    pub fn field<T: Hashcode + ?Sized>(self, value: &T) -> Self {
        self.mix(value.hashcode())
    }

    /// Folds the hash of `value` as a nested part of `hasher`'s traversal.
    #[inline]
    pub fn field_in<T: Hashcode + ?Sized>(
        self,
        value: &T,
        hasher: &StructuralHasher,
        ctx: &mut HashContext,
    ) -> Result<Self> {
        Ok(self.mix(hasher.child(value, ctx)?))
    }

    /// In-place variant of [`Combiner::mix`] for loops.
    #[inline]
    pub fn push(&mut self, child: u64) {
        self.acc = mix(self.acc, child);
    }

    /// Returns the accumulated hash.
    #[inline]
    pub fn finish(self) -> u64 {
        self.acc
    }
}

impl Default for Combiner {
    fn default() -> Self {
        Self::sequence()
    }
}

/// Folds an iterator of child hashes as an ordered sequence.
pub fn sequence_hash<I>(children: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    children.into_iter().fold(SEED, mix)
}
