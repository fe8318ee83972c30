//! The `Hashcode` capability and the map-key ordering hook.

use std::borrow::Cow;

use crate::engine::{HashContext, StructuralHasher};
use crate::error::Result;

/// A type that produces a structural 64-bit hash.
///
/// The core crate implements this for primitives and std containers with
/// the default rules. Records get it from `#[derive(Hashcode)]`. Writing the
/// impl by hand is how a type overrides the default algorithm: the engine
/// calls it and uses the result verbatim.
///
/// Composites and indirections also implement [`Hashcode::hashcode_in`], so
/// that a [`StructuralHasher`] reaches every nested value with its own
/// settings and traversal state. A hand-written override that only
/// implements `hashcode` is a leaf to the engine.
///
/// Hashes are stable across runs and processes. They are not suitable for
/// security purposes.
pub trait Hashcode {
    /// Returns the structural hash of `self`.
    fn hashcode(&self) -> u64;

    /// Hashes `self` as part of a traversal driven by `hasher`.
    ///
    /// Implementations recurse through [`StructuralHasher::child`] and wrap
    /// each nesting level in [`StructuralHasher::enter`].
    fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
        let _ = (hasher, ctx);
        Ok(self.hashcode())
    }
}

/// Computes the structural hash of `value`.
///
/// ```
/// use hashcode_core::hashcode;
///
/// assert_eq!(hashcode(&123), 3813);
/// assert_eq!(hashcode("Hello"), 2358303207);
/// assert_eq!(hashcode(&vec![1, 2, 3]), 240343);
/// assert_eq!(hashcode(&None::<i32>), 0);
/// ```
#[inline]
pub fn hashcode<T: Hashcode + ?Sized>(value: &T) -> u64 {
    value.hashcode()
}

/// Textual form of a map key or set element.
///
/// Unordered containers fold their entries sorted by this text, compared
/// byte-wise, so the hash never depends on enumeration order.
pub trait KeyText {
    fn key_text(&self) -> Cow<'_, str>;
}

impl<T: Hashcode + ?Sized> Hashcode for &T {
    #[inline]
    fn hashcode(&self) -> u64 {
        (**self).hashcode()
    }

    fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
        (**self).hashcode_in(hasher, ctx)
    }
}

impl<T: Hashcode + ?Sized> Hashcode for &mut T {
    #[inline]
    fn hashcode(&self) -> u64 {
        (**self).hashcode()
    }

    fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
        (**self).hashcode_in(hasher, ctx)
    }
}

impl<T: KeyText + ?Sized> KeyText for &T {
    fn key_text(&self) -> Cow<'_, str> {
        (**self).key_text()
    }
}
