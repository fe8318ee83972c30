//! Structural traversal.
//!
//! [`StructuralHasher`] drives every hash that goes through
//! [`Hashcode::hashcode_in`]: dynamic [`Value`]s, std containers, smart
//! pointers and derived records. It dispatches on shape, threads one
//! [`HashContext`] through the whole call, and applies its [`HashConfig`]
//! at every level, including values nested inside derived types and
//! [`Value::Custom`]. References resolve before anything else, so an absent
//! reference is 0 even when the pointee would carry an override.
//!
//! In lenient mode (the default) the walk is total: unsupported shapes,
//! subtrees past the depth limit and reference cycles hash to 0. Strict mode
//! reports them as [`HashError`] instead.

#[cfg(test)]
mod tests;

use hashcode_config::{ConfigError, HashConfig};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::collections::{fold_unordered, EntryBuf, UnorderedEntry};
use crate::combine::{bytes_hash, float_hash, int_hash, Combiner, ABSENT_HASH, FALSE_HASH, TRUE_HASH};
use crate::error::{HashError, Result};
use crate::function::signature_hash;
use crate::traits::{Hashcode, KeyText};
use crate::value::{Record, Value, ValueKind};

/// Per-call traversal state.
///
/// Created fresh for every top-level call and threaded through the
/// recursion; nothing is shared between calls. Tracks the nesting depth and
/// the shared allocations currently being hashed, so a reference back into
/// one of them is recognized as a cycle.
#[derive(Debug, Clone, Default)]
pub struct HashContext {
    depth: usize,
    active: SmallVec<[usize; 8]>,
}

impl HashContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of composites and references entered so far.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Structural hash engine.
///
/// ```
/// use hashcode_core::{StructuralHasher, Value};
///
/// let hasher = StructuralHasher::new();
/// assert_eq!(hasher.hash(&Value::from(123)).unwrap(), 3813);
/// assert_eq!(hasher.hash(&vec![1, 2, 3]).unwrap(), 240343);
/// assert_eq!(hasher.hash(&Value::Unsupported("chan int".into())).unwrap(), 0);
///
/// let strict = StructuralHasher::strict();
/// assert!(strict.hash(&Value::Unsupported("chan int".into())).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StructuralHasher {
    config: HashConfig,
}

impl StructuralHasher {
    /// Lenient, unbounded engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unbounded engine that reports unsupported shapes and cycles as errors.
    pub fn strict() -> Self {
        Self {
            config: HashConfig::new().with_strict(true),
        }
    }

    /// Engine with the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for settings the engine cannot
    /// honor, such as a depth limit of zero.
    pub fn with_config(config: HashConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Hashes `value` with a fresh context.
    ///
    /// Never fails unless the engine is strict.
    pub fn hash<T: Hashcode + ?Sized>(&self, value: &T) -> Result<u64> {
        value.hashcode_in(self, &mut HashContext::new())
    }

    /// Hashes `value`, degrading any strict-mode error to 0.
    pub fn hash_lossy<T: Hashcode + ?Sized>(&self, value: &T) -> u64 {
        self.hash(value).unwrap_or(ABSENT_HASH)
    }

    /// Hashes a value nested inside the one being hashed.
    #[inline]
    pub fn child<T: Hashcode + ?Sized>(&self, value: &T, ctx: &mut HashContext) -> Result<u64> {
        value.hashcode_in(self, ctx)
    }

    /// Enters one level of nesting, enforcing the depth limit.
    pub fn enter<F>(&self, kind: ValueKind, ctx: &mut HashContext, f: F) -> Result<u64>
    where
        F: FnOnce(&mut HashContext) -> Result<u64>,
    {
        if let Some(limit) = self.config.max_depth {
            if ctx.depth >= limit {
                if self.config.strict {
                    return Err(HashError::DepthExceeded { limit, kind });
                }
                warn!(
                    event = "depth_exceeded",
                    limit,
                    kind = %kind,
                    "nesting past depth limit, hashing subtree as 0"
                );
                return Ok(ABSENT_HASH);
            }
        }
        ctx.depth += 1;
        let hash = f(ctx);
        ctx.depth -= 1;
        hash
    }

    /// Enters the shared allocation at `address`.
    ///
    /// An allocation that is already being hashed further up is a cycle.
    pub fn enter_shared<F>(&self, address: *const (), ctx: &mut HashContext, f: F) -> Result<u64>
    where
        F: FnOnce(&mut HashContext) -> Result<u64>,
    {
        let address = address as usize;
        if ctx.active.contains(&address) {
            if self.config.strict {
                return Err(HashError::Cycle { depth: ctx.depth });
            }
            warn!(
                event = "reference_cycle",
                depth = ctx.depth,
                "reference cycle, hashing the back reference as 0"
            );
            return Ok(ABSENT_HASH);
        }
        ctx.active.push(address);
        let hash = self.enter(ValueKind::Reference, ctx, f);
        ctx.active.pop();
        hash
    }

    fn walk(&self, value: &Value, ctx: &mut HashContext) -> Result<u64> {
        match value {
            Value::Null => Ok(ABSENT_HASH),
            Value::Custom(custom) => self.child(&**custom, ctx),
            Value::Bool(true) => Ok(TRUE_HASH),
            Value::Bool(false) => Ok(FALSE_HASH),
            Value::Int(i) => Ok(int_hash(*i as u64)),
            Value::Uint(u) => Ok(int_hash(*u)),
            Value::Float(x) => Ok(float_hash(*x)),
            Value::Str(s) => Ok(bytes_hash(s.as_bytes())),
            Value::Bytes(b) => Ok(bytes_hash(b)),
            Value::Function(signature) => Ok(signature_hash(signature)),
            Value::Ref(None) => Ok(ABSENT_HASH),
            Value::Ref(Some(target)) => {
                self.enter(value.kind(), ctx, |ctx| self.walk(target, ctx))
            }
            Value::List(items) => self.enter(value.kind(), ctx, |ctx| {
                let mut combiner = Combiner::sequence();
                for item in items {
                    combiner.push(self.walk(item, ctx)?);
                }
                Ok(combiner.finish())
            }),
            Value::Map(entries) => self.enter(value.kind(), ctx, |ctx| {
                let mut buf = EntryBuf::with_capacity(entries.len());
                for (k, v) in entries {
                    buf.push(UnorderedEntry {
                        text: k.key_text(),
                        key: self.walk(k, ctx)?,
                        value: Some(self.walk(v, ctx)?),
                    });
                }
                Ok(fold_unordered(buf))
            }),
            Value::Record(record) => {
                self.enter(value.kind(), ctx, |ctx| self.record(record, ctx))
            }
            Value::Unsupported(description) => self.unsupported(description),
        }
    }

    fn record(&self, record: &Record, ctx: &mut HashContext) -> Result<u64> {
        trace!(
            event = "record",
            name = record.name(),
            fields = record.fields().len(),
            depth = ctx.depth()
        );
        let mut combiner = Combiner::record(record.name());
        for field in record.hashed_fields() {
            combiner.push(self.walk(&field.value, ctx)?);
        }
        Ok(combiner.finish())
    }

    fn unsupported(&self, description: &str) -> Result<u64> {
        if self.config.strict {
            return Err(HashError::Unsupported {
                kind: ValueKind::Unsupported,
                description: description.to_string(),
            });
        }
        debug!(
            event = "unsupported_shape",
            description,
            "unsupported shape hashed to 0"
        );
        Ok(ABSENT_HASH)
    }
}

/// Hashes `value` with the lenient, unbounded engine.
///
/// Structural implementations route their `hashcode` through this, so the
/// static path gets the same cycle handling as a configured engine.
#[inline]
pub fn traverse<T: Hashcode + ?Sized>(value: &T) -> u64 {
    StructuralHasher::new().hash_lossy(value)
}

/// Lenient, unbounded traversal.
impl Hashcode for Value {
    fn hashcode(&self) -> u64 {
        traverse(self)
    }

    fn hashcode_in(&self, hasher: &StructuralHasher, ctx: &mut HashContext) -> Result<u64> {
        hasher.walk(self, ctx)
    }
}

/// Hashes `value` with the strict engine.
///
/// ```
/// use hashcode_core::{try_hashcode, Value};
///
/// assert_eq!(try_hashcode(&Value::from("Hello")), Ok(2358303207));
/// assert!(try_hashcode(&Value::Unsupported("socket".into())).is_err());
/// ```
pub fn try_hashcode<T: Hashcode + ?Sized>(value: &T) -> Result<u64> {
    StructuralHasher::strict().hash(value)
}
