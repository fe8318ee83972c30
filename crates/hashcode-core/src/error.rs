//! Error types for strict hashing

use thiserror::Error;

use crate::value::ValueKind;

/// Errors surfaced by [`StructuralHasher`](crate::StructuralHasher) in strict
/// mode. The lenient engine never returns them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// The value has no meaningful structural hash.
    #[error("Unsupported shape: {kind} ({description})")]
    Unsupported {
        kind: ValueKind,
        description: String,
    },

    /// Nesting went past the configured depth limit.
    #[error("Depth limit of {limit} exceeded at {kind}")]
    DepthExceeded { limit: usize, kind: ValueKind },

    /// A shared reference points back into a value still being hashed.
    #[error("Reference cycle at depth {depth}")]
    Cycle { depth: usize },
}

/// Result type alias for strict hashing
pub type Result<T> = std::result::Result<T, HashError>;
