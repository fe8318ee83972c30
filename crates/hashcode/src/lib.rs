//! Hashcode - deterministic structural hashing
//!
//! Computes a 64-bit fingerprint from a value's content: equal values hash
//! equal across runs and processes, maps hash the same whatever order their
//! entries come in, and records mix in their type name. Use it for
//! value-keyed caches, deduplication and change detection. It is not a
//! cryptographic hash.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use hashcode::prelude::*;
//!
//! #[derive(Hashcode)]
//! pub struct Job {
//!     pub name: String,
//!     pub args: Vec<String>,
//!     pub env: HashMap<String, String>,
//!     #[hashcode(skip)]
//!     pub attempts: u32,
//! }
//!
//! let mut job = Job {
//!     name: "build".into(),
//!     args: vec!["--release".into()],
//!     env: HashMap::new(),
//!     attempts: 0,
//! };
//! let before = hashcode(&job);
//! job.attempts += 1;
//! assert_eq!(hashcode(&job), before);
//!
//! assert_eq!(hashcode(&123), 3813);
//! assert_eq!(hashcode("Hello"), 2358303207);
//! ```
//!
//! A type overrides the default algorithm by implementing [`Hashcode`] by
//! hand. Dynamic data goes through [`Value`], optionally with a configured
//! [`StructuralHasher`]; its strict mode, depth limit and cycle check apply
//! to derived records and containers as well.

// Generated code refers to `::hashcode`, which must also resolve here.
extern crate self as hashcode;

pub use hashcode_core::{
    hashcode, try_hashcode, Combiner, Field, HashContext, HashError, Hashcode, KeyText, Record,
    StructuralHasher, Value, ValueKind,
};

pub use hashcode_config::{ConfigError, HashConfig};

#[cfg(feature = "derive")]
pub use hashcode_macros::Hashcode;

/// Mixing constants and primitive hash helpers.
pub mod combine {
    pub use hashcode_core::combine::*;
}

/// Internal types for macro-generated code. Do not use directly.
#[doc(hidden)]
pub mod __internal {
    pub use hashcode_core::combine::Combiner;
    pub use hashcode_core::engine::{traverse, HashContext, StructuralHasher};
    pub use hashcode_core::error::Result;
    pub use hashcode_core::value::ValueKind;
}

pub mod prelude {
    pub use super::{hashcode, Combiner, Hashcode, Record, Value};
}
