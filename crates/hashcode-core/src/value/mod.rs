//! Dynamically shaped values.
//!
//! `Value` covers data whose shape is only known at runtime: decoded JSON,
//! script values, heterogeneous maps. Statically typed data should implement
//! [`Hashcode`] directly; a `Value` can embed such data through
//! [`Value::Custom`].

mod convert;
mod record;


use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::traits::{Hashcode, KeyText};

pub use record::{Field, Record};

/// A value whose shape is inspected at hash time.
#[derive(Clone, Default)]
pub enum Value {
    /// No value. Hashes to 0.
    #[default]
    Null,
    Bool(bool),
    /// Signed integer of any width, sign-extended.
    Int(i64),
    /// Unsigned integer of any width.
    Uint(u64),
    /// Floating point value, widened to double precision.
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Key-value entries in arbitrary order.
    Map(Vec<(Value, Value)>),
    /// Named-field record.
    Record(Record),
    /// A function value, described by its signature text.
    Function(String),
    /// Optional reference. `Ref(None)` is absent.
    Ref(Option<Box<Value>>),
    /// A value that supplies its own hash.
    Custom(Arc<dyn Hashcode + Send + Sync>),
    /// A value with no meaningful structural hash, such as a channel or a
    /// raw handle. The string describes it.
    Unsupported(String),
}

impl Value {
    /// Wraps a value that overrides the default algorithm.
    pub fn custom<T>(value: T) -> Self
    where
        T: Hashcode + Send + Sync + 'static,
    {
        Value::Custom(Arc::new(value))
    }

    /// Wraps `value` in a present reference.
    pub fn reference(value: impl Into<Value>) -> Self {
        Value::Ref(Some(Box::new(value.into())))
    }

    /// An absent reference.
    pub const fn null_ref() -> Self {
        Value::Ref(None)
    }

    /// Builds a map from key-value pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a list from items.
    pub fn list<T, I>(items: I) -> Self
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns the shape category.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) | Value::Uint(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) | Value::Bytes(_) => ValueKind::Text,
            Value::List(_) => ValueKind::Sequence,
            Value::Map(_) => ValueKind::Mapping,
            Value::Record(_) => ValueKind::Record,
            Value::Function(_) => ValueKind::Function,
            Value::Ref(_) => ValueKind::Reference,
            Value::Custom(_) => ValueKind::Custom,
            Value::Unsupported(_) => ValueKind::Unsupported,
        }
    }

    /// Returns true for `Null` and absent references.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Null | Value::Ref(None))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Value::Record(r) => f.debug_tuple("Record").field(r).finish(),
            Value::Function(sig) => f.debug_tuple("Function").field(sig).finish(),
            Value::Ref(target) => f.debug_tuple("Ref").field(target).finish(),
            Value::Custom(c) => f
                .debug_tuple("Custom")
                .field(&format_args!("hashcode={}", c.hashcode()))
                .finish(),
            Value::Unsupported(desc) => f.debug_tuple("Unsupported").field(desc).finish(),
        }
    }
}

/// Text used to order map keys. Scalars render as their display form,
/// composites as a bracketed kind name.
impl KeyText for Value {
    fn key_text(&self) -> Cow<'_, str> {
        match self {
            Value::Null | Value::Ref(None) => Cow::Borrowed(""),
            Value::Bool(b) => b.key_text(),
            Value::Int(i) => i.key_text(),
            Value::Uint(u) => u.key_text(),
            Value::Float(x) => x.key_text(),
            Value::Str(s) => Cow::Borrowed(s.as_str()),
            Value::Bytes(b) => String::from_utf8_lossy(b),
            Value::Function(sig) => Cow::Borrowed(sig.as_str()),
            Value::Ref(Some(target)) => target.key_text(),
            Value::Record(r) => Cow::Owned(format!("<{}>", r.name())),
            other => Cow::Owned(format!("<{}>", other.kind())),
        }
    }
}

/// Shape categories recognized by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    Text,
    Sequence,
    Mapping,
    Record,
    Function,
    Reference,
    Custom,
    Unsupported,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
            ValueKind::Record => "record",
            ValueKind::Function => "function",
            ValueKind::Reference => "reference",
            ValueKind::Custom => "custom",
            ValueKind::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
