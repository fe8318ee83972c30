//! Conversions into `Value`.

use std::collections::{BTreeMap, HashMap};

use super::{Record, Value};

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_signed {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i as i64)
                }
            }
        )+
    };
}

macro_rules! from_unsigned {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(u: $t) -> Self {
                    Value::Uint(u as u64)
                }
            }
        )+
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Uint(u64::from(c as u32))
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

/// `None` becomes an absent reference.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        Value::Ref(opt.map(|v| Box::new(v.into())))
    }
}

impl<K, V, S> From<HashMap<K, V, S>> for Value
where
    K: Into<Value>,
    V: Into<Value>,
{
    fn from(m: HashMap<K, V, S>) -> Self {
        Value::map(m)
    }
}

impl<K, V> From<BTreeMap<K, V>> for Value
where
    K: Into<Value>,
    V: Into<Value>,
{
    fn from(m: BTreeMap<K, V>) -> Self {
        Value::map(m)
    }
}

/// JSON numbers keep their integer form when they have one. Objects become
/// maps with text keys.
#[cfg(feature = "json")]
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::list(items),
            Json::Object(fields) => Value::map(fields),
        }
    }
}
