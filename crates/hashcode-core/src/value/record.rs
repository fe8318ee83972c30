//! Named-field records built at runtime.

use super::Value;

/// A record with a type name and fields in declaration order.
///
/// ```
/// use hashcode_core::{Record, Value};
///
/// let user = Record::new("User")
///     .field("id", 7)
///     .field("name", "ada")
///     .private_field("cache", Value::Null)
///     .excluded_field("updated_at", 1_700_000_000_i64);
///
/// assert_eq!(user.hashed_fields().count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record {
    name: String,
    fields: Vec<Field>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a public field.
    pub fn field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_field(Field::public(name, value))
    }

    /// Appends a non-public field, which never contributes to the hash.
    pub fn private_field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_field(Field::private(name, value))
    }

    /// Appends a public field that is excluded from hashing.
    pub fn excluded_field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_field(Field::public(name, value).excluded())
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// The record's type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All fields, in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Fields that contribute to the hash, in declaration order.
    pub fn hashed_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_hashed())
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }
}

/// A record field and its inclusion policy.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub value: Value,
    pub public: bool,
    pub excluded: bool,
}

impl Field {
    pub fn public(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            public: true,
            excluded: false,
        }
    }

    pub fn private(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            public: false,
            ..Self::public(name, value)
        }
    }

    /// Marks the field as excluded from hashing.
    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    /// A field contributes when it is public and not excluded.
    pub fn is_hashed(&self) -> bool {
        self.public && !self.excluded
    }
}
