//! The tagged value tree produced by the parser.
//!
//! A [`Value`] is one of six kinds. The kind is fixed when the value is
//! built; every typed accessor checks it and reports
//! [`Error::TypeMismatch`] instead of coercing.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Object storage: unique keys, insertion order preserved.
pub type Map = IndexMap<String, Value>;

static NULL: Value = Value::Null;

/// A parsed document node.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Uninitialized or explicit `null`.
    #[default]
    Null,

    /// `true` or `false`.
    Bool(bool),

    /// Decimal number decoded to a double.
    Number(f64),

    /// Raw string contents, no escape processing.
    String(String),

    /// Key/value mapping; the last write for a key wins.
    Object(Map),

    /// Append-only ordered sequence.
    Array(Vec<Value>),
}

/// The tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Object,
    Array,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// An empty object.
    pub fn object() -> Self {
        Value::Object(Map::new())
    }

    /// An empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn mismatch(&self, expected: ValueKind) -> Error {
        Error::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// Index into an object by key, creating the entry as `Null` if absent.
    ///
    /// The returned reference can be overwritten in place; there is no
    /// separate insert/update signal.
    pub fn field_mut(&mut self, key: &str) -> Result<&mut Value> {
        match self {
            Value::Object(map) => {
                if let Some(index) = map.get_index_of(key) {
                    return Ok(&mut map[index]);
                }
                Ok(map.entry(key.to_owned()).or_default())
            }
            other => Err(other.mismatch(ValueKind::Object)),
        }
    }

    /// Read-only object lookup. An absent key reads as `Null`.
    pub fn field(&self, key: &str) -> Result<&Value> {
        match self {
            Value::Object(map) => Ok(map.get(key).unwrap_or(&NULL)),
            other => Err(other.mismatch(ValueKind::Object)),
        }
    }

    pub fn as_object(&self) -> Result<&Map> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(other.mismatch(ValueKind::Object)),
        }
    }

    pub fn as_array(&self) -> Result<&[Value]> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch(ValueKind::Array)),
        }
    }

    /// Mutable view of an array, for appending.
    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch(ValueKind::Array)),
        }
    }

    /// Typed scalar extraction.
    ///
    /// ```
    /// use haversine_core::Value;
    ///
    /// let v = Value::from(2.5);
    /// assert_eq!(v.get::<f64>().unwrap(), 2.5);
    /// assert!(v.get::<bool>().is_err());
    /// ```
    pub fn get<'a, T: Scalar<'a>>(&'a self) -> Result<T> {
        T::extract(self).ok_or_else(|| self.mismatch(T::KIND))
    }
}

/// Scalar types that can be pulled out of a [`Value`] with [`Value::get`].
pub trait Scalar<'a>: Sized {
    const KIND: ValueKind;

    fn extract(value: &'a Value) -> Option<Self>;
}

impl<'a> Scalar<'a> for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn extract(value: &'a Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl<'a> Scalar<'a> for f64 {
    const KIND: ValueKind = ValueKind::Number;

    fn extract(value: &'a Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl<'a> Scalar<'a> for &'a str {
    const KIND: ValueKind = ValueKind::String;

    fn extract(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl<'a> Scalar<'a> for String {
    const KIND: ValueKind = ValueKind::String;

    fn extract(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}
