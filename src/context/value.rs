use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Dynamically typed payload of a store cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Json(Value),
}

/// The shape of a [`ContextValue`], used for schema checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Text,
    Json,
}

impl ContextValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ContextValue::Bool(_) => ValueKind::Bool,
            ContextValue::Int(_) => ValueKind::Int,
            ContextValue::Float(_) => ValueKind::Float,
            ContextValue::Text(_) => ValueKind::Text,
            ContextValue::Json(_) => ValueKind::Json,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ContextValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ContextValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ContextValue::Float(value) => Some(*value),
            ContextValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ContextValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Whether a value of this kind may replace a value of `declared` kind.
    ///
    /// Integers are accepted where floats are declared, since a whole-number
    /// float loses its fraction on the wire.
    pub fn fits(&self, declared: ValueKind) -> bool {
        let kind = self.kind();
        kind == declared || (kind == ValueKind::Int && declared == ValueKind::Float)
    }

    /// Reinterprets a value read back from JSON as the `declared` kind.
    ///
    /// Untagged JSON cannot tell a scalar held in a `Json` field from a plain
    /// scalar, and a non-finite float is written as `null`. Values that
    /// already fit are returned unchanged, as are values no reading can fix.
    pub fn coerce_to(self, declared: ValueKind) -> ContextValue {
        if self.fits(declared) {
            return self;
        }
        match (declared, self) {
            (ValueKind::Json, value) => ContextValue::Json(value.into_json()),
            (ValueKind::Float, ContextValue::Json(Value::Null)) => ContextValue::Float(f64::NAN),
            (_, value) => value,
        }
    }

    /// The plain JSON form of this value.
    pub fn into_json(self) -> Value {
        match self {
            ContextValue::Bool(flag) => Value::Bool(flag),
            ContextValue::Int(int) => Value::from(int),
            ContextValue::Float(float) => Number::from_f64(float).map_or(Value::Null, Value::Number),
            ContextValue::Text(text) => Value::String(text),
            ContextValue::Json(value) => value,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Json => "json",
        };
        f.write_str(name)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Int(value)
    }
}

impl From<i32> for ContextValue {
    fn from(value: i32) -> Self {
        ContextValue::Int(i64::from(value))
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        ContextValue::Float(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::Text(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::Text(value)
    }
}

impl From<Value> for ContextValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(flag) => ContextValue::Bool(flag),
            Value::String(text) => ContextValue::Text(text),
            Value::Number(number) => match number.as_i64() {
                Some(int) => ContextValue::Int(int),
                None => number
                    .as_f64()
                    .map(ContextValue::Float)
                    .unwrap_or(ContextValue::Json(Value::Number(number))),
            },
            other => ContextValue::Json(other),
        }
    }
}
