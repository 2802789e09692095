// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Core value type produced by expression evaluation

use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;


/// Result of evaluating an expression node
///
/// Exactly one variant is active. Values are immutable once constructed and carry
/// no reference back to the node that produced them.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionResult {
    /// Absence of a value
    Null,

    /// Boolean value
    Boolean(bool),

    /// Integer value (64-bit signed)
    Integer(i64),

    /// Double precision value
    Double(f64),

    /// String value
    String(String),

    /// Ordered sequence of JSON values
    Array(Vec<Value>),

    /// Mapping of names to JSON values
    Object(Map<String, Value>),
}

impl ExpressionResult {
    /// Convert a JSON value into a result.
    ///
    /// Numbers that fit in an `i64` become [`ExpressionResult::Integer`], all other
    /// numbers become [`ExpressionResult::Double`].
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items),
            Value::Object(map) => Self::Object(map),
        }
    }

    /// JSON view of this value
    pub fn as_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Boolean(b) => Value::Bool(*b),
            Self::Integer(i) => Value::Number((*i).into()),
            Self::Double(d) => Number::from_f64(*d)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(format_double(*d))),
            Self::String(s) => Value::String(s.clone()),
            Self::Array(items) => Value::Array(items.clone()),
            Self::Object(map) => Value::Object(map.clone()),
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if the value is a boolean
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    /// Check if the value is an integer
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }

    /// Check if the value is a double
    pub fn is_double(&self) -> bool {
        matches!(self, Self::Double(_))
    }

    /// Integer or double; no other variant is numeric
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Double(_))
    }

    /// Check if the value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Check if the value is an array
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Check if the value is an object
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Check if the value is a JSON primitive (boolean, number or string)
    pub fn is_json_primitive(&self) -> bool {
        matches!(
            self,
            Self::Boolean(_) | Self::Integer(_) | Self::Double(_) | Self::String(_)
        )
    }

    /// Borrow the string payload
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric payload promoted to a double
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Boolean coercion.
    ///
    /// Strings are `true` only when they read `"true"` ignoring case, numbers are
    /// `true` when non-zero. Arrays, objects and null have no boolean reading.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            Self::String(s) => Some(s.eq_ignore_ascii_case("true")),
            Self::Integer(i) => Some(*i != 0),
            Self::Double(d) => Some(*d != 0.0 && !d.is_nan()),
            Self::Null | Self::Array(_) | Self::Object(_) => None,
        }
    }

    /// Textual representation of the value
    pub fn as_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Boolean(_) => "Boolean",
            Self::Integer(_) => "Integer",
            Self::Double(_) => "Double",
            Self::String(_) => "String",
            Self::Array(_) => "Array",
            Self::Object(_) => "Object",
        }
    }
}

/// Render a double the way configuration authors expect to read it back:
/// integral values keep a trailing `.0`, non-finite values are spelled out.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

impl fmt::Display for ExpressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Double(d) => write!(f, "{}", format_double(*d)),
            Self::String(s) => write!(f, "{s}"),
            Self::Array(_) | Self::Object(_) => write!(f, "{}", self.as_json()),
        }
    }
}

impl Serialize for ExpressionResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_json().serialize(serializer)
    }
}

impl From<bool> for ExpressionResult {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for ExpressionResult {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<i64> for ExpressionResult {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ExpressionResult {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<String> for ExpressionResult {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for ExpressionResult {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Vec<Value>> for ExpressionResult {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<Map<String, Value>> for ExpressionResult {
    fn from(value: Map<String, Value>) -> Self {
        Self::Object(value)
    }
}

impl From<Value> for ExpressionResult {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}
