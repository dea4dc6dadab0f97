//! Typed argument values and raw-value coercion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    Integer,
    Float,
    Boolean,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved, typed value.
///
/// `Null` is the value of an optional option that received no input and has
/// no default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ArgValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Integers widen to floats; nothing else converts.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Float(n) => Some(*n),
            ArgValue::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Name of the stored kind, used in type-mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ArgValue::Null => "null",
            ArgValue::Bool(_) => "boolean",
            ArgValue::Int(_) => "integer",
            ArgValue::Float(_) => "float",
            ArgValue::Str(_) => "string",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ArgValue::Null => serde_json::Value::Null,
            ArgValue::Bool(b) => serde_json::Value::Bool(*b),
            ArgValue::Int(n) => serde_json::Value::from(*n),
            ArgValue::Float(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            ArgValue::Str(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Null => f.write_str("null"),
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Int(n) => write!(f, "{}", n),
            ArgValue::Float(n) => write!(f, "{}", n),
            ArgValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        ArgValue::Int(n)
    }
}

impl From<i32> for ArgValue {
    fn from(n: i32) -> Self {
        ArgValue::Int(n as i64)
    }
}

impl From<f64> for ArgValue {
    fn from(n: f64) -> Self {
        ArgValue::Float(n)
    }
}

/// A value as it arrived from an input source, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Text from the command line, the environment, or a string in a mapping.
    Text(String),
    /// A non-string scalar from a JSON/YAML mapping.
    Json(serde_json::Value),
}

impl RawValue {
    /// Render for error messages.
    pub fn display(&self) -> String {
        match self {
            RawValue::Text(s) => s.clone(),
            RawValue::Json(v) => v.to_string(),
        }
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::String(s) => RawValue::Text(s),
            other => RawValue::Json(other),
        }
    }
}

/// Coerce a raw value into `ty`. `None` means the value does not fit the type.
pub(crate) fn coerce(raw: &RawValue, ty: ValueType) -> Option<ArgValue> {
    match raw {
        RawValue::Text(s) => coerce_text(s, ty),
        RawValue::Json(v) => coerce_json(v, ty),
    }
}

fn coerce_text(s: &str, ty: ValueType) -> Option<ArgValue> {
    let trimmed = s.trim();
    match ty {
        ValueType::String => Some(ArgValue::Str(s.to_string())),
        ValueType::Integer => trimmed.parse::<i64>().ok().map(ArgValue::Int),
        ValueType::Float => trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(ArgValue::Float),
        ValueType::Boolean => parse_bool(trimmed).map(ArgValue::Bool),
    }
}

fn coerce_json(v: &serde_json::Value, ty: ValueType) -> Option<ArgValue> {
    use serde_json::Value;
    match (ty, v) {
        (ValueType::String, Value::Number(n)) => Some(ArgValue::Str(n.to_string())),
        (ValueType::String, Value::Bool(b)) => Some(ArgValue::Str(b.to_string())),
        (ValueType::Integer, Value::Number(n)) => n.as_i64().map(ArgValue::Int),
        (ValueType::Float, Value::Number(n)) => n.as_f64().map(ArgValue::Float),
        (ValueType::Boolean, Value::Bool(b)) => Some(ArgValue::Bool(*b)),
        (_, Value::String(s)) => coerce_text(s, ty),
        _ => None,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Coerce a declared value (default or choice) into `ty`.
pub(crate) fn coerce_declared(value: &ArgValue, ty: ValueType) -> Option<ArgValue> {
    match (value, ty) {
        (ArgValue::Str(s), ValueType::String) => Some(ArgValue::Str(s.clone())),
        (ArgValue::Int(n), ValueType::Integer) => Some(ArgValue::Int(*n)),
        (ArgValue::Int(n), ValueType::Float) => Some(ArgValue::Float(*n as f64)),
        (ArgValue::Float(n), ValueType::Float) if n.is_finite() => Some(ArgValue::Float(*n)),
        (ArgValue::Bool(b), ValueType::Boolean) => Some(ArgValue::Bool(*b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_coercion() {
        let t = |s: &str| RawValue::Text(s.to_string());
        assert_eq!(coerce(&t(" 42 "), ValueType::Integer), Some(ArgValue::Int(42)));
        assert_eq!(coerce(&t("4.5"), ValueType::Float), Some(ArgValue::Float(4.5)));
        assert_eq!(coerce(&t("Yes"), ValueType::Boolean), Some(ArgValue::Bool(true)));
        assert_eq!(coerce(&t("off"), ValueType::Boolean), Some(ArgValue::Bool(false)));
        assert_eq!(coerce(&t("not-a-number"), ValueType::Integer), None);
        assert_eq!(coerce(&t("NaN"), ValueType::Float), None);
        assert_eq!(coerce(&t("maybe"), ValueType::Boolean), None);
    }

    #[test]
    fn json_coercion() {
        assert_eq!(
            coerce(&RawValue::from(json!(500)), ValueType::Integer),
            Some(ArgValue::Int(500))
        );
        assert_eq!(
            coerce(&RawValue::from(json!(1.5)), ValueType::Integer),
            None
        );
        assert_eq!(
            coerce(&RawValue::from(json!(7)), ValueType::String),
            Some(ArgValue::Str("7".to_string()))
        );
        assert_eq!(coerce(&RawValue::from(json!([1, 2])), ValueType::String), None);
        assert_eq!(
            coerce(&RawValue::from(json!("true")), ValueType::Boolean),
            Some(ArgValue::Bool(true))
        );
    }

    #[test]
    fn declared_values_must_match_type() {
        assert!(coerce_declared(&ArgValue::from("x"), ValueType::Integer).is_none());
        assert_eq!(
            coerce_declared(&ArgValue::from(3), ValueType::Float),
            Some(ArgValue::Float(3.0))
        );
        assert!(coerce_declared(&ArgValue::Float(f64::INFINITY), ValueType::Float).is_none());
    }
}
