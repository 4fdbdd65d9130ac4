//! Runtime value types

use super::super::errors::ErrorInfo;
use super::super::stdlib::StdlibFunc;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Val {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    List(Vec<Val>),
    Obj(HashMap<String, Val>),
    NativeFunc(StdlibFunc),
    /// Error value with code and message
    Error(ErrorInfo),
}

impl Val {
    /// Check if value is truthy (for conditionals)
    ///
    /// `null`, `false`, `0`, `NaN` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Val::Null => false,
            Val::Bool(b) => *b,
            Val::Num(n) => *n != 0.0 && !n.is_nan(),
            Val::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Name of the value's type, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Val::Null => "null",
            Val::Bool(_) => "boolean",
            Val::Num(_) => "number",
            Val::Str(_) => "string",
            Val::List(_) => "list",
            Val::Obj(_) => "object",
            Val::NativeFunc(_) => "function",
            Val::Error(_) => "error",
        }
    }

    /// String conversion used when a value is written into the output
    pub fn to_display_string(&self) -> String {
        match self {
            Val::Null => "null".to_string(),
            Val::Bool(b) => b.to_string(),
            Val::Num(n) => format_number(*n),
            Val::Str(s) => s.clone(),
            Val::List(_) | Val::Obj(_) => self.to_json().to_string(),
            Val::NativeFunc(func) => format!("[function {}]", func.name()),
            Val::Error(err) => err.message.clone(),
        }
    }

    /// Convert to a JSON value
    pub fn to_json(&self) -> JsonValue {
        match self {
            Val::Null => JsonValue::Null,
            Val::Bool(b) => JsonValue::Bool(*b),
            Val::Num(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    JsonValue::from(*n as i64)
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(JsonValue::Number)
                        .unwrap_or(JsonValue::Null)
                }
            }
            Val::Str(s) => JsonValue::String(s.clone()),
            Val::List(items) => JsonValue::Array(items.iter().map(Val::to_json).collect()),
            Val::Obj(map) => {
                // Sorted keys keep output stable across runs
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                let obj = keys
                    .into_iter()
                    .map(|k| (k.clone(), map[k].to_json()))
                    .collect::<serde_json::Map<_, _>>();
                JsonValue::Object(obj)
            }
            Val::NativeFunc(func) => JsonValue::String(format!("[function {}]", func.name())),
            Val::Error(err) => serde_json::json!({
                "code": err.code,
                "message": err.message,
            }),
        }
    }

    /// Convert from a JSON value
    pub fn from_json(value: &JsonValue) -> Val {
        match value {
            JsonValue::Null => Val::Null,
            JsonValue::Bool(b) => Val::Bool(*b),
            JsonValue::Number(n) => Val::Num(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Val::Str(s.clone()),
            JsonValue::Array(items) => Val::List(items.iter().map(Val::from_json).collect()),
            JsonValue::Object(map) => Val::Obj(
                map.iter()
                    .map(|(k, v)| (k.clone(), Val::from_json(v)))
                    .collect(),
            ),
        }
    }
}

/// Format a number the way script output expects: integers without a
/// fractional part, everything else in shortest round-trip form.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n.fract() == 0.0 {
        if n == 0.0 {
            // Covers -0
            "0".to_string()
        } else {
            format!("{:.0}", n)
        }
    } else {
        format!("{}", n)
    }
}
