//! Single-frame type mismatch: key subscript on a JSON null.

use std::hint::black_box;

use serde_json::Value;

pub const KEY: &str = "key";
pub const SIGNATURE: &str = "cannot subscript JSON null";
pub const FRAMES: &[&str] = &["subscript_null"];

/// Scenario entry point.
#[inline(never)]
pub fn subscript_null() {
    let value = Value::Null;
    let Value::Object(fields) = &value else {
        panic!(
            "cannot subscript JSON {} with key {:?}",
            json_type(&value),
            KEY
        );
    };
    black_box(fields.get(KEY));
}

pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
