//! Shared YAML/JSON parsing infrastructure.
//!
//! Everything the toolkit reads (source documents, rule sets, OSCAL files)
//! ends up as a `serde_json::Value`, so downstream code pattern-matches on a
//! single tagged union. YAML is parsed with `serde_yaml` and then converted:
//! tags are stripped, non-string mapping keys are stringified, and integral
//! floats collapse to integers.
//!
//! Mapping order is preserved end to end (`serde_json` is built with
//! `preserve_order`), so rule sets evaluate in the order they were written.

use std::path::Path;

use serde_json::{Number, Value};

use crate::error::DocumentError;

/// Parse YAML text into a `serde_json::Value`.
pub fn parse_yaml_str(text: &str) -> Result<Value, serde_yaml::Error> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
    Ok(yaml_to_json_value(yaml))
}

/// Load a YAML file and return it as a `serde_json::Value`.
pub fn load_yaml_as_value(path: &Path) -> Result<Value, DocumentError> {
    let content = read_document(path)?;
    parse_yaml_str(&content).map_err(|e| DocumentError::YamlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a JSON file and return it as a `serde_json::Value`.
pub fn load_json_value(path: &Path) -> Result<Value, DocumentError> {
    let content = read_document(path)?;
    serde_json::from_str(&content).map_err(|e| DocumentError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read_document(path: &Path) -> Result<String, DocumentError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DocumentError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DocumentError::Read {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Non-finite floats (`.nan`, `.inf`) have no JSON number form and are
/// carried as their string rendering.
pub fn yaml_to_json_value(yaml: serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number_to_json(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Value::Array(seq.into_iter().map(yaml_to_json_value).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let mut obj = serde_json::Map::new();
            for (k, v) in map {
                obj.insert(yaml_key_to_string(k), yaml_to_json_value(v));
            }
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(tagged.value),
    }
}

fn yaml_number_to_json(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        return Value::Number(Number::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Value::Number(Number::from(u));
    }
    match n.as_f64() {
        Some(f)
            if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 =>
        {
            Value::Number(Number::from(f as i64))
        }
        Some(f) => Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(n.to_string())),
        None => Value::String(n.to_string()),
    }
}

fn yaml_key_to_string(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        other => match yaml_to_json_value(other) {
            Value::String(s) => s,
            converted => converted.to_string(),
        },
    }
}
