//! Keyword renaming and relocation into the `parameters` bucket.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::types::json_type_name;

/// Rename keys at every depth according to `mapping`.
///
/// When two keys of one object rename to the same target, the one visited
/// last wins and the target keeps the position of the first.
pub fn rename_keys(schema: &Value, mapping: &BTreeMap<String, String>) -> Value {
    match schema {
        Value::Object(map) => {
            let mut result = Map::new();
            for (key, value) in map {
                let new_key = mapping.get(key).unwrap_or(key);
                result.insert(new_key.clone(), rename_keys(value, mapping));
            }
            Value::Object(result)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(|v| rename_keys(v, mapping)).collect()),
        other => other.clone(),
    }
}

/// Move each of `keys` found on an object into its `bucket` object.
///
/// The bucket is created at the end of the object when absent. Relocated
/// values and the bucket itself are not visited again. An object whose
/// bucket key holds a non-object keeps its keys where they are.
pub fn move_to_parameters(schema: &Value, keys: &[String], bucket: &str) -> Value {
    match schema {
        Value::Object(map) => relocate_object(map, keys, bucket),
        Value::Array(arr) => Value::Array(
            arr.iter()
                .map(|v| move_to_parameters(v, keys, bucket))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn relocate_object(map: &Map<String, Value>, keys: &[String], bucket: &str) -> Value {
    let mut moved = Map::new();
    match map.get(bucket) {
        Some(existing) if !existing.is_object() => {
            tracing::warn!(
                bucket,
                actual = json_type_name(existing),
                "bucket is not an object, leaving keys in place"
            );
        }
        _ => {
            for key in keys {
                if let Some(value) = map.get(key) {
                    moved.insert(key.clone(), value.clone());
                }
            }
        }
    }

    let mut result = Map::new();
    for (key, value) in map {
        if moved.contains_key(key) {
            continue;
        }
        if key == bucket {
            result.insert(key.clone(), value.clone());
        } else {
            result.insert(key.clone(), move_to_parameters(value, keys, bucket));
        }
    }

    if !moved.is_empty() {
        tracing::trace!(count = moved.len(), "relocating keys into {}", bucket);
        let mut params = match result.get(bucket) {
            Some(Value::Object(existing)) => existing.clone(),
            _ => Map::new(),
        };
        for (key, value) in moved {
            params.insert(key, value);
        }
        result.insert(bucket.to_string(), Value::Object(params));
    }

    Value::Object(result)
}
