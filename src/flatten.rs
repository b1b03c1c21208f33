//! Structural flattening: collapsing container keys and promoting wrappers.

use serde_json::{Map, Value};

/// Which side wins when a flattened child shares a name with a parent key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precedence {
    /// Parent keys overwrite child entries of the same name.
    #[default]
    Parent,
    /// Child entries overwrite parent keys of the same name.
    Child,
}

/// Collapse `key` (e.g. `properties` or `items`) into its parent object.
///
/// Wherever `key` holds an object, the parent is replaced by the union of that
/// object's entries (each flattened recursively) and the parent's remaining
/// keys (copied as-is). The winning side keeps the position of the first
/// occurrence: with [`Precedence::Parent`] child entries come first, with
/// [`Precedence::Child`] parent keys come first.
pub fn flatten_properties(schema: &Value, key: &str, precedence: Precedence) -> Value {
    match schema {
        Value::Object(map) => match map.get(key) {
            Some(Value::Object(inner)) => merge_up(map, inner, key, precedence),
            _ => {
                let mut result = Map::new();
                for (k, v) in map {
                    result.insert(k.clone(), flatten_properties(v, key, precedence));
                }
                Value::Object(result)
            }
        },
        Value::Array(arr) => Value::Array(
            arr.iter()
                .map(|v| flatten_properties(v, key, precedence))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn merge_up(
    parent: &Map<String, Value>,
    inner: &Map<String, Value>,
    key: &str,
    precedence: Precedence,
) -> Value {
    let children = inner
        .iter()
        .map(|(k, v)| (k.clone(), flatten_properties(v, key, precedence)));
    let meta = parent
        .iter()
        .filter(|(k, _)| k.as_str() != key)
        .map(|(k, v)| (k.clone(), v.clone()));

    let mut result = Map::new();
    match precedence {
        Precedence::Parent => {
            result.extend(children);
            result.extend(meta);
        }
        Precedence::Child => {
            result.extend(meta);
            result.extend(children);
        }
    }
    Value::Object(result)
}

/// Splice the entries of every `key` wrapper object into its parent.
///
/// The wrapper's entries take the wrapper's position, in their own order; the
/// wrapper key itself is dropped even when it does not hold an object. Spliced
/// values are copied as-is.
pub fn promote_key(schema: &Value, key: &str) -> Value {
    match schema {
        Value::Object(map) => {
            let mut result = Map::new();
            for (k, v) in map {
                if k != key {
                    result.insert(k.clone(), promote_key(v, key));
                    continue;
                }
                match v {
                    Value::Object(inner) => {
                        for (inner_key, inner_value) in inner {
                            result.insert(inner_key.clone(), inner_value.clone());
                        }
                    }
                    _ => tracing::trace!("dropping non-object {}", key),
                }
            }
            Value::Object(result)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(|v| promote_key(v, key)).collect()),
        other => other.clone(),
    }
}
