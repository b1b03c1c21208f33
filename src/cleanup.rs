//! Final cleanup of the top one or two levels of the form schema.
//!
//! These passes never descend further than the per-field records.

use serde_json::{Map, Value};

/// Remove `key` from the top-level object.
pub fn remove_outer_key(schema: &Value, key: &str) -> Value {
    retain_outer(schema, |k, _| k != key)
}

/// Drop every top-level entry whose value is not an object.
pub fn remove_outer_non_objects(schema: &Value) -> Value {
    retain_outer(schema, |_, v| v.is_object())
}

/// Restrict every top-level object entry to the `allowed` keys.
///
/// Non-object entries are left unchanged. Running this twice is the same as
/// running it once.
pub fn filter_field_keys(schema: &Value, allowed: &[String]) -> Value {
    let Value::Object(map) = schema else {
        return schema.clone();
    };

    let result = map
        .iter()
        .map(|(name, field)| {
            let filtered = match field {
                Value::Object(record) => Value::Object(
                    record
                        .iter()
                        .filter(|(k, _)| allowed.iter().any(|a| a == *k))
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                ),
                other => other.clone(),
            };
            (name.clone(), filtered)
        })
        .collect::<Map<String, Value>>();

    Value::Object(result)
}

fn retain_outer(schema: &Value, keep: impl Fn(&str, &Value) -> bool) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(k, v)| keep(k, v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_ALLOWED_KEYS;
    use serde_json::json;

    fn allowed(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn remove_outer_key_top_level_only() {
        let schema = json!({
            "key1": "value1",
            "key_to_remove": "value3",
            "nested": { "key_to_remove": 1 }
        });
        let result = remove_outer_key(&schema, "key_to_remove");
        assert_eq!(
            result,
            json!({ "key1": "value1", "nested": { "key_to_remove": 1 } })
        );
    }

    #[test]
    fn remove_outer_key_non_object_input() {
        assert_eq!(remove_outer_key(&json!("test"), "key"), json!("test"));
    }

    #[test]
    fn non_objects_dropped() {
        let schema = json!({
            "object1": { "type": "object" },
            "string1": "test",
            "number1": 42,
            "array1": [1, 2, 3],
            "null1": null,
            "object2": { "type": "string" }
        });
        let result = remove_outer_non_objects(&schema);
        let keys: Vec<&String> = result.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["object1", "object2"]);
    }

    #[test]
    fn non_objects_non_object_input() {
        assert_eq!(remove_outer_non_objects(&json!([1])), json!([1]));
    }

    #[test]
    fn filter_keeps_allowed_only() {
        let schema = json!({
            "object1": {
                "type": "object",
                "description": "test",
                "extra_field": "should_be_removed"
            },
            "string1": "test"
        });
        let result = filter_field_keys(&schema, &allowed(&["type", "description"]));
        assert_eq!(
            result,
            json!({
                "object1": { "type": "object", "description": "test" },
                "string1": "test"
            })
        );
    }

    #[test]
    fn filter_does_not_descend() {
        let schema = json!({
            "field": { "parameters": { "extra": 1 }, "type": "x" }
        });
        let allowed: Vec<String> = DEFAULT_ALLOWED_KEYS.iter().map(|k| k.to_string()).collect();
        let result = filter_field_keys(&schema, &allowed);
        assert_eq!(result, json!({ "field": { "parameters": { "extra": 1 } } }));
    }

    #[test]
    fn filter_is_idempotent() {
        let schema = json!({
            "a": { "name": "A", "junk": true, "when": {} },
            "b": { "x": 1 },
            "c": 3
        });
        let allowed = allowed(&["name", "when"]);
        let once = filter_field_keys(&schema, &allowed);
        let twice = filter_field_keys(&once, &allowed);
        assert_eq!(once, twice);
    }
}
