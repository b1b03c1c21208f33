//! Discriminated-union flattening.
//!
//! A property carrying both `oneOf` and `discriminator` is a tagged union over
//! definitions. The form renders every variant's fields side by side, so each
//! variant property (except the discriminator itself) becomes a sibling of the
//! union property, pointing back at the variant through a `$ref` that the
//! reference resolver expands later.

use serde_json::{json, Map, Value};

use crate::resolver::{escape_segment, unescape_segment};

/// Flatten discriminated `oneOf` properties inside `definitions`.
///
/// Injected properties land immediately after the union property, in variant
/// order and then in each variant's own property order. The union property
/// keeps every key except `oneOf`. Entries without a `#/definitions/<Name>`
/// reference, and variants that do not exist, are skipped.
///
/// A name shared with another property keeps its first position and takes the
/// last value written: a later sibling overrides the injected `$ref`, while an
/// injected `$ref` replaces an earlier sibling.
pub fn resolve_one_of(schema: &Value, default_field: &str) -> Value {
    let Some(root) = schema.as_object() else {
        return schema.clone();
    };
    let Some(definitions) = root.get("definitions").and_then(Value::as_object) else {
        return schema.clone();
    };

    // Definitions are rewritten in order, and later definitions see the
    // already-expanded properties of earlier ones.
    let mut working = definitions.clone();
    let names: Vec<String> = working.keys().cloned().collect();
    for name in &names {
        let expanded = match working.get(name).and_then(|def| def.get("properties")) {
            Some(Value::Object(props)) => expand_properties(props, &working, default_field),
            _ => continue,
        };
        if let Some(Value::Object(def)) = working.get_mut(name) {
            def.insert("properties".to_string(), Value::Object(expanded));
        }
    }

    let mut result = root.clone();
    result.insert("definitions".to_string(), Value::Object(working));
    Value::Object(result)
}

fn expand_properties(
    props: &Map<String, Value>,
    definitions: &Map<String, Value>,
    default_field: &str,
) -> Map<String, Value> {
    let mut result = Map::new();

    for (prop_name, prop) in props {
        result.insert(prop_name.clone(), prop.clone());

        let Some(prop_map) = prop.as_object() else {
            continue;
        };
        let (Some(one_of), Some(discriminator)) =
            (prop_map.get("oneOf"), prop_map.get("discriminator"))
        else {
            continue;
        };
        let field = discriminator_field(discriminator, default_field);

        for entry in one_of.as_array().into_iter().flatten() {
            let Some((segment, variant)) = variant_of(entry) else {
                tracing::warn!(property = %prop_name, "skipping oneOf entry without a definitions $ref");
                continue;
            };
            let Some(variant_props) = definitions
                .get(&variant)
                .and_then(|def| def.get("properties"))
                .and_then(Value::as_object)
            else {
                tracing::trace!(variant = %variant, "oneOf variant has no properties");
                continue;
            };

            for sub_name in variant_props.keys() {
                if sub_name == field {
                    continue;
                }
                let reference = format!(
                    "#/definitions/{}/properties/{}",
                    segment,
                    escape_segment(sub_name)
                );
                tracing::trace!(property = %sub_name, %reference, "injecting variant property");
                result.insert(sub_name.clone(), json!({ "$ref": reference }));
            }
        }

        let cleaned: Map<String, Value> = prop_map
            .iter()
            .filter(|(key, _)| key.as_str() != "oneOf")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        result.insert(prop_name.clone(), Value::Object(cleaned));
    }

    result
}

/// Name of the field that selects the variant.
///
/// A string discriminator names it directly, an object discriminator through
/// `propertyName`.
fn discriminator_field<'a>(discriminator: &'a Value, default_field: &'a str) -> &'a str {
    match discriminator {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map
            .get("propertyName")
            .and_then(Value::as_str)
            .unwrap_or(default_field),
        _ => default_field,
    }
}

/// Returns the raw path segment and the definition name of a
/// `{"$ref": "#/definitions/<Name>"}` entry.
fn variant_of(entry: &Value) -> Option<(String, String)> {
    let reference = entry.get("$ref")?.as_str()?;
    let parts: Vec<&str> = reference.split('/').collect();
    match parts.as_slice() {
        ["#", "definitions", name] => Some((name.to_string(), unescape_segment(name))),
        _ => None,
    }
}
