//! Reference resolution - inlines `#/definitions/...` pointers.

use serde_json::{Map, Value};

use crate::error::TranslateError;

const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Resolve every `$ref` in the schema against its `definitions`.
///
/// Returns a copy of the schema with `definitions` removed and every reference
/// node replaced by its (recursively resolved) target, overlaid with the
/// reference node's own sibling keys. Sibling keys win on conflict.
///
/// # Errors
///
/// - `TranslateError::UnsupportedRef` if a `$ref` does not start with `#/definitions/`
/// - `TranslateError::DefinitionNotFound` if the named definition is absent
/// - `TranslateError::InvalidRefPath` if a trailing segment does not exist or the
///   target is not an object
/// - `TranslateError::CircularRef` if a reference is reached again while expanding itself
pub fn resolve_refs(schema: &Value) -> Result<Value, TranslateError> {
    let empty = Map::new();
    let definitions = schema
        .get("definitions")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let working = match schema {
        Value::Object(root) => Value::Object(
            root.iter()
                .filter(|(key, _)| key.as_str() != "definitions")
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    };

    let mut resolver = RefResolver {
        definitions,
        expanding: Vec::new(),
    };
    resolver.resolve_value(&working)
}

/// Look up a `$ref` path in a definitions table without resolving the target.
///
/// # Errors
///
/// Same taxonomy as [`resolve_refs`], minus cycle detection.
pub fn lookup_ref<'a>(
    definitions: &'a Map<String, Value>,
    reference: &str,
) -> Result<&'a Value, TranslateError> {
    let Some(path) = reference.strip_prefix(DEFINITIONS_PREFIX) else {
        return Err(TranslateError::UnsupportedRef {
            reference: reference.to_string(),
        });
    };

    let mut segments = path.split('/');
    let name = unescape_segment(segments.next().unwrap_or_default());
    let mut current = definitions
        .get(&name)
        .ok_or(TranslateError::DefinitionNotFound { name })?;

    for segment in segments {
        current = current
            .as_object()
            .and_then(|map| map.get(&unescape_segment(segment)))
            .ok_or_else(|| TranslateError::InvalidRefPath {
                reference: reference.to_string(),
            })?;
    }

    Ok(current)
}

/// Decode a JSON Pointer segment (`~1` = `/`, `~0` = `~`).
pub(crate) fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Encode a key as a JSON Pointer segment.
pub(crate) fn escape_segment(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

// --- Internal implementation ---

struct RefResolver<'a> {
    /// Snapshot of the input's definitions; never rewritten.
    definitions: &'a Map<String, Value>,
    /// References currently being expanded, innermost last.
    expanding: Vec<String>,
}

impl<'a> RefResolver<'a> {
    fn resolve_value(&mut self, value: &Value) -> Result<Value, TranslateError> {
        match value {
            Value::Object(map) => self.resolve_object(map),
            Value::Array(arr) => self.resolve_array(arr),
            // Primitives pass through unchanged
            other => Ok(other.clone()),
        }
    }

    fn resolve_object(&mut self, map: &Map<String, Value>) -> Result<Value, TranslateError> {
        let Some(reference) = map.get("$ref") else {
            let mut result = Map::new();
            for (key, value) in map {
                result.insert(key.clone(), self.resolve_value(value)?);
            }
            return Ok(Value::Object(result));
        };

        let reference = match reference {
            Value::String(s) => s.as_str(),
            other => {
                return Err(TranslateError::UnsupportedRef {
                    reference: other.to_string(),
                })
            }
        };

        let target = lookup_ref(self.definitions, reference)?;
        if self.expanding.iter().any(|r| r == reference) {
            return Err(TranslateError::CircularRef {
                reference: reference.to_string(),
            });
        }

        tracing::trace!(%reference, depth = self.expanding.len(), "expanding $ref");
        self.expanding.push(reference.to_string());
        let resolved = self.resolve_value(target);
        self.expanding.pop();

        let Value::Object(mut merged) = resolved? else {
            return Err(TranslateError::InvalidRefPath {
                reference: reference.to_string(),
            });
        };

        // Local overrides win over the referent
        for (key, value) in map {
            if key != "$ref" {
                merged.insert(key.clone(), self.resolve_value(value)?);
            }
        }

        Ok(Value::Object(merged))
    }

    fn resolve_array(&mut self, arr: &[Value]) -> Result<Value, TranslateError> {
        let mut result = Vec::with_capacity(arr.len());
        for item in arr {
            result.push(self.resolve_value(item)?);
        }
        Ok(Value::Array(result))
    }
}
