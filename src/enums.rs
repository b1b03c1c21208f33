//! Enum-to-options conversion.
//!
//! Turns every closed value set (`"enum": [...]`) into the form client's
//! option list: `"options": [{"name": "Active", "value": "active"}, ...]`.

use serde_json::{json, Map, Value};

/// Replace every `enum` keyword in the tree with an `options` list.
///
/// Option names are the trimmed, title-cased value. Non-string members are
/// named after their JSON text. An existing `options` key keeps its position
/// and is overwritten; otherwise `options` is appended after the other keys.
pub fn convert_enums_to_options(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => convert_object(map),
        Value::Array(arr) => Value::Array(arr.iter().map(convert_enums_to_options).collect()),
        other => other.clone(),
    }
}

fn convert_object(map: &Map<String, Value>) -> Value {
    let options = map.get("enum").and_then(Value::as_array).map(|values| {
        Value::Array(
            values
                .iter()
                .map(|value| json!({ "name": option_name(value), "value": value }))
                .collect(),
        )
    });

    let mut result = Map::new();
    for (key, value) in map {
        if key == "enum" && options.is_some() {
            continue;
        }
        result.insert(key.clone(), convert_enums_to_options(value));
    }

    if let Some(options) = options {
        tracing::trace!("converted enum to options");
        result.insert("options".to_string(), options);
    }

    Value::Object(result)
}

fn option_name(value: &Value) -> String {
    match value {
        Value::String(s) => title_case(s.trim()),
        other => title_case(&other.to_string()),
    }
}

/// Title-case a string: a cased letter is mapped to its titlecase form when
/// it starts a word and lowercased otherwise. Any character that is not a
/// cased letter ends the current word, so `"hello_world"` becomes
/// `"Hello_World"` and `"straße"` becomes `"Straße"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if in_word {
            out.extend(ch.to_lowercase());
        } else {
            push_titlecase(&mut out, ch);
        }
        in_word = is_cased(ch);
    }
    out
}

/// Titlecase differs from uppercase for digraphs, ligatures, `ß` and the
/// Greek letters with ypogegrammeni. Everything else titlecases to its
/// uppercase form.
fn push_titlecase(out: &mut String, ch: char) {
    let special = match ch {
        'ß' => "Ss",
        '\u{FB00}' => "Ff",
        '\u{FB01}' => "Fi",
        '\u{FB02}' => "Fl",
        '\u{FB03}' => "Ffi",
        '\u{FB04}' => "Ffl",
        '\u{FB05}' | '\u{FB06}' => "St",
        _ => "",
    };
    if !special.is_empty() {
        out.push_str(special);
        return;
    }

    let mapped = match ch {
        '\u{01C4}'..='\u{01C6}' => Some('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => Some('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => Some('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => Some('\u{01F2}'),
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            char::from_u32(ch as u32 + 8)
        }
        '\u{1F88}'..='\u{1F8F}' | '\u{1F98}'..='\u{1F9F}' | '\u{1FA8}'..='\u{1FAF}' => Some(ch),
        '\u{1FB3}' | '\u{1FBC}' => Some('\u{1FBC}'),
        '\u{1FC3}' | '\u{1FCC}' => Some('\u{1FCC}'),
        '\u{1FF3}' | '\u{1FFC}' => Some('\u{1FFC}'),
        _ => None,
    };
    match mapped {
        Some(title) => out.push(title),
        None => out.extend(ch.to_uppercase()),
    }
}

/// Upper, lower, or titlecase letter.
fn is_cased(ch: char) -> bool {
    ch.is_lowercase() || ch.is_uppercase() || is_titlecase(ch)
}

fn is_titlecase(ch: char) -> bool {
    matches!(
        ch,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}
