use serde_yaml_ng::{Mapping, Sequence, Value};

/// Look up `key` in `value` if it is a mapping.
pub fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_mapping().and_then(|m| m.get(key))
}

/// Look up `key` in `value` and return it only if it is itself a mapping.
pub fn lookup_mapping<'a>(value: &'a Value, key: &str) -> Option<&'a Mapping> {
    lookup(value, key).and_then(Value::as_mapping)
}

/// Look up `key` in `value` and return it only if it is a sequence.
pub fn lookup_sequence<'a>(value: &'a Value, key: &str) -> Option<&'a Sequence> {
    lookup(value, key).and_then(Value::as_sequence)
}

/// Absent, `null` and `false` are falsy. Everything else is truthy,
/// including `0` and the empty string.
pub fn truthy(value: Option<&Value>) -> bool {
    !matches!(value, None | Some(Value::Null) | Some(Value::Bool(false)))
}

/// Look up `key` and keep it only if it is truthy.
pub fn lookup_truthy<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    lookup(value, key).filter(|v| truthy(Some(*v)))
}

/// Render a node as plain text.
///
/// Strings are returned verbatim, numbers and booleans in their canonical
/// form, `null` as the empty string. Sequences and mappings fall back to
/// compact JSON.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => display_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_json::to_string(value)
            .unwrap_or_else(|_| serde_yaml_ng::to_string(value).unwrap_or_default()),
    }
}

/// Like [`display_text`], but compound values are pretty-printed.
pub fn display_block(value: &Value) -> String {
    match value {
        Value::Sequence(_) | Value::Mapping(_) => serde_json::to_string_pretty(value)
            .unwrap_or_else(|_| display_text(value)),
        other => display_text(other),
    }
}

/// [`display_text`] of an optional node with surrounding whitespace removed.
pub fn trimmed_text(value: Option<&Value>) -> String {
    value
        .map(|v| display_text(v).trim().to_string())
        .unwrap_or_default()
}

/// Text of the first candidate that is truthy and non-empty once rendered.
pub fn first_text<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a Value>>,
{
    candidates
        .into_iter()
        .flatten()
        .filter(|v| truthy(Some(*v)))
        .map(display_text)
        .find(|text| !text.is_empty())
}

/// Last non-empty `/`-separated segment of a reference string.
pub fn last_segment(reference: &str) -> &str {
    reference
        .split('/')
        .filter(|s| !s.is_empty())
        .next_back()
        .unwrap_or("")
}
