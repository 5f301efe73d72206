use serde_yaml_ng::Value;

use crate::value::{display_text, last_segment, lookup, lookup_truthy};

/// Composition keywords, in the order they are consulted.
const COMPOSITIONS: [&str; 3] = ["oneOf", "anyOf", "allOf"];

/// Produce a short one-line summary of a schema node.
///
/// Returns an empty string when nothing useful can be said.
pub fn schema_label(schema: &Value) -> String {
    if !schema.is_mapping() {
        return String::new();
    }

    if let Some(reference) = lookup_truthy(schema, "$ref") {
        return format!("ref: {}", last_segment(&display_text(reference)));
    }

    for keyword in COMPOSITIONS {
        if let Some(variants) = lookup_truthy(schema, keyword) {
            let labels: Vec<String> = variants
                .as_sequence()
                .map(|seq| seq.iter().map(schema_label).filter(|l| !l.is_empty()).collect())
                .unwrap_or_default();
            return if labels.is_empty() {
                keyword.to_string()
            } else {
                format!("{keyword}: {}", labels.join(", "))
            };
        }
    }

    let Some(ty) = lookup_truthy(schema, "type") else {
        return String::new();
    };

    match ty.as_str() {
        Some("array") => {
            let item = lookup(schema, "items").map(schema_label).unwrap_or_default();
            if item.is_empty() {
                "array".to_string()
            } else {
                format!("array of {item}")
            }
        }
        Some("object") => match lookup(schema, "properties").and_then(Value::as_mapping) {
            Some(props) if !props.is_empty() => {
                let names: Vec<String> = props.keys().map(display_text).collect();
                format!("object{{{}}}", names.join(", "))
            }
            _ => "object".to_string(),
        },
        Some(other) => other.to_string(),
        None => match ty.as_sequence() {
            Some(types) => types.iter().map(display_text).collect::<Vec<_>>().join(" | "),
            None => display_text(ty),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(src: &str) -> String {
        schema_label(&serde_yaml_ng::from_str(src).unwrap())
    }

    #[test]
    fn test_non_mapping() {
        assert_eq!(label("string"), "");
        assert_eq!(label("[1, 2]"), "");
        assert_eq!(label("null"), "");
    }

    #[test]
    fn test_ref() {
        assert_eq!(label(r##"{"$ref": "#/components/schemas/Widget"}"##), "ref: Widget");
        assert_eq!(
            label(r##"{"$ref": "#/components/schemas/Widget", type: object}"##),
            "ref: Widget"
        );
    }

    #[test]
    fn test_compositions() {
        assert_eq!(
            label("{oneOf: [{type: string}, {type: integer}]}"),
            "oneOf: string, integer"
        );
        assert_eq!(label("{anyOf: [{}, {description: x}]}"), "anyOf");
        assert_eq!(
            label(r##"{allOf: [{"$ref": "#/components/schemas/Base"}, {}]}"##),
            "allOf: ref: Base"
        );
        assert_eq!(
            label("{anyOf: [{type: string}], oneOf: [{type: integer}]}"),
            "oneOf: integer"
        );
    }

    #[test]
    fn test_arrays() {
        assert_eq!(label("{type: array, items: {type: string}}"), "array of string");
        assert_eq!(label("{type: array}"), "array");
        assert_eq!(
            label("{type: array, items: {type: array, items: {type: integer}}}"),
            "array of array of integer"
        );
    }

    #[test]
    fn test_objects() {
        assert_eq!(label("{type: object, properties: {a: {}, b: {}}}"), "object{a, b}");
        assert_eq!(label("{type: object, properties: {}}"), "object");
        assert_eq!(label("{type: object}"), "object");
    }

    #[test]
    fn test_plain_and_missing_type() {
        assert_eq!(label("{type: string, format: date-time}"), "string");
        assert_eq!(label("{description: untyped}"), "");
        assert_eq!(label("{type: [string, 'null']}"), "string | null");
    }
}
