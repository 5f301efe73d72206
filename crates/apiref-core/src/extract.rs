use serde_yaml_ng::{Mapping, Value};

use crate::document::Document;
use crate::group::default_group_for_path;
use crate::value::{display_text, first_text, lookup, lookup_sequence};

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Trace,
    ];

    /// The path-item key for this method, e.g. `get`.
    pub fn key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Trace => "trace",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Match a path-item key. Keys are case-sensitive, as in OpenAPI.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }
}

/// One (path, method) pair flattened out of the `paths` tree.
#[derive(Debug, Clone)]
pub struct OperationRecord<'a> {
    pub group: String,
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    pub operation: &'a Value,
    /// The `x-oaiMeta` vendor extension, when it is a mapping.
    pub meta: Option<&'a Mapping>,
    /// Path-level and operation-level parameters, de-duplicated.
    pub params: Vec<&'a Value>,
}

impl OperationRecord<'_> {
    /// Look up a key in the `x-oaiMeta` extension.
    pub fn meta_value(&self, key: &str) -> Option<&Value> {
        self.meta.and_then(|m| m.get(key))
    }
}

/// Identity used to de-duplicate parameters.
#[derive(Debug, PartialEq)]
enum ParamKey<'a> {
    Fields(Option<&'a Value>, Option<&'a Value>, Option<&'a Value>),
    Raw(&'a Value),
}

impl<'a> ParamKey<'a> {
    fn of(param: &'a Value) -> Self {
        if param.is_mapping() {
            ParamKey::Fields(
                lookup(param, "name"),
                lookup(param, "in"),
                lookup(param, "$ref"),
            )
        } else {
            ParamKey::Raw(param)
        }
    }
}

/// Walk `paths` and emit one record per recognised method on each path item.
pub fn extract_operations(doc: &Document) -> Vec<OperationRecord<'_>> {
    let Some(paths) = doc.paths() else {
        log::debug!("document has no paths mapping");
        return Vec::new();
    };

    let mut records = Vec::new();
    for (path_key, path_item) in paths {
        let path = display_text(path_key);
        let Some(item) = path_item.as_mapping() else {
            log::debug!("skipping {path}: path item is not a mapping");
            continue;
        };

        let path_params = parameters_of(path_item);

        for (method_key, operation) in item {
            let Some(method) = method_key.as_str().and_then(HttpMethod::from_key) else {
                continue;
            };
            if !operation.is_mapping() {
                continue;
            }

            let meta = lookup(operation, "x-oaiMeta").and_then(Value::as_mapping);
            let params = merge_parameters(&path_params, &parameters_of(operation));
            let group = resolve_group(&path, operation, meta);
            let name = resolve_name(&path, method, operation, meta);

            log::debug!("extracted {} {path} as {name:?} in group {group:?}", method.as_str());
            records.push(OperationRecord {
                group,
                name,
                method,
                path: path.clone(),
                operation,
                meta,
                params,
            });
        }
    }
    records
}

fn parameters_of(node: &Value) -> Vec<&Value> {
    lookup_sequence(node, "parameters")
        .map(|seq| seq.iter().collect())
        .unwrap_or_default()
}

/// Concatenate both lists, keeping the first occurrence of each identity.
fn merge_parameters<'a>(path_level: &[&'a Value], op_level: &[&'a Value]) -> Vec<&'a Value> {
    let mut seen: Vec<ParamKey<'a>> = Vec::new();
    let mut merged = Vec::new();
    for &param in path_level.iter().chain(op_level) {
        let key = ParamKey::of(param);
        if !seen.contains(&key) {
            seen.push(key);
            merged.push(param);
        }
    }
    merged
}

/// `x-oaiMeta.group`, then the first tag, then the first path segment.
fn resolve_group(path: &str, operation: &Value, meta: Option<&Mapping>) -> String {
    let first_tag = lookup_sequence(operation, "tags").and_then(|tags| tags.first());
    first_text([meta.and_then(|m| m.get("group")), first_tag])
        .unwrap_or_else(|| default_group_for_path(path))
}

/// `x-oaiMeta.name`, then `summary`, then `operationId`, then `METHOD path`.
fn resolve_name(
    path: &str,
    method: HttpMethod,
    operation: &Value,
    meta: Option<&Mapping>,
) -> String {
    first_text([
        meta.and_then(|m| m.get("name")),
        lookup(operation, "summary"),
        lookup(operation, "operationId"),
    ])
    .unwrap_or_else(|| format!("{} {path}", method.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yaml_ng::from_str(src).unwrap()
    }

    #[test]
    fn test_method_keys() {
        assert_eq!(HttpMethod::from_key("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_key("trace"), Some(HttpMethod::Trace));
        assert_eq!(HttpMethod::from_key("GET"), None);
        assert_eq!(HttpMethod::from_key("parameters"), None);
    }

    #[test]
    fn test_merge_dedupes_by_identity() {
        let a = yaml("{name: id, in: path, required: true}");
        let b = yaml("{name: id, in: path, description: different}");
        let c = yaml("{name: id, in: query}");
        let merged = merge_parameters(&[&a], &[&b, &c]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], &a);
        assert_eq!(merged[1], &c);
    }

    #[test]
    fn test_merge_dedupes_refs_and_raw_values() {
        let r1 = yaml(r##"{"$ref": "#/components/parameters/Limit"}"##);
        let r2 = yaml(r##"{"$ref": "#/components/parameters/Limit"}"##);
        let r3 = yaml(r##"{"$ref": "#/components/parameters/Offset"}"##);
        let raw1 = yaml("oops");
        let raw2 = yaml("oops");
        let merged = merge_parameters(&[&r1, &raw1], &[&r2, &r3, &raw2]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_group_fallback_chain() {
        let op = yaml("{tags: [Widgets, Other]}");
        let meta = yaml("{group: chat}");
        assert_eq!(resolve_group("/v1/x", &op, meta.as_mapping()), "chat");
        assert_eq!(resolve_group("/v1/x", &op, None), "Widgets");
        assert_eq!(resolve_group("/v1/x", &yaml("{}"), None), "v1");
        assert_eq!(resolve_group("/", &yaml("{}"), None), "misc");
        assert_eq!(resolve_group("/v1", &yaml("{tags: []}"), None), "v1");
    }

    #[test]
    fn test_name_fallback_chain() {
        let meta = yaml("{name: Create widget}");
        let op = yaml("{summary: Make one, operationId: createWidget}");
        assert_eq!(
            resolve_name("/w", HttpMethod::Post, &op, meta.as_mapping()),
            "Create widget"
        );
        assert_eq!(resolve_name("/w", HttpMethod::Post, &op, None), "Make one");
        assert_eq!(
            resolve_name("/w", HttpMethod::Post, &yaml("{operationId: createWidget}"), None),
            "createWidget"
        );
        assert_eq!(
            resolve_name("/w/{id}", HttpMethod::Delete, &yaml("{}"), None),
            "DELETE /w/{id}"
        );
    }
}
