use serde_yaml_ng::Value;

use crate::value::{lookup, truthy};

/// Resolve a local `$ref` one hop.
///
/// Only references of the form `#/a/b/c` are followed, walking each
/// segment as a mapping key from `root`. If the node is not a reference,
/// the reference is external, or any step fails to resolve, `node` itself
/// is returned. The target is not resolved again if it is a reference too.
pub fn resolve<'a>(root: &'a Value, node: &'a Value) -> &'a Value {
    let Some(reference) = lookup(node, "$ref").and_then(Value::as_str) else {
        return node;
    };
    let Some(pointer) = reference.strip_prefix("#/") else {
        return node;
    };

    let mut current = root;
    for segment in pointer.trim_end_matches('/').split('/') {
        match lookup(current, segment) {
            Some(next) => current = next,
            None => {
                log::debug!("unresolved reference {reference}");
                return node;
            }
        }
    }

    if truthy(Some(current)) { current } else { node }
}
