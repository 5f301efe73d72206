use serde_yaml_ng::{Mapping, Value};

use crate::resolve::resolve;
use crate::value::{display_text, first_text, lookup, lookup_mapping, lookup_truthy};

/// A parsed OpenAPI document, kept as an untyped tree.
///
/// The root is expected to be a mapping. Any other root behaves like an
/// empty document.
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
}

impl Document {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The `info` mapping, if present.
    pub fn info(&self) -> Option<&Value> {
        lookup(&self.root, "info").filter(|v| v.is_mapping())
    }

    /// `info.title`, when present and non-empty.
    pub fn title(&self) -> Option<String> {
        first_text([self.info().and_then(|info| lookup(info, "title"))])
    }

    /// The top-level `openapi` version field.
    pub fn openapi_version(&self) -> Option<String> {
        lookup_truthy(&self.root, "openapi").map(display_text)
    }

    /// `info.version`.
    pub fn info_version(&self) -> Option<String> {
        self.info()
            .and_then(|info| lookup_truthy(info, "version"))
            .map(display_text)
    }

    /// The `paths` mapping, if present.
    pub fn paths(&self) -> Option<&Mapping> {
        lookup_mapping(&self.root, "paths")
    }

    /// Resolve a local `$ref` node one hop against this document.
    pub fn resolve<'a>(&'a self, node: &'a Value) -> &'a Value {
        resolve(&self.root, node)
    }
}
