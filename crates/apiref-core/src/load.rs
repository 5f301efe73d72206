use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{
    self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor,
};
use serde_yaml_ng::value::{Tag, TaggedValue};
use serde_yaml_ng::{Mapping, Number, Value};

use crate::document::Document;
use crate::error::LoadError;

const YAML_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// Tags that may appear in an input document. Anything else is rejected.
const PERMITTED_TAGS: &[&str] = &["timestamp", "date", "time"];

/// Read and parse an OpenAPI document (YAML or JSON) from disk.
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read {} bytes from {}", content.len(), path.display());
    parse_document(&content)
}

/// Parse document text. JSON is accepted since it is a subset of YAML.
///
/// Anchors, aliases and merge keys are expanded. Date/time tags are
/// unwrapped to their scalar; any other explicit tag is an error.
pub fn parse_document(input: &str) -> Result<Document, LoadError> {
    let LastWins(raw) = serde_yaml_ng::from_str(input)?;
    let mut root = strip_tags(raw)?;
    root.apply_merge()?;
    Ok(Document::new(root))
}

/// A document node built with last-wins semantics for repeated mapping keys.
/// The first occurrence keeps its position; the later value replaces it.
struct LastWins(Value);

impl<'de> Deserialize<'de> for LastWins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LastWinsVisitor).map(LastWins)
    }
}

struct LastWinsVisitor;

impl<'de> Visitor<'de> for LastWinsVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Number(Number::from(n)))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        Ok(Value::Number(Number::from(n)))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<Value, E> {
        Ok(Value::Number(Number::from(n)))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_owned()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        LastWins::deserialize(deserializer).map(|LastWins(v)| v)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(LastWins(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut mapping = Mapping::new();
        while let Some((LastWins(key), LastWins(value))) = map.next_entry()? {
            mapping.insert(key, value);
        }
        Ok(Value::Mapping(mapping))
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Value, A::Error> {
        let (tag, contents): (String, _) = data.variant()?;
        let LastWins(value) = contents.newtype_variant()?;
        Ok(Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(tag),
            value,
        })))
    }
}

fn strip_tags(value: Value) -> Result<Value, LoadError> {
    match value {
        Value::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            if !is_permitted_tag(&tag) {
                return Err(LoadError::DisallowedTag(tag));
            }
            strip_tags(tagged.value)
        }
        Value::Sequence(items) => items
            .into_iter()
            .map(strip_tags)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence),
        Value::Mapping(mapping) => {
            let mut out = Mapping::with_capacity(mapping.len());
            for (key, value) in mapping {
                out.insert(strip_tags(key)?, strip_tags(value)?);
            }
            Ok(Value::Mapping(out))
        }
        scalar => Ok(scalar),
    }
}

fn is_permitted_tag(tag: &str) -> bool {
    let name = tag.trim_start_matches('!');
    let name = name
        .strip_prefix('<')
        .and_then(|n| n.strip_suffix('>'))
        .unwrap_or(name);
    let name = name.strip_prefix(YAML_TAG_PREFIX).unwrap_or(name);
    PERMITTED_TAGS.contains(&name)
}
