use std::collections::BTreeMap;

use crate::extract::OperationRecord;

/// Group key used when a path has no segments.
pub const FALLBACK_GROUP: &str = "misc";

/// Operations sharing one group key, rendered as one page.
#[derive(Debug, Clone)]
pub struct OperationGroup<'a> {
    /// Raw group key as resolved from the document.
    pub key: String,
    /// File-name slug, see [`slugify`].
    pub slug: String,
    /// Human-readable title, see [`titleize`].
    pub title: String,
    /// Operations sorted by (path, method).
    pub operations: Vec<OperationRecord<'a>>,
}

/// Bucket records by group key.
///
/// Groups come back ordered by raw key; operations within a group by path
/// and then lower-case method.
pub fn group_operations(records: Vec<OperationRecord<'_>>) -> Vec<OperationGroup<'_>> {
    let mut buckets: BTreeMap<String, Vec<OperationRecord<'_>>> = BTreeMap::new();
    for record in records {
        buckets.entry(record.group.clone()).or_default().push(record);
    }

    buckets
        .into_iter()
        .map(|(key, mut operations)| {
            operations.sort_by(|a, b| (&a.path, a.method.key()).cmp(&(&b.path, b.method.key())));
            OperationGroup {
                slug: slugify(&key),
                title: titleize(&key),
                key,
                operations,
            }
        })
        .collect()
}

/// First non-empty path segment, or [`FALLBACK_GROUP`].
/// e.g. "/widgets/{id}" → "widgets", "/" → "misc"
pub fn default_group_for_path(path: &str) -> String {
    path.split('/')
        .find(|s| !s.is_empty())
        .unwrap_or(FALLBACK_GROUP)
        .to_string()
}

/// Lower-case, collapse runs outside `[a-z0-9]` to `-`, trim hyphens.
/// Never empty.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;
    for ch in value.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch);
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_GROUP.to_string()
    } else {
        slug
    }
}

/// Split on `_`, `-` and whitespace, upper-case the first character of
/// each piece, join with single spaces.
pub fn titleize(value: &str) -> String {
    value
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            let mut chars = piece.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
