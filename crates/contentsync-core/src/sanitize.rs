//! Field sanitizer
//!
//! Produces a write-safe copy of an exported entity by dropping the fields the
//! target instance assigns itself. The removal set is chosen per nesting
//! depth: depth 0 is the entity root, everything below it (components,
//! relations, list elements) is nested.

use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Fields the target assigns itself, stripped by default at every depth
pub const DEFAULT_IMMUTABLE_FIELDS: [&str; 8] = [
    "id",
    "documentId",
    "createdAt",
    "updatedAt",
    "publishedAt",
    "createdBy",
    "updatedBy",
    "localizations",
];

/// Removal sets for the root and nested depths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizePolicy {
    root: BTreeSet<String>,
    nested: BTreeSet<String>,
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        let defaults: BTreeSet<String> = DEFAULT_IMMUTABLE_FIELDS
            .iter()
            .map(|f| f.to_string())
            .collect();
        Self {
            root: defaults.clone(),
            nested: defaults,
        }
    }
}

impl SanitizePolicy {
    /// Policy with explicit sets for each depth
    pub fn new<R, N>(root: R, nested: N) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            root: root.into_iter().map(Into::into).collect(),
            nested: nested.into_iter().map(Into::into).collect(),
        }
    }

    /// Add fields stripped at the entity root
    pub fn with_root_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.root.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Add fields stripped below the entity root
    pub fn with_nested_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.nested.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn root_fields(&self) -> &BTreeSet<String> {
        &self.root
    }

    pub fn nested_fields(&self) -> &BTreeSet<String> {
        &self.nested
    }

    fn fields_at(&self, depth: usize) -> &BTreeSet<String> {
        if depth == 0 {
            &self.root
        } else {
            &self.nested
        }
    }

    /// Return a copy of `entity` without server-managed fields
    pub fn sanitize(&self, entity: &Value) -> Value {
        self.sanitize_at(entity, 0)
    }

    fn sanitize_at(&self, value: &Value, depth: usize) -> Value {
        match value {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.sanitize_at(item, depth + 1))
                    .collect(),
            ),
            Value::Object(fields) => {
                let strip = self.fields_at(depth);
                let kept: Map<String, Value> = fields
                    .iter()
                    .filter(|(key, _)| !strip.contains(key.as_str()))
                    .map(|(key, val)| (key.clone(), self.sanitize_at(val, depth + 1)))
                    .collect();
                Value::Object(kept)
            }
            scalar => scalar.clone(),
        }
    }
}
