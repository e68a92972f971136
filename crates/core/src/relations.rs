//! Reconciliation of relational and inline (legacy) categories/tags.
//!
//! Older tool rows carry their categories and tags as inline name lists.
//! Newer rows use the `tool_categories` / `tool_tags` join tables. Both are
//! folded into one list of [`Linked`] values when a tool is hydrated, so
//! nothing downstream needs to know where an entry came from.

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::slug::slugify;
use crate::types::DbId;

/// Delimiters accepted in free-text list fields (inline names, pricing models).
pub const LIST_DELIMITERS: [char; 4] = [',', ';', '/', '|'];

/// Prefix for ids of entries synthesised from inline names.
pub const INLINE_ID_PREFIX: &str = "inline-";

/// A lookup entity that can be attached to a tool or news item.
pub trait RelatedEntity {
    fn entity_id(&self) -> DbId;
    fn slug(&self) -> &str;
}

/// A category or tag as seen by a hydrated view.
#[derive(Debug, Clone, PartialEq)]
pub enum Linked<T> {
    /// Backed by a row in the lookup table.
    Relational(T),
    /// Synthesised from a legacy inline name; has no row.
    Inline { name: String, slug: String },
}

impl<T: RelatedEntity> Linked<T> {
    pub fn slug(&self) -> &str {
        match self {
            Linked::Relational(entity) => entity.slug(),
            Linked::Inline { slug, .. } => slug,
        }
    }

    /// Stable string id: the numeric id for relational entries, `inline-<slug>` otherwise.
    pub fn id_string(&self) -> String {
        match self {
            Linked::Relational(entity) => entity.entity_id().to_string(),
            Linked::Inline { slug, .. } => format!("{INLINE_ID_PREFIX}{slug}"),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Linked::Inline { .. })
    }
}

impl<T: Serialize> Serialize for Linked<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Linked::Relational(entity) => entity.serialize(serializer),
            Linked::Inline { name, slug } => {
                let mut state = serializer.serialize_struct("InlineEntity", 4)?;
                state.serialize_field("id", &format!("{INLINE_ID_PREFIX}{slug}"))?;
                state.serialize_field("name", name)?;
                state.serialize_field("slug", slug)?;
                state.serialize_field("inline", &true)?;
                state.end()
            }
        }
    }
}

/// Merge relational entities with inline names into a slug-unique list.
///
/// Relational entities come first in their original order; a later
/// relational entity with an already-seen slug replaces the earlier one in
/// place. Inline names are slugified and only added when no entry owns that
/// slug yet. Names that slugify to nothing are skipped.
pub fn reconcile<T: RelatedEntity>(relational: Vec<T>, inline_names: &[String]) -> Vec<Linked<T>> {
    let mut by_slug: IndexMap<String, Linked<T>> = IndexMap::new();

    for entity in relational {
        by_slug.insert(entity.slug().to_string(), Linked::Relational(entity));
    }

    for name in inline_names {
        let slug = slugify(name);
        if slug.is_empty() || by_slug.contains_key(&slug) {
            continue;
        }
        by_slug.insert(
            slug.clone(),
            Linked::Inline {
                name: name.clone(),
                slug,
            },
        );
    }

    by_slug.into_values().collect()
}

/// Read an inline name list from a JSON column.
///
/// Accepts an array (non-string entries are ignored) or a delimited string.
/// Entries are trimmed and blanks dropped; anything else yields an empty list.
pub fn inline_names(value: Option<&serde_json::Value>) -> Vec<String> {
    match value {
        Some(serde_json::Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| entry.as_str())
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(String::from)
            .collect(),
        Some(serde_json::Value::String(text)) => split_delimited(text),
        _ => Vec::new(),
    }
}

/// Split on [`LIST_DELIMITERS`], trimming and dropping blank tokens.
pub fn split_delimited(text: &str) -> Vec<String> {
    text.split(LIST_DELIMITERS)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}
