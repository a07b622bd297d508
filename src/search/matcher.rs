//! Conjunctive multi-field matching of records against query terms.

use super::tokenize::Term;
use crate::types::{EntityKind, Resource, Tag};

/// A record the page can list, search and sort.
pub trait Searchable {
    /// Which display limit and messages apply to this record type.
    const KIND: EntityKind;

    /// Key used for the alphabetical ordering.
    fn sort_key(&self) -> &str;

    /// The fields a search term may be found in, in a fixed order.
    /// Absent values are reported as `""`.
    fn searchable_fields(&self) -> impl Iterator<Item = &str>;
}

impl Searchable for Tag {
    const KIND: EntityKind = EntityKind::Tag;

    fn sort_key(&self) -> &str {
        &self.slug
    }

    fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.slug.as_str())
    }
}

impl Searchable for Resource {
    const KIND: EntityKind = EntityKind::Resource;

    fn sort_key(&self) -> &str {
        &self.name
    }

    fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.name.as_str()),
            self.username.as_deref(),
            self.uri.as_deref(),
            self.description.as_deref(),
        ]
        .into_iter()
        .map(|field| field.unwrap_or_default())
    }
}

/// Returns true when every term is found in at least one searchable field.
///
/// Terms may be spread across fields: "alice aws" matches a resource named
/// "AWS" whose username is "alice". An empty term list matches everything.
pub fn matches<T: Searchable>(record: &T, terms: &[Term]) -> bool {
    terms
        .iter()
        .all(|term| record.searchable_fields().any(|field| term.is_found_in(field)))
}
