//! Stable case-insensitive ordering and display capping.

use std::cmp::Ordering;

/// Three-way comparison of two keys after uppercase normalization.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    a.to_uppercase().cmp(&b.to_uppercase())
}

/// Sorts records in place by their uppercase-normalized key.
///
/// The sort is stable: records whose keys compare equal keep their input order.
pub fn sort_alphabetically<T, F>(records: &mut [T], key: F)
where
    F: Fn(&T) -> &str,
{
    records.sort_by_cached_key(|record| key(record).to_uppercase());
}

/// Truncates an ordered collection to at most `max` records.
pub fn limit<T>(mut records: Vec<T>, max: usize) -> Vec<T> {
    records.truncate(max);
    records
}
