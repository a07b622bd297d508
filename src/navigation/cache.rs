//! Per-path memory of the search that was active when a view was left.

use ahash::AHashMap;

/// Session-scoped map from navigation path to remembered query.
///
/// Holds at most one entry per path and never stores an empty query.
/// Nothing is persisted: dropping the cache forgets every entry.
#[derive(Debug, Default, Clone)]
pub struct NavigationSearchCache {
    entries: AHashMap<String, String>,
}

impl NavigationSearchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `query` for `path`, replacing any earlier entry.
    /// An empty query removes the entry instead.
    pub fn save(&mut self, path: &str, query: &str) {
        if query.is_empty() {
            if self.entries.remove(path).is_some() {
                tracing::debug!("Cleared remembered search for {}", path);
            }
            return;
        }

        tracing::debug!("Remembering search {:?} for {}", query, path);
        self.entries.insert(path.to_string(), query.to_string());
    }

    /// Look up the remembered query for `path`. The entry is kept so a
    /// later re-entry (forward navigation) sees it again.
    pub fn restore(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Forget the entry for `path`, returning it if there was one.
    pub fn discard(&mut self, path: &str) -> Option<String> {
        let removed = self.entries.remove(path);
        if removed.is_some() {
            tracing::debug!("Discarded remembered search for {}", path);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
