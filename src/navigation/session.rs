//! Session-scoped search state shared by the popup's views.

use super::cache::NavigationSearchCache;

/// The active query plus the per-path search memory.
///
/// Created once when the popup opens and dropped when it closes. Views
/// receive it explicitly instead of looking it up from ambient state.
#[derive(Debug, Default)]
pub struct SearchSession {
    query: String,
    history: NavigationSearchCache,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    /// True when the search box holds any input at all.
    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// Snapshot the active query under `path`.
    pub fn save_for_path(&mut self, path: &str) {
        self.history.save(path, &self.query);
    }

    /// Make the query remembered for `path` the active one.
    /// Returns false, leaving the active query untouched, when nothing was remembered.
    pub fn restore_for_path(&mut self, path: &str) -> bool {
        match self.history.restore(path) {
            Some(remembered) => {
                self.query = remembered.to_string();
                true
            }
            None => false,
        }
    }

    pub fn discard_for_path(&mut self, path: &str) {
        self.history.discard(path);
    }

    pub fn history(&self) -> &NavigationSearchCache {
        &self.history
    }
}
