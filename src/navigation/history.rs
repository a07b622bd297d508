//! Router interface consumed by pages, plus an in-memory back stack.

use crate::types::Tag;

/// Typed payload carried by a navigation push.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationState {
    /// The tag picked on the tag list, so the next view need not look it up again.
    pub selected_tag: Option<Tag>,
}

/// The navigation component pages talk to.
pub trait Navigator {
    fn current_path(&self) -> &str;

    /// Payload pushed along with the current path, if any.
    fn location_state(&self) -> Option<&LocationState>;

    fn push(&mut self, path: String, state: Option<LocationState>);

    /// Return to the previous entry. A no-op on the first entry.
    fn go_back(&mut self);
}

#[derive(Debug, Clone)]
struct Entry {
    path: String,
    state: Option<LocationState>,
}

/// Back stack of visited paths; the last entry is the current one.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Entry>,
}

impl MemoryHistory {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            entries: vec![Entry {
                path: initial_path.into(),
                state: None,
            }],
        }
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    fn current(&self) -> &Entry {
        // `entries` is never emptied: `go_back` keeps the first entry.
        &self.entries[self.entries.len() - 1]
    }
}

impl Navigator for MemoryHistory {
    fn current_path(&self) -> &str {
        &self.current().path
    }

    fn location_state(&self) -> Option<&LocationState> {
        self.current().state.as_ref()
    }

    fn push(&mut self, path: String, state: Option<LocationState>) {
        tracing::debug!("Navigating to {}", path);
        self.entries.push(Entry { path, state });
    }

    fn go_back(&mut self) {
        if self.entries.len() > 1 {
            self.entries.pop();
            tracing::debug!("Navigated back to {}", self.current_path());
        }
    }
}
