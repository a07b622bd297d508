//! Literal multi-term search over tags and resources.
//!
//! This module provides tokenization, conjunctive field matching, stable
//! alphabetical ordering and display capping, composed by [`SearchFilterEngine`].

// Module declarations
pub(crate) mod engine;
pub(crate) mod matcher;
pub(crate) mod sort;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use engine::{Displayed, SearchFilterEngine};
pub use matcher::{Searchable, matches};
pub use sort::{compare_keys, limit, sort_alphabetically};
pub use tokenize::{Term, tokenize};
