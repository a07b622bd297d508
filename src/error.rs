//! Error handling types and utilities.

use crate::types::TagId;
use std::time::Duration;

/// A specialized Result type for application-level operations (config, CLI).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a request to the data channel fails.
///
/// The page keeps this value as-is in its load state so the view can show it
/// next to a retry affordance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The background process answered the request with an error.
    #[error("request '{request}' was rejected: {message}")]
    Rejected { request: String, message: String },
    /// No answer arrived within the configured timeout.
    #[error("request '{request}' timed out after {after:?}")]
    Timeout { request: String, after: Duration },
    /// The channel's backing store could not be read.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
    /// The answer could not be decoded into records.
    #[error("failed to decode response for '{request}': {message}")]
    Decode { request: String, message: String },
    /// A tag route was entered without a payload and the id is unknown.
    #[error("tag '{0}' does not exist")]
    TagNotFound(TagId),
}

/// Error returned when a page action cannot be carried out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// The current path does not map to the tag list or a tag's resources.
    #[error("no browse view is mapped to '{0}'")]
    UnroutablePath(String),
    /// A tag was selected that is not among the loaded tags.
    #[error("tag '{0}' is not in the loaded list")]
    UnknownTag(TagId),
    /// A row number outside the rendered list.
    #[error("there is no row {0} on this page")]
    NoSuchRow(usize),
    /// The page was already left or unmounted.
    #[error("the page is no longer mounted")]
    Unmounted,
}
