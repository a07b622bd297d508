//! Logical routes of the quick-access popup and their paths.

use crate::types::{ResourceId, TagId};
use std::fmt;

const HOME_PATH: &str = "/data/quickaccess.html";
const TAG_PREFIX: &str = "/data/quickaccess/resources/tag";
const RESOURCE_PREFIX: &str = "/data/quickaccess/resources/view";

/// A view the popup can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The popup's landing view.
    Home,
    /// List of the user's tags.
    Tags,
    /// Resources marked with one tag.
    TagResources(TagId),
    /// Detail view of a single resource.
    Resource(ResourceId),
}

impl Route {
    /// Map a path back to its route. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        if path == HOME_PATH {
            return Some(Self::Home);
        }
        if path == TAG_PREFIX {
            return Some(Self::Tags);
        }
        if let Some(id) = single_segment(path, TAG_PREFIX) {
            return Some(Self::TagResources(TagId::new(id)));
        }
        if let Some(id) = single_segment(path, RESOURCE_PREFIX) {
            return Some(Self::Resource(ResourceId::new(id)));
        }
        None
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => HOME_PATH.to_string(),
            Self::Tags => TAG_PREFIX.to_string(),
            Self::TagResources(id) => format!("{}/{}", TAG_PREFIX, id),
            Self::Resource(id) => format!("{}/{}", RESOURCE_PREFIX, id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// `"{prefix}/{segment}"` → `segment`, when the segment is non-empty and has no further `/`.
fn single_segment<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.strip_prefix(prefix)?
        .strip_prefix('/')
        .filter(|segment| !segment.is_empty() && !segment.contains('/'))
}
