//! Request/response channel to the process that owns the user's data.
//!
//! Pages only ever issue two requests: "find all tags" and "find all
//! resources, optionally restricted to one tag". Failures are returned to the
//! caller untouched.

use crate::error::FetchError;
use crate::types::{Resource, Tag};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Request name for listing tags.
pub const FIND_ALL_TAGS: &str = "passbolt.tags.find-all";

/// Request name for listing resources.
pub const FIND_ALL_RESOURCES: &str = "passbolt.resources.find-all";

/// Restriction applied by the channel when listing resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFilter {
    /// Only resources marked with the tag having this slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_tag: Option<String>,
}

impl ResourceFilter {
    pub fn has_tag(slug: impl Into<String>) -> Self {
        Self {
            has_tag: Some(slug.into()),
        }
    }
}

/// The data source consumed by pages.
pub trait DataChannel: Send + Sync {
    fn find_all_tags(&self) -> BoxFuture<'_, Result<Vec<Tag>, FetchError>>;

    fn find_all_resources(
        &self,
        filter: ResourceFilter,
    ) -> BoxFuture<'_, Result<Vec<Resource>, FetchError>>;
}

/// Await `request`, failing with [`FetchError::Timeout`] after `timeout`.
pub async fn with_timeout<T, F>(request: &str, timeout: Duration, fut: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Request {} timed out after {:?}", request, timeout);
            Err(FetchError::Timeout {
                request: request.to_string(),
                after: timeout,
            })
        }
    }
}

/// A resource as exported, with the slugs of the tags marking it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedResource {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Snapshot of the user's tags and resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Export {
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub resources: Vec<ExportedResource>,
}

impl Export {
    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        serde_json::from_str(json).map_err(|e| FetchError::Decode {
            request: "export".to_string(),
            message: e.to_string(),
        })
    }

    /// Resources passing `filter`, in export order. Slug comparison is exact.
    pub fn find_resources(&self, filter: &ResourceFilter) -> Vec<Resource> {
        self.resources
            .iter()
            .filter(|exported| match &filter.has_tag {
                Some(slug) => exported.tags.iter().any(|tag| tag == slug),
                None => true,
            })
            .map(|exported| exported.resource.clone())
            .collect()
    }
}

/// Channel answering from an in-memory export.
#[derive(Debug, Clone, Default)]
pub struct MemoryChannel {
    export: Export,
}

impl MemoryChannel {
    pub const fn new(export: Export) -> Self {
        Self { export }
    }
}

impl DataChannel for MemoryChannel {
    fn find_all_tags(&self) -> BoxFuture<'_, Result<Vec<Tag>, FetchError>> {
        futures::future::ready(Ok(self.export.tags.clone())).boxed()
    }

    fn find_all_resources(
        &self,
        filter: ResourceFilter,
    ) -> BoxFuture<'_, Result<Vec<Resource>, FetchError>> {
        futures::future::ready(Ok(self.export.find_resources(&filter))).boxed()
    }
}

/// Channel answering from a JSON export on disk, re-read on every request.
#[derive(Debug, Clone)]
pub struct JsonChannel {
    path: PathBuf,
}

impl JsonChannel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_export(&self, request: &str) -> Result<Export, FetchError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Io {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        serde_json::from_str(&contents).map_err(|e| FetchError::Decode {
            request: request.to_string(),
            message: e.to_string(),
        })
    }
}

impl DataChannel for JsonChannel {
    fn find_all_tags(&self) -> BoxFuture<'_, Result<Vec<Tag>, FetchError>> {
        async move {
            let export = self.read_export(FIND_ALL_TAGS).await?;
            tracing::debug!("{} answered {} tags", FIND_ALL_TAGS, export.tags.len());
            Ok(export.tags)
        }
        .boxed()
    }

    fn find_all_resources(
        &self,
        filter: ResourceFilter,
    ) -> BoxFuture<'_, Result<Vec<Resource>, FetchError>> {
        async move {
            let export = self.read_export(FIND_ALL_RESOURCES).await?;
            let resources = export.find_resources(&filter);
            tracing::debug!(
                "{} answered {} resources (filter: {:?})",
                FIND_ALL_RESOURCES,
                resources.len(),
                filter.has_tag
            );
            Ok(resources)
        }
        .boxed()
    }
}
