//! Shared test fixtures and channels for integration tests.
//!
//! # Available Fixtures
//!
//! - `sample_export`: a handful of tags and resources with overlapping fields
//! - `popup`: a [`Popup`] over `sample_export`, already on the tag list
//!
//! # Channels
//!
//! - [`MemoryChannel`] answers immediately from an [`Export`]
//! - [`FlakyChannel`] fails a configurable number of requests before answering
//! - [`StalledChannel`] never answers, for timeout and cancellation tests

// Each integration test crate uses a different subset of these helpers.
#![allow(dead_code)]

use futures::FutureExt;
use futures::future::BoxFuture;
use quickaccess_browse::channel::{Export, ExportedResource};
use quickaccess_browse::{
    BrowseConfig, Command, DataChannel, FetchError, MemoryChannel, Popup, Resource, ResourceFilter,
    Tag,
};
use rstest::fixture;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

pub fn tagged(resource: Resource, tags: &[&str]) -> ExportedResource {
    ExportedResource {
        resource,
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
    }
}

#[fixture]
pub fn sample_export() -> Export {
    Export {
        tags: vec![
            Tag::new("t-work", "work"),
            Tag::new("t-home", "Home"),
            Tag::new("t-bank", "banking"),
        ],
        resources: vec![
            tagged(
                Resource::new("r-gmail", "Gmail")
                    .with_username("bob")
                    .with_uri("https://mail.google.com"),
                &["Home"],
            ),
            tagged(
                Resource::new("r-aws", "AWS")
                    .with_username("alice")
                    .with_uri("https://console.aws.amazon.com")
                    .with_description("production root"),
                &["work"],
            ),
            tagged(
                Resource::new("r-admin", "admin-panel").with_username("root"),
                &["work"],
            ),
            tagged(Resource::new("r-bank", "Bank").with_username("bob"), &["Home", "banking"]),
        ],
    }
}

#[fixture]
pub async fn popup(sample_export: Export) -> Popup {
    let mut popup = Popup::new(
        Arc::new(MemoryChannel::new(sample_export)),
        BrowseConfig::default(),
    );
    popup
        .execute(Command::Tags)
        .await
        .expect("tag list should open");
    popup
}

/// Fails the first `failures` requests, then answers from `export`.
pub struct FlakyChannel {
    inner: MemoryChannel,
    remaining_failures: AtomicUsize,
}

impl FlakyChannel {
    pub fn new(export: Export, failures: usize) -> Self {
        Self {
            inner: MemoryChannel::new(export),
            remaining_failures: AtomicUsize::new(failures),
        }
    }

    fn should_fail(&self) -> bool {
        self.remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl DataChannel for FlakyChannel {
    fn find_all_tags(&self) -> BoxFuture<'_, Result<Vec<Tag>, FetchError>> {
        if self.should_fail() {
            return futures::future::ready(Err(FetchError::Rejected {
                request: "passbolt.tags.find-all".to_string(),
                message: "background page unavailable".to_string(),
            }))
            .boxed();
        }
        self.inner.find_all_tags()
    }

    fn find_all_resources(
        &self,
        filter: ResourceFilter,
    ) -> BoxFuture<'_, Result<Vec<Resource>, FetchError>> {
        if self.should_fail() {
            return futures::future::ready(Err(FetchError::Rejected {
                request: "passbolt.resources.find-all".to_string(),
                message: "background page unavailable".to_string(),
            }))
            .boxed();
        }
        self.inner.find_all_resources(filter)
    }
}

/// Never answers.
pub struct StalledChannel;

impl DataChannel for StalledChannel {
    fn find_all_tags(&self) -> BoxFuture<'_, Result<Vec<Tag>, FetchError>> {
        futures::future::pending().boxed()
    }

    fn find_all_resources(
        &self,
        _filter: ResourceFilter,
    ) -> BoxFuture<'_, Result<Vec<Resource>, FetchError>> {
        futures::future::pending().boxed()
    }
}

/// A temporary directory holding files written by a test.
pub struct TempFiles {
    temp: TempDir,
}

impl TempFiles {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Writes `contents` to `name` and returns the full path.
    pub fn write(&self, name: &str, contents: &str) -> std::path::PathBuf {
        let path = self.temp.path().join(name);
        std::fs::write(&path, contents)
            .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
        path
    }
}
