//! The "filter resources by tag" page: a tag list, or one tag's resources.
//!
//! A page is mounted on the current path, issues one fetch, and renders the
//! fetched collection filtered by the session's query. Fetches are not awaited
//! by the page itself: [`BrowsePage::mount`] and [`BrowsePage::retry`] hand out
//! a [`PendingLoad`] which the caller runs against a [`DataChannel`] and feeds
//! back through [`BrowsePage::apply`]. Each pending load carries a child of the
//! page's liveness token and the page generation it was issued for, so results
//! arriving after the page was left, or superseded by a retry, are dropped.

use crate::channel::{DataChannel, FIND_ALL_RESOURCES, FIND_ALL_TAGS, ResourceFilter, with_timeout};
use crate::config::BrowseConfig;
use crate::error::{FetchError, PageError};
use crate::navigation::{LocationState, Navigator, Route, SearchSession};
use crate::render::{
    LOADING_RESOURCES, LOADING_TAGS, NO_SEARCH_MATCH, NO_TAGGED_RESOURCES, NO_TAGS, PageBody,
    PageView, RETRY_HINT, ResourceRow, TAGS_TITLE, TagRow,
};
use crate::search::{Displayed, SearchFilterEngine, Searchable};
use crate::types::{Resource, ResourceId, Tag, TagId};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Fetch progress of one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Loaded(Vec<T>),
    Failed(FetchError),
}

impl<T> LoadState<T> {
    pub fn records(&self) -> Option<&[T]> {
        match self {
            Self::Loaded(records) => Some(records),
            Self::Loading | Self::Failed(_) => None,
        }
    }

    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(error) => Some(error),
            Self::Loading | Self::Loaded(_) => None,
        }
    }

    fn from_result(result: Result<Vec<T>, FetchError>) -> Self {
        match result {
            Ok(records) => Self::Loaded(records),
            Err(error) => Self::Failed(error),
        }
    }
}

/// What the page lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Tags,
    TagResources(TagId),
}

#[derive(Debug, Clone)]
enum LoadRequest {
    Tags,
    /// The tag came with the navigation payload.
    Resources(Tag),
    /// Deep link without payload: the tag must be looked up by id first.
    UnresolvedResources(TagId),
}

/// A fetch issued by a page, to be run against a channel.
#[derive(Debug)]
pub struct PendingLoad {
    request: LoadRequest,
    generation: u64,
    liveness: CancellationToken,
    timeout: Duration,
}

/// Result of running a [`PendingLoad`].
#[derive(Debug)]
pub struct LoadOutcome {
    generation: u64,
    payload: LoadPayload,
}

#[derive(Debug)]
enum LoadPayload {
    Tags(Result<Vec<Tag>, FetchError>),
    Resources {
        /// The tag resolved while loading a deep link.
        resolved_tag: Option<Tag>,
        result: Result<Vec<Resource>, FetchError>,
    },
    /// The page was unmounted before the channel answered.
    Cancelled,
}

impl LoadOutcome {
    pub const fn is_cancelled(&self) -> bool {
        matches!(self.payload, LoadPayload::Cancelled)
    }
}

impl PendingLoad {
    /// Run the fetch, giving up as soon as the owning page is unmounted.
    pub async fn run<C: DataChannel + ?Sized>(self, channel: &C) -> LoadOutcome {
        let payload = tokio::select! {
            biased;
            () = self.liveness.cancelled() => LoadPayload::Cancelled,
            payload = fetch(&self.request, channel, self.timeout) => payload,
        };

        LoadOutcome {
            generation: self.generation,
            payload,
        }
    }
}

async fn fetch<C: DataChannel + ?Sized>(
    request: &LoadRequest,
    channel: &C,
    timeout: Duration,
) -> LoadPayload {
    match request {
        LoadRequest::Tags => {
            LoadPayload::Tags(with_timeout(FIND_ALL_TAGS, timeout, channel.find_all_tags()).await)
        }
        LoadRequest::Resources(tag) => LoadPayload::Resources {
            resolved_tag: None,
            result: fetch_tag_resources(tag, channel, timeout).await,
        },
        LoadRequest::UnresolvedResources(tag_id) => {
            let tags = match with_timeout(FIND_ALL_TAGS, timeout, channel.find_all_tags()).await {
                Ok(tags) => tags,
                Err(error) => {
                    return LoadPayload::Resources {
                        resolved_tag: None,
                        result: Err(error),
                    };
                }
            };

            let Some(tag) = tags.into_iter().find(|tag| &tag.id == tag_id) else {
                return LoadPayload::Resources {
                    resolved_tag: None,
                    result: Err(FetchError::TagNotFound(tag_id.clone())),
                };
            };

            let result = fetch_tag_resources(&tag, channel, timeout).await;
            LoadPayload::Resources {
                resolved_tag: Some(tag),
                result,
            }
        }
    }
}

async fn fetch_tag_resources<C: DataChannel + ?Sized>(
    tag: &Tag,
    channel: &C,
    timeout: Duration,
) -> Result<Vec<Resource>, FetchError> {
    let filter = ResourceFilter::has_tag(tag.slug.clone());
    with_timeout(FIND_ALL_RESOURCES, timeout, channel.find_all_resources(filter)).await
}

/// One mounted instance of the browse page.
#[derive(Debug)]
pub struct BrowsePage {
    path: String,
    mode: ViewMode,
    selected_tag: Option<Tag>,
    tags: LoadState<Tag>,
    resources: LoadState<Resource>,
    engine: SearchFilterEngine,
    timeout: Duration,
    liveness: CancellationToken,
    generation: u64,
}

impl BrowsePage {
    /// Mount the page on the navigator's current path.
    ///
    /// Restores the search remembered for this path into the session and
    /// returns the first fetch to run.
    pub fn mount<N: Navigator + ?Sized>(
        session: &mut SearchSession,
        navigator: &N,
        config: &BrowseConfig,
    ) -> Result<(Self, PendingLoad), PageError> {
        let current = navigator.current_path();
        let route = Route::parse(current);
        // Searches are remembered under the canonical path of the route.
        let path = match &route {
            Some(route) => route.path(),
            None => current.to_string(),
        };
        let mode = match route {
            Some(Route::Tags) => ViewMode::Tags,
            Some(Route::TagResources(tag_id)) => ViewMode::TagResources(tag_id),
            Some(Route::Home | Route::Resource(_)) | None => {
                return Err(PageError::UnroutablePath(current.to_string()));
            }
        };

        // The payload is only trusted when it names the tag in the path.
        let selected_tag = match &mode {
            ViewMode::Tags => None,
            ViewMode::TagResources(tag_id) => navigator
                .location_state()
                .and_then(|state| state.selected_tag.clone())
                .filter(|tag| &tag.id == tag_id),
        };

        if session.restore_for_path(&path) {
            tracing::debug!("Restored search {:?} for {}", session.query(), path);
        }

        let mut page = Self {
            path,
            mode,
            selected_tag,
            tags: LoadState::Loading,
            resources: LoadState::Loading,
            engine: SearchFilterEngine::new(config.limits),
            timeout: config.fetch.timeout(),
            liveness: CancellationToken::new(),
            generation: 0,
        };

        tracing::info!("Mounted browse page on {}", page.path);
        let load = page.begin_load();
        Ok((page, load))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub const fn selected_tag(&self) -> Option<&Tag> {
        self.selected_tag.as_ref()
    }

    pub const fn tags(&self) -> &LoadState<Tag> {
        &self.tags
    }

    pub const fn resources(&self) -> &LoadState<Resource> {
        &self.resources
    }

    pub fn is_mounted(&self) -> bool {
        !self.liveness.is_cancelled()
    }

    fn begin_load(&mut self) -> PendingLoad {
        self.generation += 1;
        let request = match &self.mode {
            ViewMode::Tags => {
                self.tags = LoadState::Loading;
                LoadRequest::Tags
            }
            ViewMode::TagResources(tag_id) => {
                self.resources = LoadState::Loading;
                match &self.selected_tag {
                    Some(tag) => LoadRequest::Resources(tag.clone()),
                    None => LoadRequest::UnresolvedResources(tag_id.clone()),
                }
            }
        };

        PendingLoad {
            request,
            generation: self.generation,
            liveness: self.liveness.child_token(),
            timeout: self.timeout,
        }
    }

    /// Issue the page's fetch again, typically after a failure.
    /// Any load still in flight is superseded.
    pub fn retry(&mut self) -> Result<PendingLoad, PageError> {
        if !self.is_mounted() {
            return Err(PageError::Unmounted);
        }
        tracing::info!("Retrying load for {}", self.path);
        Ok(self.begin_load())
    }

    /// Apply a finished load. Returns false when the outcome was dropped
    /// because the page is gone or a newer load was issued.
    pub fn apply(&mut self, outcome: LoadOutcome) -> bool {
        if !self.is_mounted() {
            tracing::debug!("Ignoring load result for unmounted page {}", self.path);
            return false;
        }
        if outcome.generation != self.generation {
            tracing::debug!(
                "Ignoring stale load result for {} (generation {} < {})",
                self.path,
                outcome.generation,
                self.generation
            );
            return false;
        }

        match outcome.payload {
            LoadPayload::Cancelled => return false,
            LoadPayload::Tags(result) => {
                if let Err(error) = &result {
                    tracing::warn!("Failed to load tags for {}: {}", self.path, error);
                }
                self.tags = LoadState::from_result(result);
            }
            LoadPayload::Resources {
                resolved_tag,
                result,
            } => {
                if let Some(tag) = resolved_tag {
                    self.selected_tag = Some(tag);
                }
                if let Err(error) = &result {
                    tracing::warn!("Failed to load resources for {}: {}", self.path, error);
                }
                self.resources = LoadState::from_result(result);
            }
        }
        true
    }

    /// Stop accepting load results. Idempotent.
    pub fn unmount(&self) {
        if !self.liveness.is_cancelled() {
            tracing::debug!("Unmounting browse page on {}", self.path);
            self.liveness.cancel();
        }
    }

    /// The tags to display under the session's query.
    pub fn displayed_tags<'a>(&'a self, session: &SearchSession) -> Displayed<'a, Tag> {
        self.engine
            .compute_displayed(self.tags.records(), session.query())
    }

    /// The resources to display under the session's query.
    pub fn displayed_resources<'a>(&'a self, session: &SearchSession) -> Displayed<'a, Resource> {
        self.engine
            .compute_displayed(self.resources.records(), session.query())
    }

    /// Leave the page backwards: forget its search entirely.
    pub fn go_back<N: Navigator + ?Sized>(&self, session: &mut SearchSession, navigator: &mut N) {
        session.clear_query();
        session.discard_for_path(&self.path);
        self.unmount();
        navigator.go_back();
    }

    /// Open the resource list of a tag shown on this page.
    pub fn select_tag<N: Navigator + ?Sized>(
        &self,
        tag_id: &TagId,
        session: &mut SearchSession,
        navigator: &mut N,
    ) -> Result<(), PageError> {
        if !self.is_mounted() {
            return Err(PageError::Unmounted);
        }
        let tag = self
            .tags
            .records()
            .and_then(|tags| tags.iter().find(|tag| &tag.id == tag_id))
            .cloned()
            .ok_or_else(|| PageError::UnknownTag(tag_id.clone()))?;

        self.leave(session);
        navigator.push(
            Route::TagResources(tag.id.clone()).path(),
            Some(LocationState {
                selected_tag: Some(tag),
            }),
        );
        Ok(())
    }

    /// Open the detail view of a resource.
    pub fn select_resource<N: Navigator + ?Sized>(
        &self,
        resource_id: &ResourceId,
        session: &mut SearchSession,
        navigator: &mut N,
    ) -> Result<(), PageError> {
        if !self.is_mounted() {
            return Err(PageError::Unmounted);
        }
        self.leave(session);
        navigator.push(Route::Resource(resource_id.clone()).path(), None);
        Ok(())
    }

    /// Remember the search for this path so coming back restores it.
    fn leave(&self, session: &mut SearchSession) {
        session.save_for_path(&self.path);
        session.clear_query();
        self.unmount();
    }

    /// Build the view model for the current state.
    pub fn view(&self, session: &SearchSession) -> PageView {
        let title = self
            .selected_tag
            .as_ref()
            .map_or_else(|| TAGS_TITLE.to_string(), |tag| tag.slug.clone());

        let searching = session.is_searching();
        let body = match &self.mode {
            ViewMode::Tags => list_body(
                &self.tags,
                self.displayed_tags(session),
                searching,
                LOADING_TAGS,
                NO_TAGS,
                PageBody::Tags,
            ),
            ViewMode::TagResources(_) => list_body(
                &self.resources,
                self.displayed_resources(session),
                searching,
                LOADING_RESOURCES,
                NO_TAGGED_RESOURCES,
                PageBody::Resources,
            ),
        };

        PageView { title, body }
    }
}

impl Drop for BrowsePage {
    fn drop(&mut self) {
        self.liveness.cancel();
    }
}

fn list_body<'a, T, R>(
    state: &LoadState<T>,
    displayed: Displayed<'a, T>,
    searching: bool,
    loading: &'static str,
    nothing_yet: &'static str,
    rows: impl FnOnce(Vec<R>) -> PageBody,
) -> PageBody
where
    T: Searchable + 'a,
    R: From<&'a T>,
{
    if let Some(error) = state.error() {
        return PageBody::Failed {
            error: error.to_string(),
            hint: RETRY_HINT,
        };
    }

    match displayed {
        Displayed::NotReady => PageBody::Loading { message: loading },
        // Any input in the search box counts, even when it yields no terms.
        Displayed::Empty { .. } if searching => PageBody::Empty {
            message: NO_SEARCH_MATCH,
        },
        Displayed::Empty { .. } => PageBody::Empty {
            message: nothing_yet,
        },
        Displayed::Records(records) => rows(records.into_iter().map(R::from).collect()),
    }
}
